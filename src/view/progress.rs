//! Playback bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::PlaybackInfo;
use super::utils::format_seconds;

pub fn render_playback_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let state = &playback.state;

    let status_text = match &playback.track {
        None => " No track loaded".to_string(),
        Some(track) => {
            let icon = if state.paused { "⏸ " } else { "▶" };
            format!(" {} {} · {} · {}", icon, track.title, track.artist, track.album)
        }
    };

    let next_text = match &playback.next_track {
        Some(track) => format!("Next: {}", track.title),
        None => "Next: -".to_string(),
    };
    let controls_info = match playback.position {
        Some((index, len)) => format!(" {}/{} | {} | Vol: {}% ", index, len, next_text, state.volume),
        None => format!(" {} | Vol: {}% ", next_text, state.volume),
    };

    let time_str = format!(
        "{} / {}",
        format_seconds(state.current_time),
        format_seconds(state.duration)
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(state.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
