//! Overlay rendering (error notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{UiState, ERROR_DISPLAY_SECS};

/// Rows the playback bar occupies at the bottom of the screen
const PLAYBACK_BAR_HEIGHT: u16 = 3;

/// Error toast, docked above the playback bar so the current track stays visible.
pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(message) = ui_state.error_message.as_deref() else {
        return;
    };

    let popup_area = error_area(frame.area(), message);
    frame.render_widget(Clear, popup_area);

    let hint = match ui_state.error_timestamp {
        Some(shown_at) => {
            let left = ERROR_DISPLAY_SECS.saturating_sub(shown_at.elapsed().as_secs());
            format!(" Esc/Enter to dismiss · closes in {}s ", left)
        }
        None => " Esc/Enter to dismiss ".to_string(),
    };

    let toast = Paragraph::new(Line::from(vec![
        Span::styled("✖ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(message.to_string(), Style::default().fg(Color::White)),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Playback problem ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(hint).right_aligned())
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(toast, popup_area);
}

/// Right-aligned above the playback bar; tall enough for the wrapped message.
fn error_area(screen: Rect, message: &str) -> Rect {
    let width = 48u16.min(screen.width);
    // Borders, padding and the two-column marker
    let text_width = usize::from(width.saturating_sub(6)).max(1);
    let text_lines = message.chars().count().div_ceil(text_width).max(1) as u16;
    let height = (text_lines + 2).min(screen.height.saturating_sub(PLAYBACK_BAR_HEIGHT));

    Rect {
        x: screen.x + screen.width.saturating_sub(width),
        y: screen.y + screen.height.saturating_sub(PLAYBACK_BAR_HEIGHT + height),
        width,
        height,
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab", "Switch library / content"),
        ("↑ / ↓", "Move selection"),
        ("← / →", "Move across album grid"),
        ("Enter", "Open / Play"),
        ("Backspace / Esc", "Go back"),
        ("M", "Show / hide library"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("N", "Next track"),
        ("P", "Previous track / restart"),
        (", / .", "Back / forward 10s"),
        ("0-9", "Seek to 0%-90%"),
        ("+ / -", "Volume up / down"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 56u16.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    // Create help text lines
    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        desc.to_string(),
                        Style::default().fg(Color::White),
                    ),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
