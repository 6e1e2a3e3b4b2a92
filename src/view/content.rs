//! Main content area rendering (welcome, artist list, track lists)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, Album, Artist, ContentView, Track, UiState};
use super::albums::render_album_grid;
use super::utils::{calculate_num_width, format_seconds, render_scrollable_list, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_view: &ContentView,
    playing: Option<&str>,
) {
    let is_focused = ui_state.active_section == ActiveSection::MainContent;
    let selected = ui_state.content_selected;

    match content_view {
        ContentView::Default => render_welcome(frame, area, is_focused),
        ContentView::Artists { artists } => {
            render_artist_list(frame, area, artists, selected, is_focused);
        }
        ContentView::Albums { artist, albums } => {
            let title = match artist {
                Some(name) => format!(" Albums by {} ", name),
                None => " Albums ".to_string(),
            };
            render_album_grid(frame, area, &title, albums, selected, is_focused);
        }
        ContentView::AlbumDetail { album, tracks } => {
            render_album_detail(frame, area, album.as_ref(), tracks, selected, is_focused, playing);
        }
        ContentView::Tracks { tracks } => {
            render_track_list(frame, area, " Songs ", tracks, selected, is_focused, playing);
        }
    }
}

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

fn render_welcome(frame: &mut Frame, area: Rect, is_focused: bool) {
    let content = Paragraph::new("Pick Artists, Albums or Songs from the library\n\nUse Tab to switch between library and content\nUse arrow keys to move, Enter to open or play\nPress h for all key bindings")
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(content, area);
}

fn render_artist_list(
    frame: &mut Frame,
    area: Rect,
    artists: &[Artist],
    selected_index: usize,
    is_focused: bool,
) {
    let items: Vec<ListItem> = artists
        .iter()
        .enumerate()
        .map(|(i, artist)| {
            let style = if i == selected_index && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == selected_index {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let albums = match artist.albums.len() {
                1 => "1 album".to_string(),
                n => format!("{} albums", n),
            };
            ListItem::new(format!("🎤 {}  ({})", artist.name, albums)).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Artists ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    render_scrollable_list(frame, area, items, selected_index, block);
}

fn render_album_detail(
    frame: &mut Frame,
    area: Rect,
    album: Option<&Album>,
    tracks: &[Track],
    selected_index: usize,
    is_focused: bool,
    playing: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Tracks
        ])
        .split(area);

    let header_text = match album {
        Some(album) => format!(
            "💿 {} by {} ({})\n {} tracks | {} | Enter: Play from selected | Backspace: Go back",
            album.title,
            album.artist_name,
            album.year,
            tracks.len(),
            album.playtime
        ),
        None => format!("💿 Unknown album\n {} tracks | Backspace: Go back", tracks.len()),
    };
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default()
            .padding(Padding::horizontal(1))
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)));
    frame.render_widget(header, chunks[0]);

    render_track_list(frame, chunks[1], " Tracks ", tracks, selected_index, is_focused, playing);
}

fn render_track_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tracks: &[Track],
    selected_index: usize,
    is_focused: bool,
    playing: Option<&str>,
) {
    let content_width = area.width.saturating_sub(4) as usize;
    let items = render_track_items(tracks, selected_index, is_focused, playing, content_width);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    // +1 for the header row
    render_scrollable_list(frame, area, items, selected_index + 1, block);
}

fn render_track_items(
    tracks: &[Track],
    selected_index: usize,
    is_focused: bool,
    playing: Option<&str>,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(tracks.len());
    let duration_width = 8;
    let fixed_width = 1 + num_width + 3 + 3 + 3 + duration_width;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 55) / 100;
    let artist_width = remaining_width.saturating_sub(title_width);

    let mut items: Vec<ListItem<'static>> = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<title_width$}   {:<artist_width$}   {}",
            "#", "Title", "Artist", "Duration",
            num_width = num_width,
            title_width = title_width,
            artist_width = artist_width
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    ];

    items.extend(tracks.iter().enumerate().map(|(i, track)| {
        let is_playing = playing == Some(track.file_location.as_str());
        let style = if i == selected_index && is_focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if is_playing {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if i == selected_index {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let playing_indicator = if is_playing { "▶" } else { " " };
        let track_num = format!("{}{:<num_width$}", playing_indicator, i + 1, num_width = num_width);
        let title_str = truncate_string(&track.title, title_width);
        let artist_str = truncate_string(&track.artist, artist_width);
        let duration = format_seconds(f64::from(track.duration));

        ListItem::new(format!("{}   {}   {}   {}", track_num, title_str, artist_str, duration)).style(style)
    }));

    items
}
