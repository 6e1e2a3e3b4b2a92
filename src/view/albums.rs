//! Album grid: fixed-width tiles, `ALBUM_GRID_COLUMNS` per row

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{Album, ALBUM_GRID_COLUMNS};

/// Rows including borders
const TILE_HEIGHT: u16 = 4;

pub fn render_album_grid(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    albums: &[Album],
    selected_index: usize,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if albums.is_empty() {
        let empty = Paragraph::new("No albums").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible_rows = (inner.height / TILE_HEIGHT).max(1) as usize;
    let selected_row = selected_index / ALBUM_GRID_COLUMNS;
    let first_row = first_visible_row(selected_row, visible_rows);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(TILE_HEIGHT); visible_rows])
        .split(inner);

    for (row_offset, row_area) in rows.iter().enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, ALBUM_GRID_COLUMNS as u32); ALBUM_GRID_COLUMNS])
            .split(*row_area);

        for (column, tile_area) in columns.iter().enumerate() {
            let index = (first_row + row_offset) * ALBUM_GRID_COLUMNS + column;
            let Some(album) = albums.get(index) else {
                return;
            };
            render_tile(frame, *tile_area, album, index == selected_index, is_focused);
        }
    }
}

/// Scroll just far enough to keep the selected row on screen
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    (selected_row + 1).saturating_sub(visible_rows)
}

fn render_tile(frame: &mut Frame, area: Rect, album: &Album, is_selected: bool, is_focused: bool) {
    let (title_style, border_style) = if is_selected && is_focused {
        (
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Green),
        )
    } else if is_selected {
        (Style::default().add_modifier(Modifier::BOLD), Style::default().fg(Color::White))
    } else {
        (Style::default(), Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        Line::styled(format!("💿 {}", album.title), title_style),
        Line::styled(
            format!("{} • {}", album.artist_name, album.year),
            Style::default().fg(Color::Gray),
        ),
    ];

    let tile = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(tile, area);
}
