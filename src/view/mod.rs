//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, drawer)
//! - `content`: Main content area rendering
//! - `albums`: Album grid rendering
//! - `progress`: Playback bar rendering
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod albums;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentView, PlaybackInfo, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        playback: &PlaybackInfo,
        ui_state: &UiState,
        content_view: &ContentView,
        drawer_open: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + user
                Constraint::Min(0),    // Drawer + content
                Constraint::Length(3), // Playback bar
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state);

        let content_area = if drawer_open {
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(24), Constraint::Min(0)])
                .split(chunks[1]);
            layout::render_drawer(frame, main_chunks[0], ui_state);
            main_chunks[1]
        } else {
            chunks[1]
        };

        let playing = playback.track.as_ref().map(|track| track.file_location.as_str());
        content::render_main_content(frame, content_area, ui_state, content_view, playing);

        progress::render_playback_bar(frame, chunks[2], playback);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
