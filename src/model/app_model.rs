//! Main application model with state management

use std::time::Instant;

use super::actions::Action;
use super::content::ContentView;
use super::playback::{PlaybackInfo, PlaybackState};
use super::queue::Queue;
use super::reducer::{reduce, LibraryState};
use super::types::{ActiveSection, UiState, ALBUM_GRID_COLUMNS, DRAWER_ITEMS, ERROR_DISPLAY_SECS};

/// Main application model containing all state
#[derive(Default)]
pub struct AppModel {
    library: LibraryState,
    pub ui_state: UiState,
    pub playback: PlaybackState,
    pub queue: Queue,
    should_quit: bool,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Library state
    // ========================================================================

    /// Fold an action into the library state.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.kind(), "Dispatching action");
        self.library = reduce(&self.library, &action);
    }

    pub fn library(&self) -> &LibraryState {
        &self.library
    }

    pub fn content_view(&self) -> ContentView {
        ContentView::from_state(&self.library)
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn get_playback_info(&self) -> PlaybackInfo {
        PlaybackInfo {
            track: self.queue.current().cloned(),
            next_track: self.queue.peek_next().cloned(),
            position: self.queue.head().map(|head| (head + 1, self.queue.len())),
            state: self.playback.clone(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub fn get_ui_state(&self) -> UiState {
        self.ui_state.clone()
    }

    pub fn toggle_section(&mut self) {
        if !self.library.drawer_open {
            self.ui_state.active_section = ActiveSection::MainContent;
            return;
        }
        self.ui_state.active_section = self.ui_state.active_section.toggle();
    }

    pub fn set_active_section(&mut self, section: ActiveSection) {
        self.ui_state.active_section = section;
    }

    pub fn move_selection_up(&mut self) {
        match self.ui_state.active_section {
            ActiveSection::Drawer => {
                self.ui_state.drawer_selected = self.ui_state.drawer_selected.saturating_sub(1);
            }
            ActiveSection::MainContent => {
                let step = if self.content_view().is_grid() { ALBUM_GRID_COLUMNS } else { 1 };
                self.ui_state.content_selected = self.ui_state.content_selected.saturating_sub(step);
            }
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.ui_state.active_section {
            ActiveSection::Drawer => {
                if self.ui_state.drawer_selected < DRAWER_ITEMS.len() - 1 {
                    self.ui_state.drawer_selected += 1;
                }
            }
            ActiveSection::MainContent => {
                let view = self.content_view();
                let step = if view.is_grid() { ALBUM_GRID_COLUMNS } else { 1 };
                let target = self.ui_state.content_selected + step;
                if target < view.len() {
                    self.ui_state.content_selected = target;
                }
            }
        }
    }

    /// Horizontal movement, only meaningful inside album grids
    pub fn move_selection_sideways(&mut self, forward: bool) {
        let view = self.content_view();
        if self.ui_state.active_section != ActiveSection::MainContent || !view.is_grid() {
            return;
        }
        let selected = self.ui_state.content_selected;
        self.ui_state.content_selected = if forward {
            (selected + 1).min(view.len().saturating_sub(1))
        } else {
            selected.saturating_sub(1)
        };
    }

    pub fn reset_content_selection(&mut self) {
        self.ui_state.content_selected = 0;
    }

    pub fn set_error(&mut self, message: String) {
        self.ui_state.error_message = Some(message);
        self.ui_state.error_timestamp = Some(Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.ui_state.error_message = None;
        self.ui_state.error_timestamp = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui_state.error_message.is_some()
    }

    pub fn auto_clear_old_errors(&mut self) {
        if let Some(timestamp) = self.ui_state.error_timestamp {
            if timestamp.elapsed().as_secs() > ERROR_DISPLAY_SECS {
                self.clear_error();
            }
        }
    }

    pub fn show_help_popup(&mut self) {
        self.ui_state.show_help_popup = true;
    }

    pub fn hide_help_popup(&mut self) {
        self.ui_state.show_help_popup = false;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.ui_state.show_help_popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::actions;
    use crate::model::library::tests::sample_artists;
    use crate::model::types::ALBUMS_ITEM;

    fn model_on_album_grid() -> AppModel {
        let artists = sample_artists();
        let mut model = AppModel::new();
        model.dispatch(actions::set_artists(artists.clone()));
        model.dispatch(actions::set_albums(&artists));
        model.dispatch(actions::select_library_item(ALBUMS_ITEM));
        model.set_active_section(ActiveSection::MainContent);
        model
    }

    #[test]
    fn grid_selection_moves_by_row_and_stays_in_bounds() {
        let mut model = model_on_album_grid();
        // 3 albums fit in one row
        model.move_selection_down();
        assert_eq!(model.ui_state.content_selected, 0);

        model.move_selection_sideways(true);
        model.move_selection_sideways(true);
        model.move_selection_sideways(true);
        assert_eq!(model.ui_state.content_selected, 2);

        model.move_selection_up();
        assert_eq!(model.ui_state.content_selected, 0);
    }

    #[test]
    fn drawer_selection_is_clamped() {
        let mut model = AppModel::new();
        model.move_selection_up();
        assert_eq!(model.ui_state.drawer_selected, 0);
        for _ in 0..10 {
            model.move_selection_down();
        }
        assert_eq!(model.ui_state.drawer_selected, DRAWER_ITEMS.len() - 1);
    }

    #[test]
    fn closed_drawer_keeps_focus_on_content() {
        let mut model = AppModel::new();
        model.toggle_section();
        assert_eq!(model.ui_state.active_section, ActiveSection::MainContent);
        model.toggle_section();
        assert_eq!(model.ui_state.active_section, ActiveSection::MainContent);

        model.dispatch(actions::toggle_drawer(false));
        model.toggle_section();
        assert_eq!(model.ui_state.active_section, ActiveSection::Drawer);
    }

    #[test]
    fn errors_can_be_cleared() {
        let mut model = AppModel::new();
        model.set_error("boom".to_string());
        assert!(model.has_error());
        model.auto_clear_old_errors();
        assert!(model.has_error());
        model.clear_error();
        assert!(!model.has_error());
    }
}
