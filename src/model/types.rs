//! Core type definitions for the terminal UI

use std::time::Instant;

/// Entries of the navigation drawer, in display order
pub const DRAWER_ITEMS: [&str; 3] = [ARTISTS_ITEM, ALBUMS_ITEM, SONGS_ITEM];
pub const ARTISTS_ITEM: &str = "Artists";
pub const ALBUMS_ITEM: &str = "Albums";
pub const SONGS_ITEM: &str = "Songs";

/// Number of tiles per row in album grids
pub const ALBUM_GRID_COLUMNS: usize = 4;

/// Seconds an error popup stays up before clearing itself
pub const ERROR_DISPLAY_SECS: u64 = 5;

/// Which section of the UI is currently focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Drawer,
    MainContent,
}

impl ActiveSection {
    pub fn toggle(self) -> Self {
        match self {
            ActiveSection::Drawer => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Drawer,
        }
    }
}

/// UI state that never goes through the reducer
#[derive(Clone, Debug)]
pub struct UiState {
    pub title: String,
    pub user: String,
    pub active_section: ActiveSection,
    pub drawer_selected: usize,
    pub content_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            title: "Lossless Player".to_string(),
            user: String::new(),
            active_section: ActiveSection::Drawer,
            drawer_selected: 0,
            content_selected: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
