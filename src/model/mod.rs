//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: UI type definitions (focus, drawer entries, UI state)
//! - `library`: Artist/album/track catalog and its flattening helpers
//! - `actions`: Library navigation messages and their creators
//! - `reducer`: Library state and the pure reducer
//! - `content`: Main content view derived from the library state
//! - `queue`: Play queue with head pointer
//! - `playback`: State observed from the media handle
//! - `app_model`: Main application model with state management methods

mod types;
mod library;
mod content;
mod playback;
mod app_model;
pub mod actions;
pub mod queue;
pub mod reducer;

pub use types::{
    ActiveSection, UiState, ALBUMS_ITEM, ALBUM_GRID_COLUMNS, ARTISTS_ITEM, ERROR_DISPLAY_SECS, DRAWER_ITEMS, SONGS_ITEM,
};

pub use library::{Album, Artist, Library, Track};

pub use content::ContentView;

pub use playback::{PlaybackInfo, PlaybackState};

pub use app_model::AppModel;
