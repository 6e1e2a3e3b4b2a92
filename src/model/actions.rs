//! Action messages for library navigation and the creators that build them
//!
//! Actions serialize as `{"type": ..., "payload": {...}}`, the same shape the
//! reducer's message form uses.

use serde::{Deserialize, Serialize};

use super::library::{self, Album, Artist, Track};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "ARTISTS/SET_ALL")]
    SetArtists { artists: Vec<Artist> },
    #[serde(rename = "SET_ALBUMS")]
    SetAlbums { albums: Vec<Album> },
    #[serde(rename = "SET_TRACKS")]
    SetTracks { tracks: Vec<Track> },
    #[serde(rename = "GET_TRACKS_BY_ALBUM_ID")]
    TracksByAlbum { tracks: Vec<Track> },
    #[serde(rename = "GET_ALBUMS_BY_ARTIST_ID")]
    AlbumsByArtist { albums: Vec<Album> },
    #[serde(rename = "CLICK_ON_LIBRARY_ITEM")]
    SelectLibraryItem { title: String },
    #[serde(rename = "CLICK_ON_ARTIST_ITEM")]
    SelectArtist { title: Option<u32> },
    #[serde(rename = "CLICK_ON_ALBUM_TILE")]
    SelectAlbum { title: Option<u32> },
    #[serde(rename = "CLICK_ON_ARTIST_VIEW_BACK_BUTTON")]
    RevisitArtistsView { title: Option<u32> },
    #[serde(rename = "CLICK_ON_ALBUMS_VIEW_BACK_BUTTON")]
    RevisitAlbumsView { title: Option<u32> },
    #[serde(rename = "CLICK_ON_ARTIST_NAME")]
    ArtistNameClick { title: Option<u32> },
    #[serde(rename = "TOGGLE_DRAWER")]
    ToggleDrawer { open: bool },
    #[serde(rename = "PLAY_AUDIO")]
    PlayAudio {
        #[serde(rename = "isPlaying")]
        is_playing: bool,
    },
    #[serde(rename = "PAUSE_AUDIO")]
    PauseAudio {
        #[serde(rename = "isPlaying")]
        is_playing: bool,
    },
    /// Anything that did not parse as one of the above
    #[serde(skip)]
    Unknown,
}

impl Action {
    /// Build an action from a raw message. Unknown types and payloads of the
    /// wrong shape both become [`Action::Unknown`].
    #[cfg(test)]
    pub fn from_message(message: serde_json::Value) -> Self {
        match serde_json::from_value(message) {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unrecognized action message");
                Action::Unknown
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetArtists { .. } => "ARTISTS/SET_ALL",
            Action::SetAlbums { .. } => "SET_ALBUMS",
            Action::SetTracks { .. } => "SET_TRACKS",
            Action::TracksByAlbum { .. } => "GET_TRACKS_BY_ALBUM_ID",
            Action::AlbumsByArtist { .. } => "GET_ALBUMS_BY_ARTIST_ID",
            Action::SelectLibraryItem { .. } => "CLICK_ON_LIBRARY_ITEM",
            Action::SelectArtist { .. } => "CLICK_ON_ARTIST_ITEM",
            Action::SelectAlbum { .. } => "CLICK_ON_ALBUM_TILE",
            Action::RevisitArtistsView { .. } => "CLICK_ON_ARTIST_VIEW_BACK_BUTTON",
            Action::RevisitAlbumsView { .. } => "CLICK_ON_ALBUMS_VIEW_BACK_BUTTON",
            Action::ArtistNameClick { .. } => "CLICK_ON_ARTIST_NAME",
            Action::ToggleDrawer { .. } => "TOGGLE_DRAWER",
            Action::PlayAudio { .. } => "PLAY_AUDIO",
            Action::PauseAudio { .. } => "PAUSE_AUDIO",
            Action::Unknown => "UNKNOWN",
        }
    }
}

// ============================================================================
// Catalog actions
// ============================================================================

pub fn set_artists(artists: Vec<Artist>) -> Action {
    Action::SetArtists { artists }
}

/// All albums of the given artists, each tagged with its artist id and name.
pub fn set_albums(artists: &[Artist]) -> Action {
    Action::SetAlbums {
        albums: library::all_albums(artists),
    }
}

pub fn set_tracks(artists: &[Artist]) -> Action {
    Action::SetTracks {
        tracks: library::all_tracks(artists),
    }
}

pub fn get_albums_by_artist(artist_id: u32, artists: &[Artist]) -> Action {
    Action::AlbumsByArtist {
        albums: library::albums_by_artist(artist_id, artists),
    }
}

pub fn get_tracks_by_album(album_id: u32, artists: &[Artist]) -> Action {
    Action::TracksByAlbum {
        tracks: library::tracks_by_album(album_id, artists),
    }
}

// ============================================================================
// Library view actions
// ============================================================================

pub fn select_library_item(title: impl Into<String>) -> Action {
    Action::SelectLibraryItem { title: title.into() }
}

pub fn select_album(album_id: u32) -> Action {
    Action::SelectAlbum { title: Some(album_id) }
}

/// Focus an artist (shows the artist's albums)
pub fn select_artist(artist_id: u32) -> Action {
    Action::SelectArtist { title: Some(artist_id) }
}

pub fn revisit_artists_view() -> Action {
    Action::RevisitArtistsView { title: None }
}

pub fn revisit_albums_view() -> Action {
    Action::RevisitAlbumsView { title: None }
}

pub fn artist_name_click() -> Action {
    Action::ArtistNameClick { title: None }
}

/// `open` is the drawer's current state; the reducer stores its negation.
pub fn toggle_drawer(open: bool) -> Action {
    Action::ToggleDrawer { open }
}

// ============================================================================
// Playback actions
// ============================================================================

pub fn play_audio() -> Action {
    Action::PlayAudio { is_playing: true }
}

pub fn pause_audio() -> Action {
    Action::PauseAudio { is_playing: false }
}
