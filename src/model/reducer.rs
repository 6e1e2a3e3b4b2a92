//! Library navigation state and the reducer that folds actions into it

use super::actions::Action;
use super::library::{Album, Artist, Track};

pub const DEFAULT_VIEW: &str = "Default View";

/// Navigation state of the library browser. Replaced wholesale on each action.
#[derive(Clone, Debug, PartialEq)]
pub struct LibraryState {
    pub drawer_open: bool,
    pub is_playing: bool,
    pub selected_item: String,
    pub selected_album: Option<u32>,
    pub selected_artist: Option<u32>,
    pub artists: Option<Vec<Artist>>,
    pub albums: Option<Vec<Album>>,
    pub tracks: Option<Vec<Track>>,
}

impl Default for LibraryState {
    fn default() -> Self {
        Self {
            drawer_open: false,
            is_playing: false,
            selected_item: DEFAULT_VIEW.to_string(),
            selected_album: None,
            selected_artist: None,
            artists: None,
            albums: None,
            tracks: None,
        }
    }
}

pub fn reduce(state: &LibraryState, action: &Action) -> LibraryState {
    match action {
        Action::SetArtists { artists } => LibraryState {
            artists: Some(artists.clone()),
            ..state.clone()
        },
        Action::SetAlbums { albums } | Action::AlbumsByArtist { albums } => LibraryState {
            albums: Some(albums.clone()),
            ..state.clone()
        },
        Action::SetTracks { tracks } | Action::TracksByAlbum { tracks } => LibraryState {
            tracks: Some(tracks.clone()),
            ..state.clone()
        },
        Action::SelectLibraryItem { title } => LibraryState {
            selected_item: title.clone(),
            ..state.clone()
        },
        Action::SelectArtist { title }
        | Action::RevisitArtistsView { title }
        | Action::ArtistNameClick { title } => LibraryState {
            selected_artist: *title,
            ..state.clone()
        },
        Action::SelectAlbum { title } | Action::RevisitAlbumsView { title } => LibraryState {
            selected_album: *title,
            ..state.clone()
        },
        Action::ToggleDrawer { open } => LibraryState {
            drawer_open: !open,
            ..state.clone()
        },
        Action::PlayAudio { is_playing } | Action::PauseAudio { is_playing } => LibraryState {
            is_playing: *is_playing,
            ..state.clone()
        },
        Action::Unknown => state.clone(),
    }
}
