//! What the main content area shows, derived from the library state

use super::library::{Album, Artist, Track};
use super::reducer::LibraryState;
use super::types::{ALBUMS_ITEM, ARTISTS_ITEM, SONGS_ITEM};

#[derive(Clone, Debug, PartialEq)]
pub enum ContentView {
    /// Nothing picked in the drawer yet
    Default,
    Artists { artists: Vec<Artist> },
    /// Album grid; `artist` is set when the grid belongs to one artist
    Albums { artist: Option<String>, albums: Vec<Album> },
    AlbumDetail { album: Option<Album>, tracks: Vec<Track> },
    Tracks { tracks: Vec<Track> },
}

impl ContentView {
    /// Album focus is the most specific and wins over artist focus.
    pub fn from_state(state: &LibraryState) -> Self {
        let artists = state.artists.as_deref().unwrap_or_default();
        let albums = state.albums.clone().unwrap_or_default();
        let tracks = state.tracks.clone().unwrap_or_default();

        if let Some(album_id) = state.selected_album {
            let album = artists
                .iter()
                .flat_map(|artist| artist.albums.iter())
                .find(|album| album.id == album_id)
                .cloned();
            return ContentView::AlbumDetail { album, tracks };
        }

        match state.selected_item.as_str() {
            ARTISTS_ITEM => match state.selected_artist {
                Some(artist_id) => ContentView::Albums {
                    artist: artists
                        .iter()
                        .find(|artist| artist.id == artist_id)
                        .map(|artist| artist.name.clone()),
                    albums,
                },
                None => ContentView::Artists {
                    artists: artists.to_vec(),
                },
            },
            ALBUMS_ITEM => ContentView::Albums { artist: None, albums },
            SONGS_ITEM => ContentView::Tracks { tracks },
            _ => ContentView::Default,
        }
    }

    /// Number of selectable entries
    pub fn len(&self) -> usize {
        match self {
            ContentView::Default => 0,
            ContentView::Artists { artists } => artists.len(),
            ContentView::Albums { albums, .. } => albums.len(),
            ContentView::AlbumDetail { tracks, .. } | ContentView::Tracks { tracks } => tracks.len(),
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, ContentView::Albums { .. })
    }
}
