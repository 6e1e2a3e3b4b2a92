//! Navigation-related controller methods (drawer, artists, albums, tracks)

use crate::model::actions;
use crate::model::{ActiveSection, ContentView, Library, DRAWER_ITEMS};
use crate::model::{ALBUMS_ITEM, SONGS_ITEM};

use super::AppController;

impl AppController {
    /// Load the catalog into the library state and queue up every track,
    /// with the first one loaded but not playing.
    pub async fn load_library(&self, library: Library) {
        let mut model = self.model.lock().await;
        let artists = library.artists;

        tracing::info!(artists = artists.len(), "Loading library");
        model.dispatch(actions::set_albums(&artists));
        model.dispatch(actions::set_tracks(&artists));
        model.dispatch(actions::set_artists(artists));

        if !model.library().drawer_open {
            model.dispatch(actions::toggle_drawer(false));
        }

        let tracks = model.library().tracks.clone().unwrap_or_default();
        if let Some(first) = model.queue.replace(tracks, 0).cloned() {
            let mut media = self.media.lock().await;
            self.load_track(&mut model, &mut **media, &first);
        }
    }

    pub async fn open_drawer_item(&self, index: usize) {
        let Some(&item) = DRAWER_ITEMS.get(index) else {
            return;
        };
        tracing::debug!(item, "Opening library item");

        let mut model = self.model.lock().await;
        let artists = model.library().artists.clone().unwrap_or_default();

        model.dispatch(actions::select_library_item(item));
        model.dispatch(actions::revisit_albums_view());
        model.dispatch(actions::artist_name_click());
        match item {
            ALBUMS_ITEM => model.dispatch(actions::set_albums(&artists)),
            SONGS_ITEM => model.dispatch(actions::set_tracks(&artists)),
            _ => {}
        }

        model.reset_content_selection();
        model.set_active_section(ActiveSection::MainContent);
    }

    /// Enter on the content area: drill into an artist or album, or play a track.
    pub async fn open_selected_content(&self) {
        let mut model = self.model.lock().await;
        let index = model.ui_state.content_selected;
        let artists = model.library().artists.clone().unwrap_or_default();
        let view = model.content_view();

        match view {
            ContentView::Default => {}
            ContentView::Artists { artists: listed } => {
                if let Some(artist) = listed.get(index) {
                    tracing::debug!(artist = %artist.name, "Opening artist");
                    model.dispatch(actions::select_artist(artist.id));
                    model.dispatch(actions::get_albums_by_artist(artist.id, &artists));
                    model.reset_content_selection();
                }
            }
            ContentView::Albums { albums, .. } => {
                if let Some(album) = albums.get(index) {
                    tracing::debug!(album = %album.title, "Opening album");
                    model.dispatch(actions::select_album(album.id));
                    model.dispatch(actions::get_tracks_by_album(album.id, &artists));
                    model.reset_content_selection();
                }
            }
            ContentView::AlbumDetail { tracks, .. } | ContentView::Tracks { tracks } => {
                drop(model);
                self.replace_queue_and_play(tracks, index).await;
            }
        }
    }

    /// Step out of album detail, then out of an artist's albums.
    pub async fn navigate_back(&self) {
        let mut model = self.model.lock().await;
        let selected_album = model.library().selected_album;
        let selected_artist = model.library().selected_artist;

        if selected_album.is_some() {
            model.dispatch(actions::revisit_albums_view());
        } else if selected_artist.is_some() {
            model.dispatch(actions::revisit_artists_view());
        } else {
            return;
        }
        model.reset_content_selection();
    }

    pub async fn toggle_drawer(&self) {
        let mut model = self.model.lock().await;
        let open = model.library().drawer_open;
        model.dispatch(actions::toggle_drawer(open));

        if !model.library().drawer_open {
            model.set_active_section(ActiveSection::MainContent);
        }
    }
}
