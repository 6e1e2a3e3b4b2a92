//! Static music catalog: artists, their albums and album tracks

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const EMBEDDED_CATALOG: &str = include_str!("../../assets/library.json");

/// A single playable track
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Album", default)]
    pub album: String,
    #[serde(rename = "Artist", default)]
    pub artist: String,
    /// Length in seconds
    #[serde(rename = "Length", default)]
    pub duration: u32,
    #[serde(rename = "FileLocation")]
    pub file_location: String,
}

impl Track {
    /// Location of the track's media bytes on the play endpoint
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base, self.file_location)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "ID")]
    pub id: u32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Artist_ID", default)]
    pub artist_id: u32,
    #[serde(rename = "Artist_Name", default)]
    pub artist_name: String,
    #[serde(rename = "Year", default)]
    pub year: u16,
    #[serde(rename = "Playtime", default)]
    pub playtime: String,
    #[serde(rename = "Tracks", default)]
    pub tracks: Vec<Track>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(rename = "ID")]
    pub id: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Albums", default)]
    pub albums: Vec<Album>,
}

/// The full catalog as loaded at startup
#[derive(Clone, Debug, Default)]
pub struct Library {
    pub artists: Vec<Artist>,
}

impl Library {
    /// Parse a catalog and fill in the fields albums and tracks inherit from their parents.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut artists: Vec<Artist> =
            serde_json::from_str(json).context("catalog is not a valid artist list")?;

        for artist in &mut artists {
            for album in &mut artist.albums {
                album.artist_id = artist.id;
                album.artist_name = artist.name.clone();
                for track in &mut album.tracks {
                    track.album = album.title.clone();
                    track.artist = artist.name.clone();
                }
            }
        }

        Ok(Self { artists })
    }

    /// Sample catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Every album of every artist, in catalog order.
pub fn all_albums(artists: &[Artist]) -> Vec<Album> {
    artists
        .iter()
        .flat_map(|artist| {
            artist.albums.iter().map(move |album| Album {
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                ..album.clone()
            })
        })
        .collect()
}

pub fn albums_by_artist(artist_id: u32, artists: &[Artist]) -> Vec<Album> {
    artists
        .iter()
        .find(|artist| artist.id == artist_id)
        .map(|artist| artist.albums.clone())
        .unwrap_or_default()
}

pub fn all_tracks(artists: &[Artist]) -> Vec<Track> {
    artists
        .iter()
        .flat_map(|artist| artist.albums.iter())
        .flat_map(|album| album.tracks.iter().cloned())
        .collect()
}

pub fn tracks_by_album(album_id: u32, artists: &[Artist]) -> Vec<Track> {
    artists
        .iter()
        .flat_map(|artist| artist.albums.iter())
        .filter(|album| album.id == album_id)
        .flat_map(|album| album.tracks.iter().cloned())
        .collect()
}
