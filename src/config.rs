//! Runtime settings: compiled defaults, overridable from the environment

use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8444/api/v1/play/";

const API_URL_VAR: &str = "LOSSLESS_API_URL";
const LIBRARY_VAR: &str = "LOSSLESS_LIBRARY";
const USER_VAR: &str = "LOSSLESS_USER";

/// Bounds of the randomized delay between current-time refreshes
pub const POLL_DELAY_MIN_MS: u64 = 110;
pub const POLL_DELAY_MAX_MS: u64 = 510;

/// Seconds moved by the rewind / fast-forward keys
pub const SKIP_SECONDS: f64 = 10.0;
pub const VOLUME_STEP: u8 = 5;
/// Within this many seconds of the start, "previous" goes to the previous track
pub const SKIP_BACK_THRESHOLD_SECS: f64 = 3.0;
/// Seeking to 100% would end the track; stop just short of it
pub const SEEK_CEILING_PERCENT: f64 = 99.7;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Base URL tracks' file locations are appended to
    pub api_url: String,
    /// Catalog file to load instead of the embedded sample library
    pub library_path: Option<PathBuf>,
    pub user: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            library_path: None,
            user: String::new(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .map(|url| normalize_base(url.trim()))
            .unwrap_or(defaults.api_url);

        let settings = Self {
            api_url,
            library_path: lookup(LIBRARY_VAR).filter(|p| !p.is_empty()).map(PathBuf::from),
            user: lookup(USER_VAR).unwrap_or(defaults.user),
        };

        tracing::debug!(?settings, "Settings resolved");
        settings
    }
}

fn normalize_base(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
