//! Playback-related state derived from the media handle

use super::library::Track;

pub const DEFAULT_VOLUME_PERCENT: u8 = 100;

/// Last known state of the media handle, as observed through its events and
/// the current-time poller.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub volume: u8,
    /// Seconds; 0 until the media reports it
    pub duration: f64,
    pub paused: bool,
    pub current_time: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME_PERCENT,
            duration: 0.0,
            paused: true,
            current_time: 0.0,
        }
    }
}

impl PlaybackState {
    /// Position as a 0.0..=1.0 ratio of the duration
    pub fn progress_ratio(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Complete playback information for rendering the controls bar
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub next_track: Option<Track>,
    /// 1-based queue position and queue length
    pub position: Option<(usize, usize)>,
    pub state: PlaybackState,
}
