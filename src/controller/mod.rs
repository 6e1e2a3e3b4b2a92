//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the media handle.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control methods
//! - `navigation`: Library drawer and content navigation
//! - `player_events`: Media event listener and current-time poller

mod input;
mod playback;
mod navigation;
mod player_events;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::media::MediaElement;
use crate::model::AppModel;

/// Locks are always taken model first, then media.
#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) media: Arc<Mutex<Box<dyn MediaElement>>>,
    pub(crate) settings: Arc<Settings>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, media: Box<dyn MediaElement>, settings: Settings) -> Self {
        Self {
            model,
            media: Arc::new(Mutex::new(media)),
            settings: Arc::new(settings),
        }
    }

    pub(crate) fn format_error(error: &str) -> String {
        if error.contains("404") {
            "Track not found on the music server.".to_string()
        } else if error.contains("request for") {
            "Could not reach the music server.".to_string()
        } else if error.contains("could not decode") {
            "Unsupported or corrupt audio file.".to_string()
        } else if error.contains("no audio output") {
            "No audio output device available.".to_string()
        } else {
            format!("Error: {}", error)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::media::fake::{FakeMedia, FakeState};
    use crate::media::MediaEvent;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    pub(crate) struct Harness {
        pub controller: AppController,
        pub media: Arc<std::sync::Mutex<FakeState>>,
        pub events: UnboundedReceiver<MediaEvent>,
    }

    impl Harness {
        pub fn new() -> Self {
            let (tx, events) = mpsc::unbounded_channel();
            let (fake, media) = FakeMedia::new(tx);
            let controller = AppController::new(
                Arc::new(Mutex::new(AppModel::new())),
                Box::new(fake),
                Settings::default(),
            );
            Self { controller, media, events }
        }

        /// Deliver every queued media event, like the event listener would.
        pub async fn pump(&mut self) {
            while let Ok(event) = self.events.try_recv() {
                self.controller.handle_media_event(event).await;
            }
        }

        /// Simulate the loaded source reporting its duration.
        pub async fn loaded(&mut self, duration: f64) {
            self.media.lock().unwrap().duration = Some(duration);
            self.controller
                .handle_media_event(MediaEvent::CanPlay { duration })
                .await;
        }

        /// Simulate the current source playing to its end.
        pub async fn ended(&mut self) {
            let generation = self.media.lock().unwrap().generation;
            self.controller
                .handle_media_event(MediaEvent::Ended { generation })
                .await;
        }

        pub fn sources(&self) -> Vec<String> {
            self.media.lock().unwrap().sources.clone()
        }
    }

    #[test]
    fn formats_media_errors_for_humans() {
        assert_eq!(
            AppController::format_error("server answered 404 Not Found for http://x/a.flac"),
            "Track not found on the music server."
        );
        assert_eq!(
            AppController::format_error("request for http://x/a.flac failed: connection refused"),
            "Could not reach the music server."
        );
        assert_eq!(AppController::format_error("odd"), "Error: odd");
    }
}
