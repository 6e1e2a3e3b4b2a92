//! Media event listener and the current-time poller

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::{POLL_DELAY_MAX_MS, POLL_DELAY_MIN_MS};
use crate::media::MediaEvent;
use super::AppController;

/// Uniformly random delay within the poll bounds
pub(crate) fn next_poll_delay() -> Duration {
    let ms = rand::thread_rng().gen_range(POLL_DELAY_MIN_MS..=POLL_DELAY_MAX_MS);
    Duration::from_millis(ms)
}

impl AppController {
    pub fn start_media_event_listener(&self, mut events: UnboundedReceiver<MediaEvent>) {
        let controller = self.clone();
        tracing::info!("Starting media event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if controller.model.lock().await.should_quit() {
                    tracing::debug!("Media event listener shutting down");
                    break;
                }

                match &event {
                    MediaEvent::CanPlay { duration } => tracing::debug!(duration, "MediaEvent::CanPlay"),
                    MediaEvent::Play => tracing::debug!("MediaEvent::Play"),
                    MediaEvent::Pause => tracing::debug!("MediaEvent::Pause"),
                    MediaEvent::Ended { generation } => tracing::info!(generation, "MediaEvent::Ended"),
                    MediaEvent::Error(message) => tracing::warn!(%message, "MediaEvent::Error"),
                }
                controller.handle_media_event(event).await;
            }
        });
    }

    /// Re-read the playback position after a random delay, rescheduling
    /// itself until the app quits.
    pub fn start_time_poller(&self) {
        let controller = self.clone();

        tokio::spawn(async move {
            loop {
                if controller.model.lock().await.should_quit() {
                    tracing::debug!("Time poller shutting down");
                    break;
                }
                controller.refresh_current_time().await;
                tokio::time::sleep(next_poll_delay()).await;
            }
        });
    }
}
