//! Playback control methods

use crate::config::{SEEK_CEILING_PERCENT, SKIP_BACK_THRESHOLD_SECS, SKIP_SECONDS, VOLUME_STEP};
use crate::media::{MediaElement, MediaEvent};
use crate::model::actions;
use crate::model::{AppModel, Track};

use super::AppController;

impl AppController {
    /// Point the media handle at `track`. Playback state is left to the caller.
    pub(crate) fn load_track(&self, model: &mut AppModel, media: &mut dyn MediaElement, track: &Track) {
        let url = track.url(&self.settings.api_url);
        tracing::info!(track = %track.title, artist = %track.artist, url = %url, "Loading track");
        media.set_source(&url);
        model.playback.duration = f64::from(track.duration);
        model.playback.current_time = media.current_time();
    }

    pub async fn toggle_playback(&self) {
        let model = self.model.lock().await;
        let mut media = self.media.lock().await;
        if model.queue.is_empty() {
            tracing::debug!("Nothing queued, ignoring play/pause");
            return;
        }
        let paused = model.playback.paused;
        tracing::debug!(paused, "Toggling playback");

        if paused {
            media.play();
        } else {
            media.pause();
        }
    }

    /// Seek to `percent` (0-100) of the track. 100 is pulled back to just
    /// short of the end.
    pub async fn seek_to_fraction(&self, percent: f64) {
        let mut model = self.model.lock().await;
        let mut media = self.media.lock().await;

        let percent = percent.clamp(0.0, SEEK_CEILING_PERCENT);
        let target = percent / 100.0 * model.playback.duration;
        tracing::debug!(percent, target, "Seeking");

        media.set_current_time(target);
        model.playback.current_time = media.current_time();
    }

    pub async fn skip_by(&self, seconds: f64) {
        let mut model = self.model.lock().await;
        let mut media = self.media.lock().await;

        let target = media.current_time() + seconds;
        media.set_current_time(target);
        model.playback.current_time = media.current_time();
    }

    pub async fn rewind(&self) {
        self.skip_by(-SKIP_SECONDS).await;
    }

    pub async fn fast_forward(&self) {
        self.skip_by(SKIP_SECONDS).await;
    }

    /// Previous track when near the start of the current one, otherwise
    /// restart the current track.
    pub async fn skip_back(&self) {
        let mut model = self.model.lock().await;
        let mut media = self.media.lock().await;

        if model.queue.current().is_none() {
            tracing::debug!("Nothing queued, ignoring previous");
            return;
        }

        if media.current_time().floor() < SKIP_BACK_THRESHOLD_SECS && !model.queue.is_first() {
            if let Some(track) = model.queue.retreat().cloned() {
                let was_playing = !model.playback.paused;
                self.load_track(&mut model, &mut **media, &track);
                if was_playing {
                    media.play();
                }
                return;
            }
        }

        tracing::debug!("Restarting current track");
        media.set_current_time(0.0);
        model.playback.current_time = media.current_time();
        media.play();
    }

    /// Next track, or seek to the end when already on the last one.
    pub async fn skip_forward(&self) {
        let mut model = self.model.lock().await;
        let mut media = self.media.lock().await;

        if model.queue.is_last() {
            let end = media.duration().unwrap_or(model.playback.duration);
            tracing::debug!(end, "Last track in queue, seeking to end");
            media.set_current_time(end);
            model.playback.current_time = media.current_time();
            return;
        }

        if let Some(track) = model.queue.advance().cloned() {
            let was_playing = !model.playback.paused;
            self.load_track(&mut model, &mut **media, &track);
            if was_playing {
                media.play();
            }
        }
    }

    /// Set volume from 0-100; values above 100 are clamped.
    pub async fn set_volume(&self, volume: u8) {
        let mut model = self.model.lock().await;
        let mut media = self.media.lock().await;

        let volume = volume.min(100);
        model.playback.volume = volume;
        media.set_volume(f32::from(volume) / 100.0);
    }

    pub async fn volume_up(&self) {
        let current = self.model.lock().await.playback.volume;
        self.set_volume(current.saturating_add(VOLUME_STEP)).await;
    }

    pub async fn volume_down(&self) {
        let current = self.model.lock().await.playback.volume;
        self.set_volume(current.saturating_sub(VOLUME_STEP)).await;
    }

    /// Replace the queue with `tracks` and start playing `tracks[head]`.
    /// Does nothing when `head` is out of range.
    pub async fn replace_queue_and_play(&self, tracks: Vec<Track>, head: usize) {
        let mut model = self.model.lock().await;
        let mut media = self.media.lock().await;

        let Some(track) = model.queue.replace(tracks, head).cloned() else {
            return;
        };
        self.load_track(&mut model, &mut **media, &track);
        media.play();
    }

    /// Natural end of the current track: move on, or stop after the last one.
    /// Ends reported for a source that has since been replaced are dropped.
    pub async fn handle_ended(&self, generation: u64) {
        let mut model = self.model.lock().await;
        let mut media = self.media.lock().await;

        if media.generation() != generation {
            tracing::debug!(generation, current = media.generation(), "Ignoring end of superseded source");
            return;
        }

        match model.queue.advance().cloned() {
            Some(track) => {
                self.load_track(&mut model, &mut **media, &track);
                media.play();
            }
            None => tracing::info!("Reached end of queue"),
        }
    }

    pub async fn refresh_current_time(&self) {
        let mut model = self.model.lock().await;
        let media = self.media.lock().await;
        model.playback.current_time = media.current_time();
    }

    pub async fn handle_media_event(&self, event: MediaEvent) {
        tracing::trace!(?event, "Media event");
        let mut model = self.model.lock().await;

        match event {
            MediaEvent::CanPlay { duration } => {
                if duration > 0.0 {
                    model.playback.duration = duration;
                }
            }
            MediaEvent::Play => {
                model.playback.paused = false;
                model.dispatch(actions::play_audio());
            }
            MediaEvent::Pause => {
                model.playback.paused = true;
                model.dispatch(actions::pause_audio());
            }
            MediaEvent::Ended { generation } => {
                drop(model);
                self.handle_ended(generation).await;
            }
            MediaEvent::Error(message) => {
                model.set_error(Self::format_error(&message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::controller::tests::Harness;
    use crate::media::MediaEvent;
    use crate::model::Track;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                title: format!("Track {}", i),
                album: "Album".to_string(),
                artist: "Artist".to_string(),
                duration: 200,
                file_location: format!("track{}.flac", i),
            })
            .collect()
    }

    async fn playing_harness(n: usize, head: usize) -> Harness {
        let mut h = Harness::new();
        h.controller.replace_queue_and_play(tracks(n), head).await;
        h.loaded(200.0).await;
        h.pump().await;
        h
    }

    #[tokio::test]
    async fn replace_queue_loads_and_plays_head() {
        let h = playing_harness(3, 1).await;
        assert_eq!(h.sources(), ["http://localhost:8444/api/v1/play/track1.flac"]);

        let model = h.controller.model.lock().await;
        assert_eq!(model.queue.head(), Some(1));
        assert!(!model.playback.paused);
        assert!(model.library().is_playing);
        assert_eq!(model.playback.duration, 200.0);
    }

    #[tokio::test]
    async fn replace_queue_with_missing_head_is_a_no_op() {
        let mut h = Harness::new();
        h.controller.replace_queue_and_play(tracks(2), 5).await;
        h.pump().await;
        assert!(h.sources().is_empty());
        assert!(h.controller.model.lock().await.playback.paused);
    }

    #[tokio::test]
    async fn toggle_pauses_and_resumes() {
        let mut h = playing_harness(1, 0).await;

        h.controller.toggle_playback().await;
        h.pump().await;
        assert!(h.controller.model.lock().await.playback.paused);
        assert!(!h.controller.model.lock().await.library().is_playing);

        h.controller.toggle_playback().await;
        h.pump().await;
        assert!(!h.controller.model.lock().await.playback.paused);
    }

    #[tokio::test]
    async fn volume_maps_linearly() {
        let h = Harness::new();
        for (input, expected) in [(0u8, 0.0f32), (50, 0.5), (100, 1.0), (250, 1.0)] {
            h.controller.set_volume(input).await;
            assert_eq!(h.media.lock().unwrap().volume, expected);
        }
        assert_eq!(h.controller.model.lock().await.playback.volume, 100);
    }

    #[tokio::test]
    async fn volume_steps_saturate() {
        let h = Harness::new();
        h.controller.volume_up().await;
        assert_eq!(h.controller.model.lock().await.playback.volume, 100);
        h.controller.set_volume(3).await;
        h.controller.volume_down().await;
        assert_eq!(h.controller.model.lock().await.playback.volume, 0);
    }

    #[tokio::test]
    async fn seek_to_full_fraction_stops_short_of_end() {
        let h = playing_harness(1, 0).await;

        h.controller.seek_to_fraction(50.0).await;
        assert_eq!(h.media.lock().unwrap().current_time, 100.0);

        h.controller.seek_to_fraction(100.0).await;
        let position = h.media.lock().unwrap().current_time;
        assert!((position - 199.4).abs() < 1e-9);
        assert_eq!(h.controller.model.lock().await.playback.current_time, position);
    }

    #[tokio::test]
    async fn relative_skip_moves_position() {
        let h = playing_harness(1, 0).await;
        h.controller.fast_forward().await;
        h.controller.fast_forward().await;
        h.controller.rewind().await;
        assert_eq!(h.media.lock().unwrap().current_time, 10.0);

        h.controller.skip_by(-60.0).await;
        assert_eq!(h.media.lock().unwrap().current_time, 0.0);
    }

    #[tokio::test]
    async fn skip_forward_at_last_index_seeks_to_end() {
        let h = playing_harness(2, 1).await;
        h.controller.skip_forward().await;

        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));
        assert_eq!(h.sources().len(), 1);
        assert_eq!(h.media.lock().unwrap().current_time, 200.0);
    }

    #[tokio::test]
    async fn skip_forward_loads_next_and_keeps_playing() {
        let mut h = playing_harness(3, 0).await;
        h.controller.skip_forward().await;
        h.pump().await;

        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));
        assert_eq!(h.sources().last().unwrap(), "http://localhost:8444/api/v1/play/track1.flac");
        assert!(!h.media.lock().unwrap().paused);
    }

    #[tokio::test]
    async fn skip_forward_while_paused_stays_paused() {
        let mut h = playing_harness(3, 0).await;
        h.controller.toggle_playback().await;
        h.pump().await;

        h.controller.skip_forward().await;
        h.pump().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));
        assert!(h.media.lock().unwrap().paused);
    }

    #[tokio::test]
    async fn skip_back_near_start_goes_to_previous_track() {
        let h = playing_harness(3, 2).await;
        h.media.lock().unwrap().current_time = 2.9;

        h.controller.skip_back().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));
        assert_eq!(h.sources().last().unwrap(), "http://localhost:8444/api/v1/play/track1.flac");
    }

    #[tokio::test]
    async fn skip_back_later_in_track_restarts_it() {
        let h = playing_harness(3, 2).await;
        h.media.lock().unwrap().current_time = 3.0;

        h.controller.skip_back().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(2));
        assert_eq!(h.sources().len(), 1);
        assert_eq!(h.media.lock().unwrap().current_time, 0.0);
    }

    #[tokio::test]
    async fn skip_back_at_first_index_restarts_and_plays() {
        let mut h = playing_harness(2, 0).await;
        h.controller.toggle_playback().await;
        h.pump().await;
        h.media.lock().unwrap().current_time = 1.0;

        h.controller.skip_back().await;
        h.pump().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(0));
        assert_eq!(h.media.lock().unwrap().current_time, 0.0);
        assert!(!h.controller.model.lock().await.playback.paused);
    }

    #[tokio::test]
    async fn ended_advances_until_last_track() {
        let mut h = playing_harness(2, 0).await;

        h.ended().await;
        h.pump().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));
        assert_eq!(h.sources().len(), 2);
        assert!(!h.media.lock().unwrap().paused);

        h.ended().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));
        assert_eq!(h.sources().len(), 2);
    }

    #[tokio::test]
    async fn end_of_replaced_source_does_not_advance() {
        let mut h = playing_harness(3, 0).await;
        let first = h.media.lock().unwrap().generation;

        h.controller.skip_forward().await;
        h.pump().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));

        h.controller
            .handle_media_event(MediaEvent::Ended { generation: first })
            .await;
        h.pump().await;
        assert_eq!(h.controller.model.lock().await.queue.head(), Some(1));
        assert_eq!(h.sources().len(), 2);
    }

    #[tokio::test]
    async fn skip_back_with_empty_queue_stays_paused() {
        let mut h = Harness::new();
        h.controller.skip_back().await;
        h.pump().await;

        let model = h.controller.model.lock().await;
        assert!(model.playback.paused);
        assert!(!model.library().is_playing);
        assert!(h.media.lock().unwrap().paused);
    }

    #[tokio::test]
    async fn unknown_container_duration_keeps_catalog_length() {
        let mut h = playing_harness(1, 0).await;
        h.controller.handle_media_event(MediaEvent::CanPlay { duration: 0.0 }).await;
        h.pump().await;
        assert_eq!(h.controller.model.lock().await.playback.duration, 200.0);
    }

    #[tokio::test]
    async fn media_error_surfaces_to_ui() {
        let h = Harness::new();
        h.controller
            .handle_media_event(MediaEvent::Error("server answered 404 Not Found for x".into()))
            .await;
        let model = h.controller.model.lock().await;
        assert_eq!(
            model.ui_state.error_message.as_deref(),
            Some("Track not found on the music server.")
        );
    }

    #[tokio::test]
    async fn refresh_reads_media_position() {
        let h = playing_harness(1, 0).await;
        h.media.lock().unwrap().current_time = 42.5;
        h.controller.refresh_current_time().await;
        assert_eq!(h.controller.model.lock().await.playback.current_time, 42.5);
    }
}
