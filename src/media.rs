//! The media handle the player drives.
//!
//! [`MediaElement`] is the surface the controller mutates (source, position,
//! volume, play/pause). Playback milestones come back as [`MediaEvent`]s on a
//! channel, the same way the player event listener receives them.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::source::EmptyCallback;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Clone, Debug, PartialEq)]
pub enum MediaEvent {
    /// Source loaded; duration in seconds (0 when the container does not say)
    CanPlay { duration: f64 },
    Play,
    Pause,
    /// The source of `generation` played to its end
    Ended { generation: u64 },
    Error(String),
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no audio output available: {0}")]
    NoOutputDevice(String),
    #[error("request for {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server answered {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: DecoderError,
    },
}

pub trait MediaElement: Send {
    /// Start loading `url`. The element is paused at position 0 until `play`.
    fn set_source(&mut self, url: &str);
    /// Resumes, or starts over from 0 once the source has ended.
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    /// Position in seconds
    fn current_time(&self) -> f64;
    /// Seek; clamped to the loaded source's bounds
    fn set_current_time(&mut self, seconds: f64);
    fn duration(&self) -> Option<f64>;
    /// 0.0 (mute) to 1.0 (full)
    fn set_volume(&mut self, volume: f32);
    /// Bumped by every `set_source`; tags [`MediaEvent::Ended`]
    fn generation(&self) -> u64;
}

/// Where a seek to `seconds` lands inside a source of `duration`.
fn seek_target(seconds: f64, duration: Option<f64>) -> f64 {
    let upper = duration.unwrap_or(f64::MAX);
    seconds.clamp(0.0, upper.max(0.0))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fetched bytes of the current source, kept to start over after the end.
struct LoadedSource {
    bytes: Arc<[u8]>,
    duration: Option<f64>,
}

/// State shared between the element, its load tasks and the end-of-track
/// callback running on the audio thread.
struct Shared {
    sink: Sink,
    events: UnboundedSender<MediaEvent>,
    generation: AtomicU64,
    paused: AtomicBool,
    /// Set by the end-of-track callback until the next play or seek
    ended: AtomicBool,
    /// Holding this lock serializes generation changes with sink appends.
    source: Mutex<Option<LoadedSource>>,
}

impl Shared {
    fn send(&self, event: MediaEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("Media event receiver dropped");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Drop whatever is queued or loaded and open a new generation.
    fn begin_load(&self) -> u64 {
        let mut slot = lock(&self.source);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.sink.clear();
        self.sink.pause();
        self.paused.store(true, Ordering::SeqCst);
        self.ended.store(false, Ordering::SeqCst);
        *slot = None;
        generation
    }

    fn finish_load(self: &Arc<Self>, generation: u64, url: &str, fetched: Result<Vec<u8>, MediaError>) {
        let mut slot = lock(&self.source);
        if !self.is_current(generation) {
            tracing::debug!(url, generation, "Discarding superseded media source");
            return;
        }

        let bytes: Arc<[u8]> = match fetched {
            Ok(bytes) => bytes.into(),
            Err(e) => {
                tracing::error!(error = %e, "Media load failed");
                self.send(MediaEvent::Error(e.to_string()));
                return;
            }
        };

        let duration = match self.append_source(generation, &bytes) {
            Ok(duration) => duration,
            Err(source) => {
                let e = MediaError::Decode { url: url.to_string(), source };
                tracing::error!(error = %e, "Media load failed");
                self.send(MediaEvent::Error(e.to_string()));
                return;
            }
        };
        *slot = Some(LoadedSource { bytes, duration });

        tracing::info!(url, duration = ?duration, "Media ready");
        self.send(MediaEvent::CanPlay {
            duration: duration.unwrap_or(0.0),
        });
    }

    /// Queue a fresh decoder over `bytes` followed by the end-of-track callback.
    fn append_source(self: &Arc<Self>, generation: u64, bytes: &Arc<[u8]>) -> Result<Option<f64>, DecoderError> {
        let decoder = Decoder::new(Cursor::new(bytes.clone()))?;
        let duration = decoder.total_duration().map(|d| d.as_secs_f64());
        self.sink.append(decoder);

        // Weak: the callback lives inside the sink this struct owns
        let shared = Arc::downgrade(self);
        self.sink.append(EmptyCallback::<f32>::new(Box::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.source_ended(generation);
            }
        })));
        Ok(duration)
    }

    fn source_ended(&self, generation: u64) {
        if !self.is_current(generation) {
            return;
        }
        self.ended.store(true, Ordering::SeqCst);
        if !self.paused.swap(true, Ordering::SeqCst) {
            self.send(MediaEvent::Pause);
        }
        self.send(MediaEvent::Ended { generation });
    }

    /// After a natural end the sink is empty; queue the source again from 0.
    fn restart_if_ended(self: &Arc<Self>) {
        if !self.ended.swap(false, Ordering::SeqCst) {
            return;
        }
        let source = lock(&self.source);
        let Some(loaded) = source.as_ref() else {
            return;
        };

        let generation = self.generation.load(Ordering::SeqCst);
        tracing::debug!(generation, "Re-queueing ended source");
        if self.paused.load(Ordering::SeqCst) {
            self.sink.pause();
        }
        if let Err(e) = self.append_source(generation, &loaded.bytes) {
            tracing::warn!(error = %e, "Could not re-queue ended source");
        }
    }
}

/// rodio-backed media element streaming tracks over HTTP.
pub struct RodioMedia {
    shared: Arc<Shared>,
    client: reqwest::Client,
    runtime: Handle,
}

impl RodioMedia {
    /// Must be called from within a tokio runtime.
    pub fn new(events: UnboundedSender<MediaEvent>) -> Result<Self, MediaError> {
        let output = spawn_output_stream()?;
        let sink = Sink::try_new(&output).map_err(|e| MediaError::NoOutputDevice(e.to_string()))?;

        tracing::info!("Audio output initialized");
        Ok(Self::with_sink(sink, events, Handle::current()))
    }

    /// Drive an existing sink; loads are spawned on `runtime`.
    fn with_sink(sink: Sink, events: UnboundedSender<MediaEvent>, runtime: Handle) -> Self {
        sink.pause();
        Self {
            shared: Arc::new(Shared {
                sink,
                events,
                generation: AtomicU64::new(0),
                paused: AtomicBool::new(true),
                ended: AtomicBool::new(false),
                source: Mutex::new(None),
            }),
            client: reqwest::Client::new(),
            runtime,
        }
    }
}

/// The output stream stops when dropped and cannot leave its thread, so it
/// lives on a parked thread for the rest of the process.
fn spawn_output_stream() -> Result<OutputStreamHandle, MediaError> {
    let (tx, rx) = mpsc::channel();

    std::thread::Builder::new()
        .name("audio-output".to_string())
        .spawn(move || match OutputStream::try_default() {
            Ok((_stream, handle)) => {
                if tx.send(Ok(handle)).is_err() {
                    return;
                }
                loop {
                    std::thread::park();
                }
            }
            Err(e) => {
                let _ = tx.send(Err(MediaError::NoOutputDevice(e.to_string())));
            }
        })
        .map_err(|e| MediaError::NoOutputDevice(e.to_string()))?;

    rx.recv()
        .map_err(|e| MediaError::NoOutputDevice(e.to_string()))?
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, MediaError> {
    let response = client.get(url).send().await.map_err(|source| MediaError::Fetch {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MediaError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response.bytes().await.map_err(|source| MediaError::Fetch {
        url: url.to_string(),
        source,
    })?;
    tracing::debug!(url, bytes = bytes.len(), "Fetched media");
    Ok(bytes.to_vec())
}

impl MediaElement for RodioMedia {
    fn set_source(&mut self, url: &str) {
        let generation = self.shared.begin_load();
        tracing::debug!(url, generation, "Loading media source");

        let url = url.to_string();
        let client = self.client.clone();
        let shared = self.shared.clone();

        self.runtime.spawn(async move {
            let fetched = fetch_bytes(&client, &url).await;
            shared.finish_load(generation, &url, fetched);
        });
    }

    fn play(&mut self) {
        self.shared.restart_if_ended();
        self.shared.sink.play();
        if self.shared.paused.swap(false, Ordering::SeqCst) {
            self.shared.send(MediaEvent::Play);
        }
    }

    fn pause(&mut self) {
        self.shared.sink.pause();
        if !self.shared.paused.swap(true, Ordering::SeqCst) {
            self.shared.send(MediaEvent::Pause);
        }
    }

    fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::SeqCst)
    }

    fn current_time(&self) -> f64 {
        let source = lock(&self.shared.source);
        match source.as_ref() {
            None => 0.0,
            Some(loaded) if self.shared.ended.load(Ordering::SeqCst) => loaded.duration.unwrap_or(0.0),
            Some(_) => self.shared.sink.get_pos().as_secs_f64(),
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        let Some(duration) = lock(&self.shared.source).as_ref().map(|loaded| loaded.duration) else {
            return;
        };
        self.shared.restart_if_ended();

        let target = seek_target(seconds, duration);
        if let Err(e) = self.shared.sink.try_seek(Duration::from_secs_f64(target)) {
            tracing::warn!(error = %e, target, "Seek failed");
        }
    }

    fn duration(&self) -> Option<f64> {
        lock(&self.shared.source).as_ref().and_then(|loaded| loaded.duration)
    }

    fn set_volume(&mut self, volume: f32) {
        self.shared.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }
}

/// In-memory media element for controller tests.
#[cfg(test)]
pub mod fake {
    use super::*;

    #[derive(Debug, Default)]
    pub struct FakeState {
        pub sources: Vec<String>,
        pub generation: u64,
        pub paused: bool,
        pub current_time: f64,
        pub duration: Option<f64>,
        pub volume: f32,
    }

    pub struct FakeMedia {
        pub state: Arc<Mutex<FakeState>>,
        events: UnboundedSender<MediaEvent>,
    }

    impl FakeMedia {
        pub fn new(events: UnboundedSender<MediaEvent>) -> (Self, Arc<Mutex<FakeState>>) {
            let state = Arc::new(Mutex::new(FakeState {
                paused: true,
                volume: 1.0,
                ..Default::default()
            }));
            (Self { state: state.clone(), events }, state)
        }
    }

    impl MediaElement for FakeMedia {
        fn set_source(&mut self, url: &str) {
            let mut state = self.state.lock().unwrap();
            state.sources.push(url.to_string());
            state.generation += 1;
            state.paused = true;
            state.current_time = 0.0;
            state.duration = None;
        }

        fn play(&mut self) {
            let mut state = self.state.lock().unwrap();
            if state.paused {
                state.paused = false;
                self.events.send(MediaEvent::Play).unwrap();
            }
        }

        fn pause(&mut self) {
            let mut state = self.state.lock().unwrap();
            if !state.paused {
                state.paused = true;
                self.events.send(MediaEvent::Pause).unwrap();
            }
        }

        fn is_paused(&self) -> bool {
            self.state.lock().unwrap().paused
        }

        fn current_time(&self) -> f64 {
            self.state.lock().unwrap().current_time
        }

        fn set_current_time(&mut self, seconds: f64) {
            let mut state = self.state.lock().unwrap();
            let upper = state.duration.unwrap_or(0.0);
            state.current_time = seconds.clamp(0.0, upper);
        }

        fn duration(&self) -> Option<f64> {
            self.state.lock().unwrap().duration
        }

        fn set_volume(&mut self, volume: f32) {
            self.state.lock().unwrap().volume = volume;
        }

        fn generation(&self) -> u64 {
            self.state.lock().unwrap().generation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::JoinHandle;

    use rodio::queue::SourcesQueueOutput;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
    use tokio::sync::mpsc::error::TryRecvError;

    const RATE: u32 = 8_000;

    /// 16-bit mono PCM WAV of a short sawtooth.
    fn wav_bytes(seconds: f64) -> Vec<u8> {
        let frames = (f64::from(RATE) * seconds) as u32;
        let data_len = frames * 2;

        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&RATE.to_le_bytes());
        out.extend_from_slice(&(RATE * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for i in 0..frames {
            let sample = ((i % 64) as i16 - 32) * 256;
            out.extend_from_slice(&sample.to_le_bytes());
        }
        out
    }

    /// Pulls samples off an idle sink's queue, standing in for a device.
    struct Drain {
        stop: Arc<AtomicBool>,
        thread: Option<JoinHandle<()>>,
    }

    impl Drain {
        fn start(mut queue: SourcesQueueOutput<f32>) -> Self {
            let stop = Arc::new(AtomicBool::new(false));
            let flag = stop.clone();
            let thread = std::thread::spawn(move || {
                while !flag.load(Ordering::SeqCst) {
                    for _ in 0..256 {
                        queue.next();
                    }
                    std::thread::sleep(Duration::from_micros(200));
                }
            });
            Self { stop, thread: Some(thread) }
        }
    }

    impl Drop for Drain {
        fn drop(&mut self) {
            self.stop.store(true, Ordering::SeqCst);
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    struct Rig {
        media: RodioMedia,
        events: UnboundedReceiver<MediaEvent>,
        _drain: Drain,
    }

    impl Rig {
        fn new() -> Self {
            let (sink, queue) = Sink::new_idle();
            let (tx, events) = unbounded_channel();
            Self {
                media: RodioMedia::with_sink(sink, tx, Handle::current()),
                events,
                _drain: Drain::start(queue),
            }
        }

        /// Load `bytes` the way a finished fetch would.
        fn load(&mut self, bytes: Vec<u8>) -> u64 {
            let generation = self.media.shared.begin_load();
            self.media.shared.finish_load(generation, "mem://clip.wav", Ok(bytes));
            generation
        }

        async fn next_event(&mut self) -> MediaEvent {
            tokio::time::timeout(Duration::from_secs(5), self.events.recv())
                .await
                .expect("media event in time")
                .expect("event channel open")
        }
    }

    #[test]
    fn seek_target_stays_inside_source() {
        assert_eq!(seek_target(-3.0, Some(10.0)), 0.0);
        assert_eq!(seek_target(4.0, Some(10.0)), 4.0);
        assert_eq!(seek_target(30.0, Some(10.0)), 10.0);
        assert_eq!(seek_target(30.0, None), 30.0);
    }

    #[tokio::test]
    async fn superseded_load_is_discarded() {
        let mut rig = Rig::new();
        let stale = rig.media.shared.begin_load();
        let current = rig.media.shared.begin_load();
        assert_eq!(rig.media.generation(), current);

        rig.media.shared.finish_load(stale, "mem://old.wav", Ok(wav_bytes(0.5)));
        rig.media.shared.finish_load(
            stale,
            "mem://old.wav",
            Err(MediaError::Status {
                url: "mem://old.wav".to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        );
        assert_eq!(rig.events.try_recv(), Err(TryRecvError::Empty));
        assert!(lock(&rig.media.shared.source).is_none());

        rig.media.shared.finish_load(current, "mem://new.wav", Ok(wav_bytes(0.5)));
        assert!(matches!(rig.next_event().await, MediaEvent::CanPlay { .. }));
    }

    #[tokio::test]
    async fn undecodable_source_reports_error() {
        let mut rig = Rig::new();
        rig.load(b"definitely not audio".to_vec());

        match rig.next_event().await {
            MediaEvent::Error(message) => assert!(message.contains("could not decode")),
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(rig.media.duration(), None);
    }

    #[tokio::test]
    async fn play_and_pause_report_changes_only() {
        let mut rig = Rig::new();

        rig.media.play();
        rig.media.play();
        assert_eq!(rig.events.try_recv(), Ok(MediaEvent::Play));
        assert_eq!(rig.events.try_recv(), Err(TryRecvError::Empty));

        rig.media.pause();
        rig.media.pause();
        assert_eq!(rig.events.try_recv(), Ok(MediaEvent::Pause));
        assert_eq!(rig.events.try_recv(), Err(TryRecvError::Empty));
        assert!(rig.media.is_paused());
    }

    #[tokio::test]
    async fn end_of_source_pauses_then_ends() {
        let mut rig = Rig::new();
        let generation = rig.load(wav_bytes(0.2));
        assert!(matches!(rig.next_event().await, MediaEvent::CanPlay { .. }));

        rig.media.play();
        assert_eq!(rig.next_event().await, MediaEvent::Play);
        assert_eq!(rig.next_event().await, MediaEvent::Pause);
        assert_eq!(rig.next_event().await, MediaEvent::Ended { generation });
        assert!(rig.media.is_paused());
    }

    #[tokio::test]
    async fn play_after_end_starts_over() {
        let mut rig = Rig::new();
        let generation = rig.load(wav_bytes(0.2));
        rig.next_event().await;
        rig.media.play();
        rig.next_event().await;
        rig.next_event().await;
        assert_eq!(rig.next_event().await, MediaEvent::Ended { generation });

        rig.media.play();
        assert_eq!(rig.next_event().await, MediaEvent::Play);
        assert_eq!(rig.next_event().await, MediaEvent::Pause);
        assert_eq!(rig.next_event().await, MediaEvent::Ended { generation });
    }

    #[tokio::test]
    async fn seek_after_end_requeues_source() {
        let mut rig = Rig::new();
        let generation = rig.load(wav_bytes(0.2));
        rig.next_event().await;
        rig.media.play();
        rig.next_event().await;
        rig.next_event().await;
        rig.next_event().await;

        rig.media.set_current_time(0.0);
        assert!(rig.media.current_time() < 0.05);
        assert!(rig.media.is_paused());

        rig.media.play();
        assert_eq!(rig.next_event().await, MediaEvent::Play);
        assert_eq!(rig.next_event().await, MediaEvent::Pause);
        assert_eq!(rig.next_event().await, MediaEvent::Ended { generation });
    }

    #[tokio::test]
    async fn seek_clamps_below_zero() {
        let mut rig = Rig::new();
        rig.load(wav_bytes(1.0));
        rig.next_event().await;

        rig.media.set_current_time(0.5);
        assert!((rig.media.current_time() - 0.5).abs() < 0.05);

        rig.media.set_current_time(-3.0);
        assert!(rig.media.current_time() < 0.05);
    }

    #[tokio::test]
    async fn new_source_forgets_the_previous_one() {
        let mut rig = Rig::new();
        rig.load(wav_bytes(0.5));
        rig.next_event().await;
        rig.media.play();
        assert_eq!(rig.next_event().await, MediaEvent::Play);

        let generation = rig.media.shared.begin_load();
        assert!(rig.media.is_paused());
        assert_eq!(rig.media.duration(), None);
        assert_eq!(rig.media.current_time(), 0.0);
        assert_eq!(rig.media.generation(), generation);
    }
}
