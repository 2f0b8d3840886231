use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{MediaConstraints, MediaDevices, MediaError, MediaStream, MediaTrack, TrackKind};

#[derive(Debug, Default)]
struct ProbeState {
    enabled: AtomicBool,
    stops: AtomicUsize,
    level: AtomicU32,
}

/// Observer side of a [`StubTrack`], kept by whoever needs to inspect what the
/// session did to the track.
#[derive(Debug, Clone)]
pub struct TrackProbe {
    kind: TrackKind,
    state: Arc<ProbeState>,
}

impl TrackProbe {
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::Relaxed)
    }

    /// How many times `stop` actually released the track.
    pub fn stop_count(&self) -> usize {
        self.state.stops.load(Ordering::Relaxed)
    }

    pub fn set_level(&self, level: f32) {
        self.state.level.store(level.to_bits(), Ordering::Relaxed);
    }
}

/// In-memory track with no device behind it.
pub struct StubTrack {
    kind: TrackKind,
    label: String,
    live: bool,
    state: Arc<ProbeState>,
}

impl StubTrack {
    pub fn new(kind: TrackKind) -> (Self, TrackProbe) {
        let state = Arc::new(ProbeState::default());
        state.enabled.store(true, Ordering::Relaxed);
        let track = Self {
            kind,
            label: format!("stub {}", kind),
            live: true,
            state: state.clone(),
        };
        (track, TrackProbe { kind, state })
    }
}

impl MediaTrack for StubTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::Relaxed)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.state.enabled.store(enabled, Ordering::Relaxed);
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.state.stops.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn level(&self) -> f32 {
        f32::from_bits(self.state.level.load(Ordering::Relaxed))
    }
}

/// Media source for tests and headless runs: hands out [`StubTrack`]s, or
/// fails every request with a fixed error.
#[derive(Default)]
pub struct StubMediaDevices {
    failure: Option<MediaError>,
    probes: Mutex<Vec<TrackProbe>>,
}

impl StubMediaDevices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: MediaError) -> Self {
        Self {
            failure: Some(error),
            probes: Mutex::new(Vec::new()),
        }
    }

    /// Probes of every track handed out so far, in creation order.
    pub fn probes(&self) -> Vec<TrackProbe> {
        self.probes.lock().clone()
    }

    /// Build a stream synchronously, bypassing the async interface.
    pub fn open(&self, constraints: MediaConstraints) -> Result<MediaStream, MediaError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let mut tracks: Vec<Box<dyn MediaTrack>> = Vec::new();
        let mut probes = self.probes.lock();
        for (wanted, kind) in [
            (constraints.audio, TrackKind::Audio),
            (constraints.video, TrackKind::Video),
        ] {
            if wanted {
                let (track, probe) = StubTrack::new(kind);
                tracks.push(Box::new(track));
                probes.push(probe);
            }
        }
        Ok(MediaStream::new(tracks))
    }
}

#[async_trait]
impl MediaDevices for StubMediaDevices {
    async fn get_user_media(
        &self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, MediaError> {
        self.open(constraints)
    }
}
