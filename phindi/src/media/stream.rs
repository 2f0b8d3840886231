use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// One live capture track. Disabling a track keeps the device open but stops
/// producing data; stopping releases the device for good.
pub trait MediaTrack: Send {
    fn kind(&self) -> TrackKind;

    fn label(&self) -> &str;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Release the underlying device. Calling it again has no effect.
    fn stop(&mut self);

    fn is_live(&self) -> bool;

    /// Current input level in `[0, 1]`. Tracks without a meter report 0.
    fn level(&self) -> f32 {
        0.0
    }
}

/// Requested track kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

impl MediaConstraints {
    pub fn audio_only() -> Self {
        Self {
            audio: true,
            video: false,
        }
    }

    pub fn audio_video() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }
}

pub struct MediaStream {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> impl Iterator<Item = &dyn MediaTrack> {
        self.tracks.iter().map(|track| track.as_ref())
    }

    pub fn has_track(&self, kind: TrackKind) -> bool {
        self.tracks.iter().any(|track| track.kind() == kind)
    }

    /// Enable or disable every track of `kind`. Returns how many tracks were
    /// touched.
    pub fn set_enabled(&mut self, kind: TrackKind, enabled: bool) -> usize {
        let mut touched = 0;
        for track in self.tracks.iter_mut().filter(|t| t.kind() == kind) {
            track.set_enabled(enabled);
            touched += 1;
        }
        touched
    }

    pub fn stop_all(&mut self) {
        for track in self.tracks.iter_mut() {
            track.stop();
        }
    }

    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(|track| track.is_live())
    }

    /// Loudest enabled audio track level.
    pub fn audio_level(&self) -> f32 {
        self.tracks
            .iter()
            .filter(|t| t.kind() == TrackKind::Audio && t.is_enabled() && t.is_live())
            .map(|t| t.level())
            .fold(0.0, f32::max)
    }
}

impl fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tracks.iter().map(|t| (t.kind(), t.label().to_string())))
            .finish()
    }
}
