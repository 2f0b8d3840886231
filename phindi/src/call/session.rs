use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::media::{MediaConstraints, MediaError, MediaStream, TrackKind};
use crate::models::Peer;
use crate::schedule::Schedule;

use super::{CallListener, StubListener};

/// Lifecycle of an outgoing call. Variants are declared in lifecycle order,
/// so `Ord` tells whether one status comes after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CallStatus {
    Connecting,
    Ringing,
    Connected,
    Ended,
}

impl CallStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Ringing => "ringing",
            Self::Connected => "connected",
            Self::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Voice,
    Video,
}

impl CallKind {
    pub fn constraints(&self) -> MediaConstraints {
        match self {
            Self::Voice => MediaConstraints::audio_only(),
            Self::Video => MediaConstraints::audio_video(),
        }
    }
}

/// Delays driving the simulated call, measured from session creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTimings {
    pub ringing_after: Duration,
    pub connected_after: Duration,
    pub tick: Duration,
}

impl Default for CallTimings {
    fn default() -> Self {
        Self {
            ringing_after: Duration::from_secs(1),
            connected_after: Duration::from_secs(3),
            tick: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallEvent {
    Ring,
    Answer,
    Tick,
}

pub struct CallSession {
    id: Uuid,
    kind: CallKind,
    peer: Peer,
    status: CallStatus,
    duration_secs: u64,
    mic_on: bool,
    video_on: bool,
    speaker_on: bool,
    tick: Duration,
    schedule: Schedule<CallEvent>,
    media: Option<MediaStream>,
    media_error: Option<MediaError>,
    listener: Arc<dyn CallListener>,
}

impl CallSession {
    /// Open a session in `Connecting` with the default timings.
    pub fn start(peer: Peer, kind: CallKind, now: Instant) -> Self {
        Self::with_listener(
            peer,
            kind,
            CallTimings::default(),
            now,
            Arc::new(StubListener),
        )
    }

    pub fn with_listener(
        peer: Peer,
        kind: CallKind,
        timings: CallTimings,
        now: Instant,
        listener: Arc<dyn CallListener>,
    ) -> Self {
        let id = Uuid::now_v7();
        let mut schedule = Schedule::new();
        schedule.schedule(now + timings.ringing_after, CallEvent::Ring);
        schedule.schedule(now + timings.connected_after, CallEvent::Answer);
        tracing::info!(%id, peer = %peer.name, ?kind, "Call session started");
        Self {
            id,
            kind,
            peer,
            status: CallStatus::Connecting,
            duration_secs: 0,
            mic_on: true,
            video_on: kind == CallKind::Video,
            speaker_on: false,
            // A zero tick would make `advance` spin forever.
            tick: timings.tick.max(Duration::from_millis(1)),
            schedule,
            media: None,
            media_error: None,
            listener,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn is_mic_on(&self) -> bool {
        self.mic_on
    }

    pub fn is_video_on(&self) -> bool {
        self.video_on
    }

    pub fn is_speaker_on(&self) -> bool {
        self.speaker_on
    }

    pub fn is_ended(&self) -> bool {
        self.status == CallStatus::Ended
    }

    /// Number of transitions still waiting to fire.
    pub fn pending_transitions(&self) -> usize {
        self.schedule.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.schedule.next_due()
    }

    /// Fire every transition due at `now`, oldest first. Returns how many
    /// fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some((due, event)) = self.schedule.pop_due(now) {
            fired += 1;
            tracing::debug!(id = %self.id, ?event, "Call timer fired");
            match event {
                CallEvent::Ring => {
                    if self.status == CallStatus::Connecting {
                        self.set_status(CallStatus::Ringing);
                    }
                }
                CallEvent::Answer => {
                    // Never skip ringing, even with odd timings.
                    if self.status == CallStatus::Connecting {
                        self.set_status(CallStatus::Ringing);
                    }
                    if self.status == CallStatus::Ringing {
                        self.set_status(CallStatus::Connected);
                        self.schedule.schedule(due + self.tick, CallEvent::Tick);
                    }
                }
                CallEvent::Tick => {
                    if self.status == CallStatus::Connected {
                        self.duration_secs += 1;
                        self.listener
                            .on_duration_changed(self.id, self.duration_secs);
                        self.schedule.schedule(due + self.tick, CallEvent::Tick);
                    }
                }
            }
        }
        fired
    }

    /// Hang up. Cancels all pending transitions and releases media. Returns
    /// `false` if the call had already ended.
    pub fn end(&mut self) -> bool {
        if self.status == CallStatus::Ended {
            return false;
        }
        let cancelled = self.schedule.clear();
        self.set_status(CallStatus::Ended);
        self.release_media();
        tracing::info!(
            id = %self.id,
            duration = self.duration_secs,
            cancelled,
            "Call ended"
        );
        true
    }

    pub fn toggle_mic(&mut self) -> bool {
        self.mic_on = !self.mic_on;
        if let Some(media) = self.media.as_mut() {
            media.set_enabled(TrackKind::Audio, self.mic_on);
        }
        self.mic_on
    }

    pub fn toggle_video(&mut self) -> bool {
        self.video_on = !self.video_on;
        if let Some(media) = self.media.as_mut() {
            media.set_enabled(TrackKind::Video, self.video_on);
        }
        self.video_on
    }

    pub fn toggle_speaker(&mut self) -> bool {
        self.speaker_on = !self.speaker_on;
        self.speaker_on
    }

    /// Media this session should request from the devices.
    pub fn media_constraints(&self) -> MediaConstraints {
        self.kind.constraints()
    }

    /// Attach a freshly acquired stream. Track states follow the current
    /// mic/video flags. A stream arriving after the call ended is stopped
    /// right away and `false` is returned.
    pub fn attach_media(&mut self, mut stream: MediaStream) -> bool {
        if self.status == CallStatus::Ended {
            stream.stop_all();
            tracing::debug!(id = %self.id, "Media arrived after call ended, released");
            return false;
        }
        stream.set_enabled(TrackKind::Audio, self.mic_on);
        stream.set_enabled(TrackKind::Video, self.video_on);
        if let Some(mut previous) = self.media.replace(stream) {
            previous.stop_all();
        }
        self.media_error = None;
        true
    }

    /// Record a failed acquisition. The call carries on without a preview.
    pub fn media_failed(&mut self, error: MediaError) {
        tracing::warn!(id = %self.id, %error, "Local media unavailable");
        self.listener.on_media_failed(self.id, &error);
        self.media_error = Some(error);
    }

    pub fn media_error(&self) -> Option<&MediaError> {
        self.media_error.as_ref()
    }

    pub fn has_media(&self) -> bool {
        self.media.as_ref().is_some_and(|media| media.is_live())
    }

    /// Whether a live local camera preview should be shown.
    pub fn has_video_preview(&self) -> bool {
        self.video_on
            && self
                .media
                .as_ref()
                .is_some_and(|media| media.is_live() && media.has_track(TrackKind::Video))
    }

    /// Local microphone level while connected and unmuted.
    pub fn audio_level(&self) -> f32 {
        if self.status != CallStatus::Connected || !self.mic_on {
            return 0.0;
        }
        self.media
            .as_ref()
            .map(|media| media.audio_level())
            .unwrap_or(0.0)
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration_secs)
    }

    /// Badge text for the call card.
    pub fn status_label(&self) -> String {
        match self.status {
            CallStatus::Connecting => "Connecting...".to_string(),
            CallStatus::Ringing => "Ringing...".to_string(),
            CallStatus::Connected => self.duration_label(),
            CallStatus::Ended => "Call ended".to_string(),
        }
    }

    fn set_status(&mut self, status: CallStatus) {
        tracing::info!(id = %self.id, from = self.status.name(), to = status.name(), "Call status changed");
        self.status = status;
        self.listener.on_status_changed(self.id, status);
    }

    fn release_media(&mut self) {
        if let Some(mut media) = self.media.take() {
            media.stop_all();
            tracing::debug!(id = %self.id, "Local media released");
        }
    }
}

impl Drop for CallSession {
    fn drop(&mut self) {
        self.end();
    }
}

/// `MM:SS`; minutes keep counting past an hour.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(61), "01:01");
        assert_eq!(format_duration(3725), "62:05");
    }

    #[test]
    fn test_status_order() {
        assert!(CallStatus::Connecting < CallStatus::Ringing);
        assert!(CallStatus::Ringing < CallStatus::Connected);
        assert!(CallStatus::Connected < CallStatus::Ended);
    }
}
