use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use phindi::call::{CallKind, CallListener, CallSession, CallStatus, CallTimings};
use phindi::media::{MediaDevices, MediaError, MediaTrack as _, StubMediaDevices, TrackKind};
use phindi::models::Peer;
use uuid::Uuid;

#[derive(Default)]
struct RecordingListener {
    statuses: Mutex<Vec<CallStatus>>,
    durations: Mutex<Vec<u64>>,
    failures: Mutex<Vec<String>>,
}

impl CallListener for RecordingListener {
    fn on_status_changed(&self, _call_id: Uuid, status: CallStatus) {
        self.statuses.lock().push(status);
    }

    fn on_duration_changed(&self, _call_id: Uuid, seconds: u64) {
        self.durations.lock().push(seconds);
    }

    fn on_media_failed(&self, _call_id: Uuid, error: &MediaError) {
        self.failures.lock().push(error.to_string());
    }
}

fn peer() -> Peer {
    Peer::new("Sarah Johnson", "/avatars/sarah.jpg", "+1 (555) 123-4567")
}

fn start(kind: CallKind, now: Instant) -> (CallSession, Arc<RecordingListener>) {
    let listener = Arc::new(RecordingListener::default());
    let session = CallSession::with_listener(
        peer(),
        kind,
        CallTimings::default(),
        now,
        listener.clone(),
    );
    (session, listener)
}

fn secs(value: f64) -> Duration {
    Duration::from_secs_f64(value)
}

#[test]
fn test_status_follows_lifecycle_order() {
    let t0 = Instant::now();
    let (mut session, listener) = start(CallKind::Voice, t0);
    assert_eq!(session.status(), CallStatus::Connecting);
    assert_eq!(session.status_label(), "Connecting...");

    session.advance(t0 + secs(0.5));
    assert_eq!(session.status(), CallStatus::Connecting);

    session.advance(t0 + secs(1.0));
    assert_eq!(session.status(), CallStatus::Ringing);
    assert_eq!(session.status_label(), "Ringing...");

    session.advance(t0 + secs(3.0));
    assert_eq!(session.status(), CallStatus::Connected);
    assert_eq!(session.duration_secs(), 0);
    assert_eq!(session.status_label(), "00:00");

    assert_eq!(
        *listener.statuses.lock(),
        vec![CallStatus::Ringing, CallStatus::Connected]
    );
}

#[test]
fn test_late_advance_never_skips_ringing() {
    let t0 = Instant::now();
    let (mut session, listener) = start(CallKind::Voice, t0);
    // A single late tick fires both transitions, still in order.
    session.advance(t0 + secs(3.5));
    assert_eq!(session.status(), CallStatus::Connected);
    assert_eq!(
        *listener.statuses.lock(),
        vec![CallStatus::Ringing, CallStatus::Connected]
    );
}

#[test]
fn test_duration_counts_whole_seconds_while_connected() {
    let t0 = Instant::now();
    let (mut session, listener) = start(CallKind::Voice, t0);
    session.advance(t0 + secs(3.0));
    session.advance(t0 + secs(4.2));
    assert_eq!(session.duration_secs(), 1);
    session.advance(t0 + secs(8.0));
    assert_eq!(session.duration_secs(), 5);
    assert_eq!(session.duration_label(), "00:05");
    assert_eq!(*listener.durations.lock(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_duration_freezes_after_end() {
    let t0 = Instant::now();
    let (mut session, _listener) = start(CallKind::Voice, t0);
    session.advance(t0 + secs(6.0));
    assert_eq!(session.duration_secs(), 3);

    assert!(session.end());
    assert_eq!(session.status(), CallStatus::Ended);
    assert_eq!(session.pending_transitions(), 0);
    assert_eq!(session.status_label(), "Call ended");

    session.advance(t0 + secs(60.0));
    assert_eq!(session.duration_secs(), 3);
    assert_eq!(session.status(), CallStatus::Ended);
}

#[test]
fn test_end_before_connect_cancels_transitions() {
    let t0 = Instant::now();
    let (mut session, listener) = start(CallKind::Voice, t0);
    session.advance(t0 + secs(1.5));
    assert!(session.end());
    session.advance(t0 + secs(10.0));
    assert_eq!(session.status(), CallStatus::Ended);
    assert_eq!(session.duration_secs(), 0);
    assert_eq!(
        *listener.statuses.lock(),
        vec![CallStatus::Ringing, CallStatus::Ended]
    );
}

#[test]
fn test_end_is_idempotent() {
    let t0 = Instant::now();
    let (mut session, listener) = start(CallKind::Voice, t0);
    assert!(session.end());
    assert!(!session.end());
    assert_eq!(*listener.statuses.lock(), vec![CallStatus::Ended]);
}

#[test]
fn test_initial_toggle_state() {
    let t0 = Instant::now();
    let (voice, _) = start(CallKind::Voice, t0);
    assert!(voice.is_mic_on());
    assert!(!voice.is_video_on());
    assert!(!voice.is_speaker_on());

    let (video, _) = start(CallKind::Video, t0);
    assert!(video.is_mic_on());
    assert!(video.is_video_on());
}

#[test]
fn test_toggles_drive_track_enabled_state() {
    let t0 = Instant::now();
    let devices = StubMediaDevices::new();
    let (mut session, _listener) = start(CallKind::Video, t0);
    let stream = devices
        .open(session.media_constraints())
        .expect("stub media should open");
    assert!(session.attach_media(stream));

    let probes = devices.probes();
    let audio = probes
        .iter()
        .find(|probe| probe.kind() == TrackKind::Audio)
        .expect("audio track");
    let video = probes
        .iter()
        .find(|probe| probe.kind() == TrackKind::Video)
        .expect("video track");
    assert!(audio.is_enabled());
    assert!(video.is_enabled());
    assert!(session.has_video_preview());

    assert!(!session.toggle_mic());
    assert!(!audio.is_enabled());
    assert!(!session.toggle_video());
    assert!(!video.is_enabled());
    assert!(!session.has_video_preview());

    assert!(session.toggle_mic());
    assert!(audio.is_enabled());
    assert!(session.toggle_speaker());
    assert!(session.is_speaker_on());
}

#[test]
fn test_muted_before_media_applies_on_attach() {
    let t0 = Instant::now();
    let devices = StubMediaDevices::new();
    let (mut session, _listener) = start(CallKind::Voice, t0);
    session.toggle_mic();
    let stream = devices.open(session.media_constraints()).expect("stub media");
    session.attach_media(stream);
    let probes = devices.probes();
    assert_eq!(probes.len(), 1);
    assert!(!probes[0].is_enabled());
}

#[test]
fn test_audio_level_only_while_connected_and_unmuted() {
    let t0 = Instant::now();
    let devices = StubMediaDevices::new();
    let (mut session, _listener) = start(CallKind::Voice, t0);
    session.attach_media(devices.open(session.media_constraints()).expect("stub media"));
    devices.probes()[0].set_level(0.5);

    assert_eq!(session.audio_level(), 0.0);
    session.advance(t0 + secs(3.0));
    assert!(session.audio_level() > 0.0);
    session.toggle_mic();
    assert_eq!(session.audio_level(), 0.0);
}

#[test]
fn test_end_releases_media() {
    let t0 = Instant::now();
    let devices = StubMediaDevices::new();
    let (mut session, _listener) = start(CallKind::Video, t0);
    session.attach_media(devices.open(session.media_constraints()).expect("stub media"));
    assert!(session.has_media());

    session.end();
    assert!(!session.has_media());
    for probe in devices.probes() {
        assert_eq!(probe.stop_count(), 1, "{} track not stopped once", probe.kind());
    }
}

#[test]
fn test_media_arriving_after_end_is_stopped() {
    let t0 = Instant::now();
    let devices = StubMediaDevices::new();
    let (mut session, _listener) = start(CallKind::Voice, t0);
    session.end();
    let stream = devices.open(session.media_constraints()).expect("stub media");
    assert!(!session.attach_media(stream));
    assert!(!session.has_media());
    assert_eq!(devices.probes()[0].stop_count(), 1);
}

#[test]
fn test_drop_releases_media() {
    let t0 = Instant::now();
    let devices = StubMediaDevices::new();
    let (mut session, listener) = start(CallKind::Voice, t0);
    session.attach_media(devices.open(session.media_constraints()).expect("stub media"));
    drop(session);
    assert_eq!(devices.probes()[0].stop_count(), 1);
    assert_eq!(*listener.statuses.lock(), vec![CallStatus::Ended]);
}

#[tokio::test]
async fn test_media_failure_is_not_fatal() {
    let t0 = Instant::now();
    let devices = StubMediaDevices::failing(MediaError::PermissionDenied(TrackKind::Video));
    let (mut session, listener) = start(CallKind::Video, t0);

    let result = devices.get_user_media(session.media_constraints()).await;
    let error = result.expect_err("failing devices must fail");
    session.media_failed(error.clone());

    assert_eq!(session.media_error(), Some(&error));
    assert!(!session.has_video_preview());
    assert_eq!(listener.failures.lock().len(), 1);

    session.advance(t0 + secs(3.0));
    assert_eq!(session.status(), CallStatus::Connected);
}

#[test]
fn test_custom_timings() {
    let t0 = Instant::now();
    let listener = Arc::new(RecordingListener::default());
    let timings = CallTimings {
        ringing_after: Duration::from_millis(10),
        connected_after: Duration::from_millis(20),
        tick: Duration::from_millis(100),
    };
    let mut session =
        CallSession::with_listener(peer(), CallKind::Voice, timings, t0, listener.clone());
    session.advance(t0 + Duration::from_millis(320));
    assert_eq!(session.status(), CallStatus::Connected);
    assert_eq!(session.duration_secs(), 3);
}

#[test]
fn test_start_uses_default_timings() {
    let t0 = Instant::now();
    let mut session = CallSession::start(peer(), CallKind::Video, t0);
    assert_eq!(session.kind(), CallKind::Video);
    assert_eq!(session.peer().name, "Sarah Johnson");
    assert_eq!(session.pending_transitions(), 2);
    assert_eq!(session.next_due(), Some(t0 + secs(1.0)));
    assert_eq!(session.advance(t0 + secs(3.0)), 2);
    assert_eq!(session.status(), CallStatus::Connected);
}

#[test]
fn test_stub_stream_tracks_follow_constraints() {
    let devices = StubMediaDevices::new();
    let session = CallSession::start(peer(), CallKind::Voice, Instant::now());
    let stream = devices.open(session.media_constraints()).expect("stub media");
    let kinds: Vec<_> = stream.tracks().map(|track| track.kind()).collect();
    assert_eq!(kinds, vec![TrackKind::Audio]);
    assert!(stream.tracks().all(|track| track.label().starts_with("stub")));
}
