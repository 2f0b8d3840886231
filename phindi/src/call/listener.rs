use uuid::Uuid;

use crate::media::MediaError;

use super::CallStatus;

/// Observer of a [`CallSession`](super::CallSession). Called synchronously
/// from the thread that drives the session.
pub trait CallListener: Send + Sync {
    fn on_status_changed(&self, call_id: Uuid, status: CallStatus);
    fn on_duration_changed(&self, call_id: Uuid, seconds: u64);
    fn on_media_failed(&self, call_id: Uuid, error: &MediaError);
}

pub struct StubListener;

impl CallListener for StubListener {
    fn on_status_changed(&self, _call_id: Uuid, _status: CallStatus) {}
    fn on_duration_changed(&self, _call_id: Uuid, _seconds: u64) {}
    fn on_media_failed(&self, _call_id: Uuid, _error: &MediaError) {}
}
