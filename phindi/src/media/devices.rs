use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{MediaConstraints, MediaStream, TrackKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("no {0} device available")]
    NotFound(TrackKind),
    #[error("permission to use the {0} device was denied")]
    PermissionDenied(TrackKind),
    #[error("{0} capture is not supported on this platform")]
    Unsupported(TrackKind),
    #[error("device error: {0}")]
    Device(String),
}

/// Source of local capture streams.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn get_user_media(
        &self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, MediaError>;
}

/// Hands an acquired stream from an async task to the UI thread. The stream
/// can be taken exactly once.
#[derive(Clone)]
pub struct AcquiredStream(Arc<Mutex<Option<MediaStream>>>);

impl AcquiredStream {
    pub fn new(stream: MediaStream) -> Self {
        Self(Arc::new(Mutex::new(Some(stream))))
    }

    pub fn take(&self) -> Option<MediaStream> {
        self.0.lock().take()
    }
}

impl std::fmt::Debug for AcquiredStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AcquiredStream(<stream>)")
    }
}
