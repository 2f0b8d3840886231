use serde::{Deserialize, Serialize};

/// Remote side of a call. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub name: String,
    pub avatar: String,
    pub phone: String,
}

impl Peer {
    pub fn new(
        name: impl Into<String>,
        avatar: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            phone: phone.into(),
        }
    }
}
