use serde::{Deserialize, Serialize};

use super::{ContactId, DateTime, Peer, Presence};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub username: String,
    pub avatar: String,
    pub presence: Presence,
    pub last_seen: DateTime,
    pub starred: bool,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub mutual_friends: Option<u32>,
}

impl Contact {
    pub fn is_online(&self) -> bool {
        self.presence == Presence::Online
    }

    /// Call peer identity for this contact.
    pub fn peer(&self) -> Peer {
        Peer::new(
            self.name.clone(),
            self.avatar.clone(),
            self.phone.clone().unwrap_or_default(),
        )
    }
}

/// Entry of the chat list sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub contact_id: ContactId,
    pub name: String,
    pub avatar: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
    pub online: bool,
    pub is_group: bool,
}
