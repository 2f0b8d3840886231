use serde::{Deserialize, Serialize};

use super::DateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    Call,
    FriendRequest,
    Reaction,
    System,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Message => "💬",
            Self::Call => "📹",
            Self::FriendRequest => "👤",
            Self::Reaction => "❤",
            Self::System => "🔔",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime,
    pub is_read: bool,
    pub sender: Option<String>,
}
