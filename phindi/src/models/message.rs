use serde::{Deserialize, Serialize};

use super::{DateTime, MessageId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Contact,
}

/// Delivery stage of a self-sent message. Ordered: a status may only move to
/// a greater one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

impl DeliveryStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
        }
    }

    /// Check marks rendered next to the timestamp.
    pub fn ticks(&self) -> &'static str {
        match self {
            Self::Sent => "✓",
            Self::Delivered | Self::Read => "✓✓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Text(String),
}

impl MessageKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Text(_) => "text",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Text(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub kind: MessageKind,
    pub created_at: DateTime,
    status: Option<DeliveryStatus>,
}

impl Message {
    /// New self-sent message in the `Sent` stage.
    pub fn outgoing(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::Me,
            kind: MessageKind::Text(text.into()),
            created_at: DateTime::now(),
            status: Some(DeliveryStatus::Sent),
        }
    }

    /// New counterpart message. It never carries a delivery status.
    pub fn incoming(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::Contact,
            kind: MessageKind::Text(text.into()),
            created_at: DateTime::now(),
            status: None,
        }
    }

    pub fn at(mut self, created_at: DateTime) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn text(&self) -> &str {
        self.kind.content()
    }

    pub fn is_mine(&self) -> bool {
        self.sender == Sender::Me
    }

    pub fn status(&self) -> Option<DeliveryStatus> {
        self.status
    }

    /// Move the delivery status forward. Returns `false` and leaves the
    /// message untouched when it is not self-sent or `status` would not be
    /// an advance.
    pub fn advance_status(&mut self, status: DeliveryStatus) -> bool {
        match self.status {
            Some(current) if status > current => {
                self.status = Some(status);
                true
            }
            _ => false,
        }
    }
}
