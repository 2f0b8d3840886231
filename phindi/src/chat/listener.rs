use crate::models::{ContactId, DeliveryStatus, Message, MessageId};

/// Observer of a [`Conversation`](super::Conversation). Called synchronously
/// while the conversation is advanced.
pub trait ChatListener: Send + Sync {
    fn on_status_changed(&self, contact_id: ContactId, message_id: MessageId, status: DeliveryStatus);

    fn on_incoming_message(&self, contact_id: ContactId, message: &Message);

    fn on_typing_changed(&self, contact_id: ContactId, typing: bool);
}

pub struct StubListener;

impl ChatListener for StubListener {
    fn on_status_changed(&self, contact_id: ContactId, message_id: MessageId, status: DeliveryStatus) {
        _ = contact_id;
        _ = message_id;
        _ = status;
    }

    fn on_incoming_message(&self, contact_id: ContactId, message: &Message) {
        _ = contact_id;
        _ = message;
    }

    fn on_typing_changed(&self, contact_id: ContactId, typing: bool) {
        _ = contact_id;
        _ = typing;
    }
}
