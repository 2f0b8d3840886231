use tokio::sync::mpsc;
use uuid::Uuid;

use crate::call::{CallListener, CallStatus};
use crate::chat::ChatListener;
use crate::media::MediaError;
use crate::models::{ContactId, DeliveryStatus, Message, MessageId};

#[derive(Clone, Debug)]
pub enum UiEvent {
    // Call events
    CallStatusChanged {
        call_id: Uuid,
        status: CallStatus,
    },
    CallDurationChanged {
        call_id: Uuid,
        seconds: u64,
    },
    CallMediaFailed {
        call_id: Uuid,
        error: String,
    },
    // Chat events
    MessageStatusChanged {
        contact_id: ContactId,
        message_id: MessageId,
        status: DeliveryStatus,
    },
    MessageReceived {
        contact_id: ContactId,
        message_id: MessageId,
        text: String,
    },
    TypingChanged {
        contact_id: ContactId,
        typing: bool,
    },
}

/// Forwards session callbacks into the UI event channel drained by the app
/// subscription.
pub struct UiEventListener {
    tx: mpsc::Sender<UiEvent>,
}

impl UiEventListener {
    pub fn new(tx: mpsc::Sender<UiEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: UiEvent, name: &'static str) {
        if let Err(err) = self.tx.try_send(event) {
            tracing::error!(?err, "Cannot send UI event: {}", name);
        }
    }
}

impl CallListener for UiEventListener {
    fn on_status_changed(&self, call_id: Uuid, status: CallStatus) {
        self.send(
            UiEvent::CallStatusChanged { call_id, status },
            "CallStatusChanged",
        );
    }

    fn on_duration_changed(&self, call_id: Uuid, seconds: u64) {
        self.send(
            UiEvent::CallDurationChanged { call_id, seconds },
            "CallDurationChanged",
        );
    }

    fn on_media_failed(&self, call_id: Uuid, error: &MediaError) {
        self.send(
            UiEvent::CallMediaFailed {
                call_id,
                error: error.to_string(),
            },
            "CallMediaFailed",
        );
    }
}

impl ChatListener for UiEventListener {
    fn on_status_changed(&self, contact_id: ContactId, message_id: MessageId, status: DeliveryStatus) {
        self.send(
            UiEvent::MessageStatusChanged {
                contact_id,
                message_id,
                status,
            },
            "MessageStatusChanged",
        );
    }

    fn on_incoming_message(&self, contact_id: ContactId, message: &Message) {
        self.send(
            UiEvent::MessageReceived {
                contact_id,
                message_id: message.id,
                text: message.text().to_string(),
            },
            "MessageReceived",
        );
    }

    fn on_typing_changed(&self, contact_id: ContactId, typing: bool) {
        self.send(
            UiEvent::TypingChanged { contact_id, typing },
            "TypingChanged",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwards_chat_events_in_order() {
        let (tx, mut rx) = mpsc::channel(8);
        let listener = UiEventListener::new(tx);
        let message = Message::incoming("hello");
        ChatListener::on_typing_changed(&listener, 1, true);
        ChatListener::on_incoming_message(&listener, 1, &message);
        match rx.try_recv() {
            Ok(UiEvent::TypingChanged { contact_id, typing }) => {
                assert_eq!(contact_id, 1);
                assert!(typing);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.try_recv() {
            Ok(UiEvent::MessageReceived { message_id, text, .. }) => {
                assert_eq!(message_id, message.id);
                assert_eq!(text, "hello");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_full_channel_is_logged() {
        let (tx, _rx) = mpsc::channel(1);
        let listener = UiEventListener::new(tx);
        let call_id = Uuid::now_v7();
        CallListener::on_status_changed(&listener, call_id, CallStatus::Ringing);
        CallListener::on_status_changed(&listener, call_id, CallStatus::Connected);
        assert!(logs_contain("Cannot send UI event: CallStatusChanged"));
    }
}
