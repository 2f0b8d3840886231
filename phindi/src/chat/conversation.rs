use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::{ContactId, DeliveryStatus, Message, MessageId};
use crate::schedule::Schedule;

use super::{ChatListener, Responder, ScriptedResponder, StubListener};

/// Delays applied to every sent message, measured from the send instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatTimings {
    pub delivered_after: Duration,
    pub read_after: Duration,
    pub reply_after: Duration,
}

impl Default for ChatTimings {
    fn default() -> Self {
        Self {
            delivered_after: Duration::from_secs(1),
            read_after: Duration::from_secs(2),
            reply_after: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatEvent {
    Status(MessageId, DeliveryStatus),
    Reply(String),
}

impl ChatEvent {
    fn targets(&self, id: MessageId) -> bool {
        matches!(self, Self::Status(target, _) if *target == id)
    }
}

/// Transcript with one contact plus its pending simulated transitions.
pub struct Conversation {
    contact_id: ContactId,
    messages: Vec<Message>,
    schedule: Schedule<ChatEvent>,
    typing: bool,
    timings: ChatTimings,
    responder: Arc<dyn Responder>,
    listener: Arc<dyn ChatListener>,
}

impl Conversation {
    pub fn new(contact_id: ContactId) -> Self {
        Self::with_listener(
            contact_id,
            ChatTimings::default(),
            Arc::new(ScriptedResponder::default()),
            Arc::new(StubListener),
        )
    }

    pub fn with_listener(
        contact_id: ContactId,
        timings: ChatTimings,
        responder: Arc<dyn Responder>,
        listener: Arc<dyn ChatListener>,
    ) -> Self {
        Self {
            contact_id,
            messages: Vec::new(),
            schedule: Schedule::new(),
            typing: false,
            timings,
            responder,
            listener,
        }
    }

    /// Seed the transcript with history.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether the counterpart is "typing" a simulated reply.
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn pending_transitions(&self) -> usize {
        self.schedule.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.schedule.next_due()
    }

    /// Append a self-sent message in the `Sent` stage and schedule its
    /// delivery, its read receipt and the counterpart reply. Blank text is
    /// ignored.
    pub fn send_message(&mut self, text: &str, now: Instant) -> Option<MessageId> {
        if text.trim().is_empty() {
            return None;
        }
        let message = Message::outgoing(text);
        let id = message.id;
        self.messages.push(message);
        self.schedule.schedule(
            now + self.timings.delivered_after,
            ChatEvent::Status(id, DeliveryStatus::Delivered),
        );
        self.schedule.schedule(
            now + self.timings.read_after,
            ChatEvent::Status(id, DeliveryStatus::Read),
        );
        if let Some(reply) = self.responder.reply_to(text) {
            self.schedule
                .schedule(now + self.timings.reply_after, ChatEvent::Reply(reply));
            self.set_typing(true);
        }
        tracing::debug!(contact_id = self.contact_id, %id, "Message sent");
        Some(id)
    }

    /// Append a counterpart message right away.
    pub fn push_incoming(&mut self, message: Message) -> MessageId {
        let id = message.id;
        self.listener.on_incoming_message(self.contact_id, &message);
        self.messages.push(message);
        id
    }

    /// Fire every transition due at `now`. Returns the counterpart messages
    /// that arrived.
    pub fn advance(&mut self, now: Instant) -> Vec<Message> {
        let mut received = Vec::new();
        while let Some((_, event)) = self.schedule.pop_due(now) {
            match event {
                ChatEvent::Status(id, status) => self.update_status(id, status),
                ChatEvent::Reply(text) => {
                    let message = Message::incoming(text);
                    self.push_incoming(message.clone());
                    received.push(message);
                    self.set_typing(false);
                }
            }
        }
        received
    }

    /// Remove one of the user's own messages and cancel its pending status
    /// transitions. Counterpart messages cannot be deleted.
    pub fn delete_message(&mut self, id: MessageId) -> bool {
        let Some(index) = self
            .messages
            .iter()
            .position(|message| message.id == id && message.is_mine())
        else {
            return false;
        };
        self.messages.remove(index);
        let cancelled = self.schedule.cancel_where(|event| event.targets(id));
        tracing::debug!(contact_id = self.contact_id, %id, cancelled, "Message deleted");
        true
    }

    /// Drop every pending transition, including simulated replies.
    pub fn close(&mut self) {
        let cancelled = self.schedule.clear();
        self.set_typing(false);
        if cancelled > 0 {
            tracing::debug!(contact_id = self.contact_id, cancelled, "Conversation closed");
        }
    }

    fn update_status(&mut self, id: MessageId, status: DeliveryStatus) {
        let Some(message) = self.messages.iter_mut().find(|message| message.id == id) else {
            return;
        };
        if message.advance_status(status) {
            tracing::debug!(contact_id = self.contact_id, %id, status = status.name(), "Delivery status changed");
            self.listener.on_status_changed(self.contact_id, id, status);
        }
    }

    fn set_typing(&mut self, typing: bool) {
        if self.typing != typing {
            self.typing = typing;
            self.listener.on_typing_changed(self.contact_id, typing);
        }
    }
}
