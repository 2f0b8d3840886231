use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use phindi::chat::{
    ChatFilter, ChatListener, ChatTimings, Conversation, ScriptedResponder, SilentResponder,
};
use phindi::models::{ContactId, DeliveryStatus, Message, MessageId, Sender};
use phindi::seed;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Status(MessageId, DeliveryStatus),
    Incoming(String),
    Typing(bool),
}

#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<Event>>,
}

impl ChatListener for RecordingListener {
    fn on_status_changed(&self, _contact_id: ContactId, message_id: MessageId, status: DeliveryStatus) {
        self.events.lock().push(Event::Status(message_id, status));
    }

    fn on_incoming_message(&self, _contact_id: ContactId, message: &Message) {
        self.events.lock().push(Event::Incoming(message.text().to_string()));
    }

    fn on_typing_changed(&self, _contact_id: ContactId, typing: bool) {
        self.events.lock().push(Event::Typing(typing));
    }
}

fn conversation() -> (Conversation, Arc<RecordingListener>) {
    let listener = Arc::new(RecordingListener::default());
    let conversation = Conversation::with_listener(
        1,
        ChatTimings::default(),
        Arc::new(ScriptedResponder::default()),
        listener.clone(),
    );
    (conversation, listener)
}

fn secs(value: f64) -> Duration {
    Duration::from_secs_f64(value)
}

#[test]
fn test_delivery_stages_and_reply() {
    let t0 = Instant::now();
    let (mut conversation, listener) = conversation();
    let id = conversation
        .send_message("Hello", t0)
        .expect("message should be sent");

    let sent = conversation.message(id).expect("sent message");
    assert_eq!(sent.sender, Sender::Me);
    assert_eq!(sent.status(), Some(DeliveryStatus::Sent));
    assert!(conversation.is_typing());

    conversation.advance(t0 + secs(1.5));
    assert_eq!(
        conversation.message(id).and_then(|m| m.status()),
        Some(DeliveryStatus::Delivered)
    );
    assert_eq!(conversation.messages().len(), 1);

    let received = conversation.advance(t0 + secs(3.1));
    assert_eq!(
        conversation.message(id).and_then(|m| m.status()),
        Some(DeliveryStatus::Read)
    );
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].text(), ScriptedResponder::DEFAULT_REPLY);
    assert_eq!(conversation.messages().len(), 2);
    assert!(!conversation.is_typing());
    assert_eq!(conversation.pending_transitions(), 0);

    assert_eq!(
        *listener.events.lock(),
        vec![
            Event::Typing(true),
            Event::Status(id, DeliveryStatus::Delivered),
            Event::Status(id, DeliveryStatus::Read),
            Event::Incoming(ScriptedResponder::DEFAULT_REPLY.to_string()),
            Event::Typing(false),
        ]
    );
}

#[test]
fn test_incoming_messages_have_no_status() {
    let t0 = Instant::now();
    let (mut conversation, _listener) = conversation();
    conversation.send_message("Hello", t0);
    let received = conversation.advance(t0 + secs(5.0));
    let reply = &received[0];
    assert_eq!(reply.sender, Sender::Contact);
    assert_eq!(reply.status(), None);
    assert!(!reply.is_mine());
}

#[test]
fn test_blank_text_is_ignored() {
    let t0 = Instant::now();
    let (mut conversation, listener) = conversation();
    assert_eq!(conversation.send_message("   ", t0), None);
    assert_eq!(conversation.send_message("", t0), None);
    assert!(conversation.messages().is_empty());
    assert_eq!(conversation.pending_transitions(), 0);
    assert!(listener.events.lock().is_empty());
}

#[test]
fn test_typing_resets_on_each_reply() {
    let t0 = Instant::now();
    let (mut conversation, listener) = conversation();
    conversation.send_message("one", t0);
    conversation.send_message("two", t0 + secs(1.0));
    assert!(conversation.is_typing());

    let received = conversation.advance(t0 + secs(3.1));
    assert_eq!(received.len(), 1);
    assert_eq!(conversation.messages().len(), 3);
    assert!(!conversation.is_typing());

    conversation.advance(t0 + secs(4.1));
    assert_eq!(conversation.messages().len(), 4);
    assert!(!conversation.is_typing());

    let typing: Vec<_> = listener
        .events
        .lock()
        .iter()
        .filter_map(|event| match event {
            Event::Typing(on) => Some(*on),
            _ => None,
        })
        .collect();
    assert_eq!(typing, vec![true, false]);

    conversation.send_message("three", t0 + secs(5.0));
    assert!(conversation.is_typing());
}

#[test]
fn test_delete_cancels_pending_status() {
    let t0 = Instant::now();
    let (mut conversation, listener) = conversation();
    let id = conversation.send_message("oops", t0).expect("sent");
    assert!(conversation.delete_message(id));
    assert!(conversation.message(id).is_none());

    conversation.advance(t0 + secs(5.0));
    let events = listener.events.lock();
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, Event::Status(target, _) if *target == id))
    );
    // The reply was already on its way.
    assert!(events.contains(&Event::Incoming(ScriptedResponder::DEFAULT_REPLY.to_string())));
}

#[test]
fn test_counterpart_messages_cannot_be_deleted() {
    let (mut conversation, _listener) = conversation();
    let id = conversation.push_incoming(Message::incoming("hi"));
    assert!(!conversation.delete_message(id));
    assert_eq!(conversation.messages().len(), 1);
}

#[test]
fn test_close_drops_pending_reply() {
    let t0 = Instant::now();
    let (mut conversation, _listener) = conversation();
    conversation.send_message("Hello", t0);
    conversation.close();
    assert!(!conversation.is_typing());
    assert!(conversation.advance(t0 + secs(10.0)).is_empty());
}

#[test]
fn test_silent_responder_never_types() {
    let t0 = Instant::now();
    let mut conversation = Conversation::with_listener(
        1,
        ChatTimings::default(),
        Arc::new(SilentResponder),
        Arc::new(RecordingListener::default()),
    );
    conversation.send_message("Hello", t0);
    assert!(!conversation.is_typing());
    assert_eq!(conversation.pending_transitions(), 2);
    assert!(conversation.advance(t0 + secs(5.0)).is_empty());
}

#[test]
fn test_seeded_inbox() {
    let inbox = seed::inbox(Arc::new(RecordingListener::default()));
    assert_eq!(inbox.selected(), Some(1));
    assert_eq!(inbox.summaries(ChatFilter::All).len(), 3);
    // Selecting the first chat cleared its badge.
    assert_eq!(inbox.summary(1).map(|s| s.unread), Some(0));
    assert_eq!(inbox.unread_total(), 1);
    assert_eq!(
        inbox
            .selected_conversation()
            .map(|c| c.messages().len()),
        Some(3)
    );
    assert!(inbox.summaries(ChatFilter::Groups).is_empty());
}

#[test]
fn test_inbox_filters_and_select() {
    let mut inbox = seed::inbox(Arc::new(RecordingListener::default()));
    let unread: Vec<_> = inbox
        .summaries(ChatFilter::Unread)
        .iter()
        .map(|s| s.contact_id)
        .collect();
    assert_eq!(unread, vec![3]);

    assert!(inbox.select(3));
    assert!(inbox.summaries(ChatFilter::Unread).is_empty());
    assert!(!inbox.select(42));
    assert_eq!(inbox.selected(), Some(3));
}

#[test]
fn test_inbox_send_updates_summary() {
    let t0 = Instant::now();
    let mut inbox = seed::inbox(Arc::new(RecordingListener::default()));
    inbox.send("See you soon", t0).expect("sent");
    let summary = inbox.summary(1).expect("summary");
    assert_eq!(summary.last_message, "See you soon");
    assert_eq!(summary.timestamp, "now");
}

#[test]
fn test_inbox_reply_in_background_chat_bumps_unread() {
    let t0 = Instant::now();
    let mut inbox = seed::inbox(Arc::new(RecordingListener::default()));
    inbox.select(2);
    inbox.send("Tomorrow works", t0);
    inbox.select(1);

    let arrivals = inbox.advance(t0 + secs(3.0));
    assert_eq!(arrivals.len(), 1);
    assert_eq!(arrivals[0].contact_id, 2);
    assert_eq!(arrivals[0].sender_name, "Mike Chen");
    assert!(!arrivals[0].seen);
    assert_eq!(inbox.summary(2).map(|s| s.unread), Some(1));
}

#[test]
fn test_inbox_reply_in_open_chat_is_seen() {
    let t0 = Instant::now();
    let mut inbox = seed::inbox(Arc::new(RecordingListener::default()));
    inbox.send("Hello", t0);
    let arrivals = inbox.advance(t0 + secs(3.0));
    assert_eq!(arrivals.len(), 1);
    assert!(arrivals[0].seen);
    assert_eq!(inbox.summary(1).map(|s| s.unread), Some(0));
    assert!(inbox.next_due().is_none());
}

#[test]
fn test_default_conversation_replies() {
    let t0 = Instant::now();
    let mut conversation = Conversation::new(7);
    assert_eq!(conversation.contact_id(), 7);
    assert!(conversation.last_message().is_none());
    conversation.send_message("ping", t0);
    conversation.advance(t0 + secs(3.0));
    let last = conversation.last_message().expect("reply");
    assert_eq!(last.text(), ScriptedResponder::DEFAULT_REPLY);
}
