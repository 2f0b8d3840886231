use std::time::Instant;

use crate::models::{ChatSummary, ContactId, Message, MessageId};

use super::Conversation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatFilter {
    #[default]
    All,
    Unread,
    Groups,
}

impl ChatFilter {
    pub const ALL: [ChatFilter; 3] = [Self::All, Self::Unread, Self::Groups];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unread => "Unread",
            Self::Groups => "Groups",
        }
    }

    pub fn matches(&self, summary: &ChatSummary) -> bool {
        match self {
            Self::All => true,
            Self::Unread => summary.unread > 0,
            Self::Groups => summary.is_group,
        }
    }
}

/// Message that arrived in a chat during [`Inbox::advance`].
#[derive(Debug, Clone)]
pub struct Arrival {
    pub contact_id: ContactId,
    pub sender_name: String,
    pub message: Message,
    /// Whether the chat was open when the message arrived.
    pub seen: bool,
}

struct InboxEntry {
    summary: ChatSummary,
    conversation: Conversation,
}

/// The chat list: one summary and one conversation per contact.
pub struct Inbox {
    entries: Vec<InboxEntry>,
    selected: Option<ContactId>,
}

impl Inbox {
    pub fn new(chats: Vec<(ChatSummary, Conversation)>) -> Self {
        let entries = chats
            .into_iter()
            .map(|(summary, conversation)| InboxEntry {
                summary,
                conversation,
            })
            .collect();
        Self {
            entries,
            selected: None,
        }
    }

    pub fn summaries(&self, filter: ChatFilter) -> Vec<&ChatSummary> {
        self.entries
            .iter()
            .map(|entry| &entry.summary)
            .filter(|summary| filter.matches(summary))
            .collect()
    }

    pub fn summary(&self, contact_id: ContactId) -> Option<&ChatSummary> {
        self.entry(contact_id).map(|entry| &entry.summary)
    }

    pub fn selected(&self) -> Option<ContactId> {
        self.selected
    }

    /// Open a chat and clear its unread badge.
    pub fn select(&mut self, contact_id: ContactId) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.summary.contact_id == contact_id)
        else {
            return false;
        };
        entry.summary.unread = 0;
        self.selected = Some(contact_id);
        true
    }

    pub fn conversation(&self, contact_id: ContactId) -> Option<&Conversation> {
        self.entry(contact_id).map(|entry| &entry.conversation)
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.selected.and_then(|id| self.conversation(id))
    }

    /// Send into the open chat.
    pub fn send(&mut self, text: &str, now: Instant) -> Option<MessageId> {
        let selected = self.selected?;
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.summary.contact_id == selected)?;
        let id = entry.conversation.send_message(text, now)?;
        if let Some(message) = entry.conversation.message(id) {
            entry.summary.last_message = message.text().to_string();
            entry.summary.timestamp = "now".to_string();
        }
        Some(id)
    }

    pub fn delete_message(&mut self, contact_id: ContactId, id: MessageId) -> bool {
        self.entries
            .iter_mut()
            .find(|entry| entry.summary.contact_id == contact_id)
            .is_some_and(|entry| entry.conversation.delete_message(id))
    }

    /// Advance every conversation. Replies landing in a chat that is not open
    /// bump its unread badge.
    pub fn advance(&mut self, now: Instant) -> Vec<Arrival> {
        let mut arrivals = Vec::new();
        for entry in self.entries.iter_mut() {
            let contact_id = entry.summary.contact_id;
            let seen = self.selected == Some(contact_id);
            for message in entry.conversation.advance(now) {
                entry.summary.last_message = message.text().to_string();
                entry.summary.timestamp = "now".to_string();
                if !seen {
                    entry.summary.unread += 1;
                }
                arrivals.push(Arrival {
                    contact_id,
                    sender_name: entry.summary.name.clone(),
                    message,
                    seen,
                });
            }
        }
        arrivals
    }

    pub fn unread_total(&self) -> u32 {
        self.entries.iter().map(|entry| entry.summary.unread).sum()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.entries
            .iter()
            .filter_map(|entry| entry.conversation.next_due())
            .min()
    }

    fn entry(&self, contact_id: ContactId) -> Option<&InboxEntry> {
        self.entries
            .iter()
            .find(|entry| entry.summary.contact_id == contact_id)
    }
}
