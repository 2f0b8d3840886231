use crate::models::{DateTime, Notification, NotificationKind};

/// Notification feed, newest first.
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new(items: Vec<Notification>) -> Self {
        let next_id = items.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        Self { items, next_id }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.is_read => {
                notification.is_read = true;
                true
            }
            _ => false,
        }
    }

    /// Returns how many notifications were unread.
    pub fn mark_all_read(&mut self) -> usize {
        let mut marked = 0;
        for notification in self.items.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            marked += 1;
        }
        marked
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    pub fn clear_all(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Add an unread notification on top of the feed.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        sender: Option<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.insert(
            0,
            Notification {
                id,
                kind,
                title: title.into(),
                message: message.into(),
                timestamp: DateTime::now(),
                is_read: false,
                sender,
            },
        );
        tracing::debug!(id, ?kind, "Notification pushed");
        id
    }
}
