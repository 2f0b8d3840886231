use crate::models::{Contact, ContactId, DateTime, Presence, format_time_ago};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactFilter {
    #[default]
    All,
    Online,
    Starred,
}

impl ContactFilter {
    pub const ALL: [ContactFilter; 3] = [Self::All, Self::Online, Self::Starred];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Online => "Online",
            Self::Starred => "Starred",
        }
    }

    fn matches(&self, contact: &Contact) -> bool {
        match self {
            Self::All => true,
            Self::Online => contact.is_online(),
            Self::Starred => contact.starred,
        }
    }
}

/// Fields of the "Add contact" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,
    #[error("username is required")]
    MissingUsername,
    #[error("{0} is already in your contacts")]
    DuplicateUsername(String),
}

pub struct ContactDirectory {
    contacts: Vec<Contact>,
    next_id: ContactId,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        let next_id = contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self { contacts, next_id }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn online_count(&self) -> usize {
        self.contacts.iter().filter(|c| c.is_online()).count()
    }

    /// Contacts whose name or username contains `query` (case-insensitive)
    /// and that pass `filter`, in directory order.
    pub fn filtered(&self, query: &str, filter: ContactFilter) -> Vec<&Contact> {
        let query = query.trim().to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| {
                query.is_empty()
                    || contact.name.to_lowercase().contains(&query)
                    || contact.username.to_lowercase().contains(&query)
            })
            .filter(|contact| filter.matches(contact))
            .collect()
    }

    /// Flip the star of a contact, returning the new value.
    pub fn toggle_star(&mut self, id: ContactId) -> Option<bool> {
        let contact = self.contacts.iter_mut().find(|contact| contact.id == id)?;
        contact.starred = !contact.starred;
        Some(contact.starred)
    }

    pub fn add_contact(&mut self, new: NewContact) -> Result<ContactId, ContactError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        let username = new.username.trim().trim_start_matches('@');
        if username.is_empty() {
            return Err(ContactError::MissingUsername);
        }
        let username = format!("@{}", username);
        if self
            .contacts
            .iter()
            .any(|contact| contact.username.eq_ignore_ascii_case(&username))
        {
            return Err(ContactError::DuplicateUsername(username));
        }
        let email = new.email.trim();
        let id = self.next_id;
        self.next_id += 1;
        tracing::info!(id, %username, "Contact added");
        self.contacts.push(Contact {
            id,
            name: name.to_string(),
            username,
            avatar: String::new(),
            presence: Presence::Offline,
            last_seen: DateTime::now(),
            starred: false,
            phone: None,
            email: (!email.is_empty()).then(|| email.to_string()),
            bio: None,
            mutual_friends: None,
        });
        Ok(id)
    }
}

/// `Active now` for online contacts, otherwise how long ago they were seen.
pub fn format_last_seen(contact: &Contact, now: DateTime) -> String {
    if contact.is_online() {
        "Active now".to_string()
    } else {
        format_time_ago(contact.last_seen, now)
    }
}
