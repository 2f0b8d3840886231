use phindi::contact::{ContactDirectory, ContactError, ContactFilter, NewContact, format_last_seen};
use phindi::models::{DateTime, NotificationKind};
use phindi::notification::NotificationCenter;
use phindi::profile::{ProfileEditor, ProfileError, ProfileField};
use phindi::seed;

fn new_contact(name: &str, username: &str, email: &str) -> NewContact {
    NewContact {
        name: name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn test_contact_search_and_filters() {
    let directory = ContactDirectory::new(seed::contacts());
    assert_eq!(directory.len(), 6);
    assert_eq!(directory.online_count(), 2);

    let names: Vec<_> = directory
        .filtered("", ContactFilter::Online)
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sarah Johnson", "Jessica Liu"]);

    let starred = directory.filtered("", ContactFilter::Starred);
    assert_eq!(starred.len(), 3);

    let found = directory.filtered("  MIKE ", ContactFilter::All);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 2);

    let by_username = directory.filtered("jess.liu", ContactFilter::All);
    assert_eq!(by_username.len(), 1);

    assert!(directory.filtered("mike", ContactFilter::Starred).is_empty());
}

#[test]
fn test_toggle_star() {
    let mut directory = ContactDirectory::new(seed::contacts());
    assert_eq!(directory.toggle_star(2), Some(true));
    assert_eq!(directory.filtered("", ContactFilter::Starred).len(), 4);
    assert_eq!(directory.toggle_star(2), Some(false));
    assert_eq!(directory.toggle_star(99), None);
}

#[test]
fn test_add_contact() {
    let mut directory = ContactDirectory::new(seed::contacts());
    let id = directory
        .add_contact(new_contact(" Nina Park ", "nina", ""))
        .expect("contact added");
    assert_eq!(id, 7);
    let contact = directory.get(id).expect("new contact");
    assert_eq!(contact.name, "Nina Park");
    assert_eq!(contact.username, "@nina");
    assert_eq!(contact.email, None);
    assert!(!contact.is_online());
}

#[test]
fn test_add_contact_validation() {
    let mut directory = ContactDirectory::new(seed::contacts());
    assert_eq!(
        directory.add_contact(new_contact("  ", "someone", "")),
        Err(ContactError::MissingName)
    );
    assert_eq!(
        directory.add_contact(new_contact("Someone", "@", "")),
        Err(ContactError::MissingUsername)
    );
    assert_eq!(
        directory.add_contact(new_contact("Mike", "@Mike.Dev", "")),
        Err(ContactError::DuplicateUsername("@Mike.Dev".to_string()))
    );
    assert_eq!(directory.len(), 6);
}

#[test]
fn test_last_seen_label() {
    let directory = ContactDirectory::new(seed::contacts());
    let now = DateTime::now();
    let online = directory.get(1).expect("sarah");
    assert_eq!(format_last_seen(online, now), "Active now");
    let away = directory.get(2).expect("mike");
    assert_ne!(format_last_seen(away, now), "Active now");
}

#[test]
fn test_contact_peer() {
    let directory = ContactDirectory::new(seed::contacts());
    let peer = directory.get(3).expect("emily").peer();
    assert_eq!(peer.name, "Emily Davis");
    assert_eq!(peer.phone, "+1 (555) 456-7890");
}

#[test]
fn test_notification_feed() {
    let mut center = NotificationCenter::new(seed::notifications());
    assert_eq!(center.len(), 5);
    assert_eq!(center.unread_count(), 2);

    assert!(center.mark_read(1));
    assert!(!center.mark_read(1));
    assert!(!center.mark_read(42));
    assert_eq!(center.unread_count(), 1);

    assert_eq!(center.mark_all_read(), 1);
    assert_eq!(center.unread_count(), 0);

    assert!(center.delete(3));
    assert!(!center.delete(3));
    assert_eq!(center.len(), 4);

    assert_eq!(center.clear_all(), 4);
    assert!(center.is_empty());
}

#[test]
fn test_pushed_notification_goes_on_top() {
    let mut center = NotificationCenter::new(seed::notifications());
    let id = center.push(
        NotificationKind::Message,
        "New Message",
        "Sarah Johnson sent you a message: 'Hi'",
        Some("Sarah Johnson".to_string()),
    );
    assert_eq!(id, 6);
    assert_eq!(center.items()[0].id, id);
    assert!(!center.items()[0].is_read);
    assert_eq!(center.unread_count(), 3);
}

#[test]
fn test_profile_edit_and_save() {
    let mut editor = ProfileEditor::new(seed::user_profile());
    assert!(!editor.set_field(ProfileField::Name, "Ignored".to_string()));
    assert_eq!(editor.save().err(), Some(ProfileError::NotEditing));

    editor.begin_edit();
    assert!(editor.set_field(ProfileField::Location, "Berlin".to_string()));
    assert_eq!(editor.profile().location, "San Francisco, CA");
    assert_eq!(editor.draft().map(|d| d.location.as_str()), Some("Berlin"));

    let saved = editor.save().expect("saved");
    assert_eq!(saved.location, "Berlin");
    assert!(!editor.is_editing());
}

#[test]
fn test_profile_rejects_empty_name_and_cancel_discards() {
    let mut editor = ProfileEditor::new(seed::user_profile());
    editor.begin_edit();
    editor.set_field(ProfileField::Name, "   ".to_string());
    assert_eq!(editor.save().err(), Some(ProfileError::EmptyName));
    assert!(editor.is_editing());

    editor.cancel();
    assert!(!editor.is_editing());
    assert_eq!(editor.profile().name, "John Doe");
}
