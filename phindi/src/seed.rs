//! Built-in demo data. Nothing here is loaded from disk.

use std::sync::Arc;

use crate::call::Participant;
use crate::chat::{ChatListener, ChatTimings, Conversation, Inbox, Responder, ScriptedResponder};
use crate::models::{
    ChatSummary, Contact, DateTime, Message, Notification, NotificationKind, Peer, Presence,
    ProfileStats, UserProfile,
};

pub fn chat_summaries() -> Vec<ChatSummary> {
    let summary = |contact_id, name: &str, avatar: &str, last: &str, ts: &str, unread, online| {
        ChatSummary {
            contact_id,
            name: name.to_string(),
            avatar: avatar.to_string(),
            last_message: last.to_string(),
            timestamp: ts.to_string(),
            unread,
            online,
            is_group: false,
        }
    };
    vec![
        summary(
            1,
            "Sarah Johnson",
            "/avatars/sarah.jpg",
            "Hey! How are you doing today?",
            "2m ago",
            2,
            true,
        ),
        summary(
            2,
            "Mike Chen",
            "/avatars/mike.jpg",
            "Can we schedule a call for tomorrow?",
            "1h ago",
            0,
            true,
        ),
        summary(
            3,
            "Emily Davis",
            "/avatars/emily.jpg",
            "Thanks for your help!",
            "3h ago",
            1,
            false,
        ),
    ]
}

/// Opening transcript of the first chat.
pub fn initial_messages() -> Vec<Message> {
    vec![
        Message::incoming("Hey! How are you doing today?").at(DateTime::seconds_ago(120)),
        Message::outgoing("I'm doing great! Just working on some new projects. How about you?")
            .at(DateTime::seconds_ago(60)),
        Message::incoming("That sounds exciting! I'd love to hear more about it.")
            .at(DateTime::seconds_ago(30)),
    ]
}

/// Seeded inbox with the first chat selected.
pub fn inbox(listener: Arc<dyn ChatListener>) -> Inbox {
    let responder: Arc<dyn Responder> = Arc::new(ScriptedResponder::default());
    let chats = chat_summaries()
        .into_iter()
        .map(|summary| {
            let history = if summary.contact_id == 1 {
                initial_messages()
            } else {
                vec![Message::incoming(summary.last_message.clone()).at(DateTime::minutes_ago(60))]
            };
            let conversation = Conversation::with_listener(
                summary.contact_id,
                ChatTimings::default(),
                responder.clone(),
                listener.clone(),
            )
            .with_messages(history);
            (summary, conversation)
        })
        .collect();
    let mut inbox = Inbox::new(chats);
    inbox.select(1);
    inbox
}

pub fn contacts() -> Vec<Contact> {
    let contact = |id,
                   name: &str,
                   username: &str,
                   avatar: &str,
                   presence,
                   seen_minutes_ago,
                   starred,
                   phone: &str,
                   email: &str,
                   bio: &str,
                   mutual_friends| Contact {
        id,
        name: name.to_string(),
        username: username.to_string(),
        avatar: avatar.to_string(),
        presence,
        last_seen: DateTime::minutes_ago(seen_minutes_ago),
        starred,
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
        bio: Some(bio.to_string()),
        mutual_friends: Some(mutual_friends),
    };
    vec![
        contact(
            1,
            "Sarah Johnson",
            "@sarah.j",
            "/avatars/sarah.jpg",
            Presence::Online,
            0,
            true,
            "+1 (555) 123-4567",
            "sarah@example.com",
            "Product Designer at Tech Corp. Love creating beautiful experiences!",
            12,
        ),
        contact(
            2,
            "Mike Chen",
            "@mike.dev",
            "/avatars/mike.jpg",
            Presence::Away,
            15,
            false,
            "+1 (555) 987-6543",
            "mike@example.com",
            "Full-stack developer. Building the future, one line of code at a time.",
            8,
        ),
        contact(
            3,
            "Emily Davis",
            "@emily_d",
            "/avatars/emily.jpg",
            Presence::Busy,
            2 * 60,
            true,
            "+1 (555) 456-7890",
            "emily@example.com",
            "Marketing lead with a passion for growth and innovation.",
            15,
        ),
        contact(
            4,
            "Alex Thompson",
            "@alex.t",
            "/avatars/alex.jpg",
            Presence::Offline,
            24 * 60,
            false,
            "+1 (555) 321-0987",
            "alex@example.com",
            "Data scientist and AI enthusiast. Always exploring new possibilities.",
            6,
        ),
        contact(
            5,
            "Jessica Liu",
            "@jess.liu",
            "/avatars/jessica.jpg",
            Presence::Online,
            0,
            true,
            "+1 (555) 654-3210",
            "jessica@example.com",
            "UX researcher focused on human-centered design.",
            10,
        ),
        contact(
            6,
            "David Rodriguez",
            "@david.r",
            "/avatars/david.jpg",
            Presence::Away,
            45,
            false,
            "+1 (555) 789-0123",
            "david@example.com",
            "Project manager keeping teams aligned and projects on track.",
            9,
        ),
    ]
}

pub fn notifications() -> Vec<Notification> {
    let notification =
        |id, kind, title: &str, message: &str, minutes_ago, is_read, sender: Option<&str>| {
            Notification {
                id,
                kind,
                title: title.to_string(),
                message: message.to_string(),
                timestamp: DateTime::minutes_ago(minutes_ago),
                is_read,
                sender: sender.map(str::to_string),
            }
        };
    vec![
        notification(
            1,
            NotificationKind::Message,
            "New Message",
            "Sarah sent you a message: 'Hey! How are you doing?'",
            5,
            false,
            Some("Sarah Wilson"),
        ),
        notification(
            2,
            NotificationKind::Call,
            "Missed Call",
            "You missed a video call from Mike Chen",
            15,
            false,
            Some("Mike Chen"),
        ),
        notification(
            3,
            NotificationKind::FriendRequest,
            "Friend Request",
            "Emma Thompson wants to connect with you",
            30,
            true,
            Some("Emma Thompson"),
        ),
        notification(
            4,
            NotificationKind::Reaction,
            "Message Reaction",
            "Alex liked your message in Group Chat",
            60,
            true,
            Some("Alex Johnson"),
        ),
        notification(
            5,
            NotificationKind::System,
            "System Update",
            "Phindi has been updated with new features and improvements",
            2 * 60,
            true,
            None,
        ),
    ]
}

pub fn user_profile() -> UserProfile {
    UserProfile {
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        bio: "Software developer passionate about creating amazing communication experiences. \
              Love connecting with people around the world."
            .to_string(),
        location: "San Francisco, CA".to_string(),
        join_date: "January 2024".to_string(),
        avatar: String::new(),
        presence: Presence::Online,
        verified: true,
    }
}

pub fn profile_stats() -> ProfileStats {
    ProfileStats {
        messages_sent: 1234,
        voice_calls: 89,
        video_calls: 156,
    }
}

/// Counterpart of the simulated calls.
pub fn call_peer() -> Peer {
    Peer::new("Sarah Johnson", "/avatars/sarah.jpg", "+1 (555) 123-4567")
}

pub fn video_participants() -> Vec<Participant> {
    let participant = |name: &str, avatar: &str, is_muted, is_video_off, is_host| Participant {
        name: name.to_string(),
        avatar: avatar.to_string(),
        is_muted,
        is_video_off,
        is_host,
    };
    vec![
        participant("Sarah Johnson", "/avatars/sarah.jpg", false, false, true),
        participant("Mike Chen", "/avatars/mike.jpg", true, false, false),
        participant("Emily Davis", "/avatars/emily.jpg", false, true, false),
    ]
}
