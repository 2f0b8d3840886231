use serde::{Deserialize, Serialize};

use super::Presence;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub location: String,
    pub join_date: String,
    pub avatar: String,
    pub presence: Presence,
    pub verified: bool,
}

/// Activity counters shown on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub messages_sent: u32,
    pub voice_calls: u32,
    pub video_calls: u32,
}
