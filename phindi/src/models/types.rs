use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(pub chrono::DateTime<chrono::Utc>);

impl DateTime {
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Wall-clock time `minutes` before now; used by seeded data.
    pub fn minutes_ago(minutes: i64) -> Self {
        Self(chrono::Utc::now() - chrono::Duration::minutes(minutes))
    }

    pub fn seconds_ago(seconds: i64) -> Self {
        Self(chrono::Utc::now() - chrono::Duration::seconds(seconds))
    }

    /// Local `HH:MM` rendering used under chat bubbles.
    pub fn format_clock(&self) -> String {
        self.0
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string()
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let micros = self.0.timestamp_micros();
        serializer.serialize_i64(micros)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let micros = i64::deserialize(deserializer)?;
        Ok(Self(
            chrono::DateTime::<chrono::Utc>::from_timestamp_micros(micros)
                .ok_or(Error::custom("cannot deserialize DateTime from micros"))?,
        ))
    }
}

/// Identifier of a seeded contact. Chat list entries, directory entries and
/// conversations share the same id space.
pub type ContactId = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presence shown next to avatars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Away,
    Busy,
    Offline,
}

impl Presence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Away => "Away",
            Self::Busy => "Busy",
            Self::Offline => "Offline",
        }
    }
}

/// Initials shown in an avatar placeholder: first letter of every word.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Relative "time ago" label: `Just now`, `5m ago`, `3h ago`, `2d ago`.
pub fn format_time_ago(then: DateTime, now: DateTime) -> String {
    let diff = now.0.signed_duration_since(then.0);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("  Mike   Chen "), "MC");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_format_time_ago_buckets() {
        let now = DateTime::now();
        let ago = |minutes: i64| DateTime(now.0 - chrono::Duration::minutes(minutes));
        assert_eq!(format_time_ago(now, now), "Just now");
        assert_eq!(format_time_ago(ago(5), now), "5m ago");
        assert_eq!(format_time_ago(ago(59), now), "59m ago");
        assert_eq!(format_time_ago(ago(60), now), "1h ago");
        assert_eq!(format_time_ago(ago(23 * 60 + 59), now), "23h ago");
        assert_eq!(format_time_ago(ago(48 * 60), now), "2d ago");
    }
}
