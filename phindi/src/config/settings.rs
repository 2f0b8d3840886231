use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::appearance::ThemeMode;
use crate::models::NotificationKind;

pub const MICROPHONES: [&str; 3] = [
    "Default Microphone",
    "Built-in Microphone",
    "External Microphone",
];

pub const SPEAKERS: [&str; 3] = ["Default Speaker", "Built-in Speakers", "Headphones"];

pub const CAMERAS: [&str; 3] = ["Default Camera", "Built-in Camera", "External Camera"];

/// Language codes with their display names.
pub const LANGUAGES: [(&str, &str); 4] = [
    ("en-US", "English (US)"),
    ("es-ES", "Español"),
    ("fr-FR", "Français"),
    ("de-DE", "Deutsch"),
];

/// All user preferences. Immutable: changes go through [`Settings::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub profile: ProfileSettings,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    pub audio: AudioSettings,
    pub video: VideoSettings,
    pub general: GeneralSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSettings {
    pub name: String,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub phone: String,
    pub avatar: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            username: "@johndoe".to_string(),
            email: "john@example.com".to_string(),
            bio: "Building amazing things with technology.".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            avatar: "/avatars/user.jpg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub push_notifications: bool,
    pub email_notifications: bool,
    pub message_notifications: bool,
    pub call_notifications: bool,
    pub group_notifications: bool,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
    pub do_not_disturb_mode: bool,
    pub quiet_hours: QuietHours,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            push_notifications: true,
            email_notifications: true,
            message_notifications: true,
            call_notifications: true,
            group_notifications: true,
            sound_enabled: true,
            vibration_enabled: true,
            do_not_disturb_mode: false,
            quiet_hours: QuietHours::default(),
        }
    }
}

impl NotificationSettings {
    /// Whether a notification of `kind` may be raised at local time `now`.
    pub fn allows(&self, kind: NotificationKind, now: NaiveTime) -> bool {
        if !self.push_notifications || self.do_not_disturb_mode || self.quiet_hours.contains(now) {
            return false;
        }
        match kind {
            NotificationKind::Message => self.message_notifications,
            NotificationKind::Call => self.call_notifications,
            NotificationKind::FriendRequest
            | NotificationKind::Reaction
            | NotificationKind::System => true,
        }
    }

    /// Message notification for a direct or group chat.
    pub fn allows_chat(&self, is_group: bool, now: NaiveTime) -> bool {
        self.allows(NotificationKind::Message, now) && (!is_group || self.group_notifications)
    }
}

/// Daily `HH:MM` window during which nothing is raised. `start > end` wraps
/// past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuietHours {
    pub enabled: bool,
    pub start: String,
    pub end: String,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start: "22:00".to_string(),
            end: "08:00".to_string(),
        }
    }
}

impl QuietHours {
    pub fn contains(&self, now: NaiveTime) -> bool {
        if !self.enabled {
            return false;
        }
        let (Some(start), Some(end)) = (parse_clock(&self.start), parse_clock(&self.end)) else {
            tracing::warn!(start = %self.start, end = %self.end, "Invalid quiet hours, ignoring");
            return false;
        };
        if start <= end {
            start <= now && now < end
        } else {
            now >= start || now < end
        }
    }
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Everyone,
    Contacts,
    Nobody,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Self::Everyone, Self::Contacts, Self::Nobody];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Everyone => "Everyone",
            Self::Contacts => "My Contacts",
            Self::Nobody => "Nobody",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub online_status: bool,
    pub last_seen: bool,
    pub read_receipts: bool,
    pub profile_photo_visibility: Visibility,
    pub who_can_call_me: Visibility,
    pub who_can_message_me: Visibility,
    pub blocked_users: Vec<String>,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            online_status: true,
            last_seen: true,
            read_receipts: true,
            profile_photo_visibility: Visibility::Everyone,
            who_can_call_me: Visibility::Everyone,
            who_can_message_me: Visibility::Everyone,
            blocked_users: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioSettings {
    #[serde(with = "slider")]
    pub microphone_volume: u8,
    #[serde(with = "slider")]
    pub speaker_volume: u8,
    pub echo_cancellation: bool,
    pub noise_suppression: bool,
    pub automatic_gain_control: bool,
    pub default_microphone: String,
    pub default_speaker: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            microphone_volume: 80,
            speaker_volume: 70,
            echo_cancellation: true,
            noise_suppression: true,
            automatic_gain_control: true,
            default_microphone: MICROPHONES[0].to_string(),
            default_speaker: SPEAKERS[0].to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraQuality {
    #[serde(rename = "720p")]
    Hd,
    #[default]
    #[serde(rename = "1080p")]
    FullHd,
    #[serde(rename = "4k")]
    UltraHd,
}

impl CameraQuality {
    pub const ALL: [CameraQuality; 3] = [Self::Hd, Self::FullHd, Self::UltraHd];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hd => "720p (HD)",
            Self::FullHd => "1080p (Full HD)",
            Self::UltraHd => "4K (Ultra HD)",
        }
    }
}

impl std::fmt::Display for CameraQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSettings {
    pub camera_quality: CameraQuality,
    pub default_camera: String,
    pub background_blur: bool,
    pub virtual_background: bool,
    pub mirror_video: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            camera_quality: CameraQuality::FullHd,
            default_camera: CAMERAS[0].to_string(),
            background_blur: false,
            virtual_background: false,
            mirror_video: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [Self::Small, Self::Medium, Self::Large];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    /// Base text size in points.
    pub fn points(&self) -> u16 {
        match self {
            Self::Small => 13,
            Self::Medium => 14,
            Self::Large => 16,
        }
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataUsage {
    Low,
    #[default]
    Medium,
    High,
}

impl DataUsage {
    pub const ALL: [DataUsage; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low (Save data)",
            Self::Medium => "Medium (Balanced)",
            Self::High => "High (Best quality)",
        }
    }
}

impl std::fmt::Display for DataUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub language: String,
    pub theme: ThemeMode,
    pub font_size: FontSize,
    pub auto_start: bool,
    pub minimize_to_tray: bool,
    pub close_to_tray: bool,
    pub data_usage: DataUsage,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            theme: ThemeMode::System,
            font_size: FontSize::Medium,
            auto_start: false,
            minimize_to_tray: true,
            close_to_tray: false,
            data_usage: DataUsage::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsUpdate {
    Profile(ProfileUpdate),
    Notifications(NotificationsUpdate),
    Privacy(PrivacyUpdate),
    Audio(AudioUpdate),
    Video(VideoUpdate),
    General(GeneralUpdate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdate {
    Name(String),
    Username(String),
    Email(String),
    Bio(String),
    Phone(String),
    Avatar(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationsUpdate {
    Push(bool),
    Email(bool),
    Message(bool),
    Call(bool),
    Group(bool),
    Sound(bool),
    Vibration(bool),
    DoNotDisturb(bool),
    QuietHoursEnabled(bool),
    QuietHoursStart(String),
    QuietHoursEnd(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivacyUpdate {
    OnlineStatus(bool),
    LastSeen(bool),
    ReadReceipts(bool),
    ProfilePhotoVisibility(Visibility),
    WhoCanCallMe(Visibility),
    WhoCanMessageMe(Visibility),
    BlockUser(String),
    UnblockUser(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioUpdate {
    MicrophoneVolume(u8),
    SpeakerVolume(u8),
    EchoCancellation(bool),
    NoiseSuppression(bool),
    AutomaticGainControl(bool),
    DefaultMicrophone(String),
    DefaultSpeaker(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoUpdate {
    CameraQuality(CameraQuality),
    DefaultCamera(String),
    BackgroundBlur(bool),
    VirtualBackground(bool),
    MirrorVideo(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralUpdate {
    Language(String),
    Theme(ThemeMode),
    FontSize(FontSize),
    AutoStart(bool),
    MinimizeToTray(bool),
    CloseToTray(bool),
    DataUsage(DataUsage),
}

impl Settings {
    /// Parse a stored blob. Anything unparsable yields the defaults.
    pub fn from_json_or_default(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(%err, "Malformed stored settings, falling back to defaults");
                Self::default()
            }
        }
    }

    /// Copy of these settings with `update` applied.
    pub fn apply(&self, update: SettingsUpdate) -> Self {
        let mut next = self.clone();
        match update {
            SettingsUpdate::Profile(update) => {
                let profile = &mut next.profile;
                match update {
                    ProfileUpdate::Name(v) => profile.name = v,
                    ProfileUpdate::Username(v) => profile.username = v,
                    ProfileUpdate::Email(v) => profile.email = v,
                    ProfileUpdate::Bio(v) => profile.bio = v,
                    ProfileUpdate::Phone(v) => profile.phone = v,
                    ProfileUpdate::Avatar(v) => profile.avatar = v,
                }
            }
            SettingsUpdate::Notifications(update) => {
                let notifications = &mut next.notifications;
                match update {
                    NotificationsUpdate::Push(v) => notifications.push_notifications = v,
                    NotificationsUpdate::Email(v) => notifications.email_notifications = v,
                    NotificationsUpdate::Message(v) => notifications.message_notifications = v,
                    NotificationsUpdate::Call(v) => notifications.call_notifications = v,
                    NotificationsUpdate::Group(v) => notifications.group_notifications = v,
                    NotificationsUpdate::Sound(v) => notifications.sound_enabled = v,
                    NotificationsUpdate::Vibration(v) => notifications.vibration_enabled = v,
                    NotificationsUpdate::DoNotDisturb(v) => notifications.do_not_disturb_mode = v,
                    NotificationsUpdate::QuietHoursEnabled(v) => notifications.quiet_hours.enabled = v,
                    NotificationsUpdate::QuietHoursStart(v) => notifications.quiet_hours.start = v,
                    NotificationsUpdate::QuietHoursEnd(v) => notifications.quiet_hours.end = v,
                }
            }
            SettingsUpdate::Privacy(update) => {
                let privacy = &mut next.privacy;
                match update {
                    PrivacyUpdate::OnlineStatus(v) => privacy.online_status = v,
                    PrivacyUpdate::LastSeen(v) => privacy.last_seen = v,
                    PrivacyUpdate::ReadReceipts(v) => privacy.read_receipts = v,
                    PrivacyUpdate::ProfilePhotoVisibility(v) => privacy.profile_photo_visibility = v,
                    PrivacyUpdate::WhoCanCallMe(v) => privacy.who_can_call_me = v,
                    PrivacyUpdate::WhoCanMessageMe(v) => privacy.who_can_message_me = v,
                    PrivacyUpdate::BlockUser(user) => {
                        let user = user.trim();
                        if !user.is_empty() && !privacy.blocked_users.iter().any(|u| u == user) {
                            privacy.blocked_users.push(user.to_string());
                        }
                    }
                    PrivacyUpdate::UnblockUser(user) => {
                        privacy.blocked_users.retain(|u| *u != user);
                    }
                }
            }
            SettingsUpdate::Audio(update) => {
                let audio = &mut next.audio;
                match update {
                    AudioUpdate::MicrophoneVolume(v) => audio.microphone_volume = v.min(100),
                    AudioUpdate::SpeakerVolume(v) => audio.speaker_volume = v.min(100),
                    AudioUpdate::EchoCancellation(v) => audio.echo_cancellation = v,
                    AudioUpdate::NoiseSuppression(v) => audio.noise_suppression = v,
                    AudioUpdate::AutomaticGainControl(v) => audio.automatic_gain_control = v,
                    AudioUpdate::DefaultMicrophone(v) => audio.default_microphone = v,
                    AudioUpdate::DefaultSpeaker(v) => audio.default_speaker = v,
                }
            }
            SettingsUpdate::Video(update) => {
                let video = &mut next.video;
                match update {
                    VideoUpdate::CameraQuality(v) => video.camera_quality = v,
                    VideoUpdate::DefaultCamera(v) => video.default_camera = v,
                    VideoUpdate::BackgroundBlur(v) => video.background_blur = v,
                    VideoUpdate::VirtualBackground(v) => video.virtual_background = v,
                    VideoUpdate::MirrorVideo(v) => video.mirror_video = v,
                }
            }
            SettingsUpdate::General(update) => {
                let general = &mut next.general;
                match update {
                    GeneralUpdate::Language(v) => general.language = v,
                    GeneralUpdate::Theme(v) => general.theme = v,
                    GeneralUpdate::FontSize(v) => general.font_size = v,
                    GeneralUpdate::AutoStart(v) => general.auto_start = v,
                    GeneralUpdate::MinimizeToTray(v) => general.minimize_to_tray = v,
                    GeneralUpdate::CloseToTray(v) => general.close_to_tray = v,
                    GeneralUpdate::DataUsage(v) => general.data_usage = v,
                }
            }
        }
        next
    }
}

/// Volume sliders are stored as one-element arrays (`[80]`). A bare number
/// is accepted on read.
mod slider {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &u8, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [*value].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Values(Vec<u8>),
            Value(u8),
        }

        let value = match Raw::deserialize(deserializer)? {
            Raw::Values(values) => values
                .first()
                .copied()
                .ok_or(Error::custom("empty slider value"))?,
            Raw::Value(value) => value,
        };
        Ok(value.min(100))
    }
}
