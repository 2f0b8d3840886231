use chrono::NaiveTime;
use phindi::appearance::ThemeMode;
use phindi::config::{
    AudioUpdate, CameraQuality, GeneralUpdate, NotificationsUpdate, PrivacyUpdate, QuietHours,
    Settings, SettingsUpdate, Visibility,
};
use phindi::models::NotificationKind;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.profile.name, "John Doe");
    assert!(settings.notifications.push_notifications);
    assert!(!settings.notifications.do_not_disturb_mode);
    assert!(!settings.notifications.quiet_hours.enabled);
    assert_eq!(settings.notifications.quiet_hours.start, "22:00");
    assert_eq!(settings.notifications.quiet_hours.end, "08:00");
    assert_eq!(settings.privacy.who_can_call_me, Visibility::Everyone);
    assert!(settings.privacy.blocked_users.is_empty());
    assert_eq!(settings.audio.microphone_volume, 80);
    assert_eq!(settings.audio.speaker_volume, 70);
    assert_eq!(settings.video.camera_quality, CameraQuality::FullHd);
    assert!(settings.video.mirror_video);
    assert_eq!(settings.general.language, "en-US");
    assert_eq!(settings.general.theme, ThemeMode::System);
}

#[test]
fn test_serialized_layout() {
    let value = serde_json::to_value(Settings::default()).expect("serialize");
    assert_eq!(value["audio"]["microphoneVolume"], serde_json::json!([80]));
    assert_eq!(value["audio"]["speakerVolume"], serde_json::json!([70]));
    assert_eq!(value["notifications"]["doNotDisturbMode"], false);
    assert_eq!(value["notifications"]["quietHours"]["start"], "22:00");
    assert_eq!(value["privacy"]["whoCanCallMe"], "everyone");
    assert_eq!(value["video"]["cameraQuality"], "1080p");
    assert_eq!(value["general"]["theme"], "system");
    assert_eq!(value["general"]["dataUsage"], "medium");
}

#[test]
fn test_partial_blob_fills_defaults() {
    let raw = r#"{"audio":{"speakerVolume":[35]},"general":{"theme":"dark"}}"#;
    let settings = Settings::from_json_or_default(raw);
    assert_eq!(settings.audio.speaker_volume, 35);
    assert_eq!(settings.audio.microphone_volume, 80);
    assert_eq!(settings.general.theme, ThemeMode::Dark);
    assert_eq!(settings.profile, Settings::default().profile);
}

#[test]
fn test_bare_volume_is_accepted_and_clamped() {
    let raw = r#"{"audio":{"microphoneVolume":250}}"#;
    let settings = Settings::from_json_or_default(raw);
    assert_eq!(settings.audio.microphone_volume, 100);
}

#[tracing_test::traced_test]
#[test]
fn test_malformed_blob_falls_back_to_defaults() {
    let settings = Settings::from_json_or_default("{not json");
    assert_eq!(settings, Settings::default());
    assert!(logs_contain("Malformed stored settings"));
}

#[test]
fn test_apply_returns_new_value() {
    let settings = Settings::default();
    let next = settings.apply(SettingsUpdate::Notifications(
        NotificationsUpdate::DoNotDisturb(true),
    ));
    assert!(next.notifications.do_not_disturb_mode);
    assert!(!settings.notifications.do_not_disturb_mode);

    let next = next
        .apply(SettingsUpdate::Audio(AudioUpdate::SpeakerVolume(120)))
        .apply(SettingsUpdate::General(GeneralUpdate::Theme(ThemeMode::Light)));
    assert_eq!(next.audio.speaker_volume, 100);
    assert_eq!(next.general.theme, ThemeMode::Light);
}

#[test]
fn test_block_list() {
    let settings = Settings::default()
        .apply(SettingsUpdate::Privacy(PrivacyUpdate::BlockUser(
            " spammer ".to_string(),
        )))
        .apply(SettingsUpdate::Privacy(PrivacyUpdate::BlockUser(
            "spammer".to_string(),
        )))
        .apply(SettingsUpdate::Privacy(PrivacyUpdate::BlockUser(
            "   ".to_string(),
        )));
    assert_eq!(settings.privacy.blocked_users, vec!["spammer".to_string()]);

    let settings = settings.apply(SettingsUpdate::Privacy(PrivacyUpdate::UnblockUser(
        "spammer".to_string(),
    )));
    assert!(settings.privacy.blocked_users.is_empty());
}

#[test]
fn test_quiet_hours_wrap_midnight() {
    let quiet = QuietHours {
        enabled: true,
        start: "22:00".to_string(),
        end: "08:00".to_string(),
    };
    assert!(quiet.contains(at(23, 30)));
    assert!(quiet.contains(at(2, 0)));
    assert!(quiet.contains(at(22, 0)));
    assert!(!quiet.contains(at(8, 0)));
    assert!(!quiet.contains(at(12, 0)));
}

#[test]
fn test_quiet_hours_same_day_window() {
    let quiet = QuietHours {
        enabled: true,
        start: "12:00".to_string(),
        end: "13:30".to_string(),
    };
    assert!(quiet.contains(at(12, 45)));
    assert!(!quiet.contains(at(13, 30)));
    assert!(!quiet.contains(at(11, 59)));
}

#[test]
fn test_quiet_hours_disabled_or_invalid() {
    let mut quiet = QuietHours::default();
    assert!(!quiet.contains(at(23, 0)));
    quiet.enabled = true;
    quiet.start = "late".to_string();
    assert!(!quiet.contains(at(23, 0)));
}

#[test]
fn test_allows() {
    let settings = Settings::default();
    let prefs = &settings.notifications;
    assert!(prefs.allows(NotificationKind::Message, at(12, 0)));
    assert!(prefs.allows_chat(true, at(12, 0)));

    let muted = settings
        .apply(SettingsUpdate::Notifications(NotificationsUpdate::Group(
            false,
        )))
        .apply(SettingsUpdate::Notifications(NotificationsUpdate::Call(
            false,
        )));
    assert!(muted.notifications.allows_chat(false, at(12, 0)));
    assert!(!muted.notifications.allows_chat(true, at(12, 0)));
    assert!(!muted.notifications.allows(NotificationKind::Call, at(12, 0)));
    assert!(muted.notifications.allows(NotificationKind::System, at(12, 0)));

    let dnd = settings.apply(SettingsUpdate::Notifications(
        NotificationsUpdate::DoNotDisturb(true),
    ));
    assert!(!dnd.notifications.allows(NotificationKind::System, at(12, 0)));

    let quiet = settings.apply(SettingsUpdate::Notifications(
        NotificationsUpdate::QuietHoursEnabled(true),
    ));
    assert!(!quiet.notifications.allows(NotificationKind::Message, at(23, 0)));
    assert!(quiet.notifications.allows(NotificationKind::Message, at(9, 0)));
}
