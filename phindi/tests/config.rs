use std::sync::Arc;

use phindi::appearance::ThemeMode;
use phindi::config::{AudioUpdate, ConfigManager, Settings, SettingsUpdate};
use phindi::storage::Storage;
use phindi::{SETTINGS_KEY, THEME_KEY};
use tokio::sync::Mutex as TokioMutex;

async fn open_temp_storage() -> (tempfile::TempDir, Arc<TokioMutex<Storage>>) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let storage = Storage::open(dir.path())
        .await
        .expect("failed to open storage");
    (dir, Arc::new(TokioMutex::new(storage)))
}

#[tokio::test]
async fn test_empty_storage_yields_defaults() {
    let (_dir, storage) = open_temp_storage().await;
    let config = ConfigManager::new(storage);
    assert_eq!(config.load_settings().await, Settings::default());
    assert_eq!(config.load_theme_mode().await, ThemeMode::System);
}

#[tokio::test]
async fn test_settings_survive_reopen() {
    let (dir, storage) = open_temp_storage().await;
    let config = ConfigManager::new(storage);
    let settings =
        Settings::default().apply(SettingsUpdate::Audio(AudioUpdate::SpeakerVolume(42)));
    config.save_settings(&settings).await.expect("save");
    config
        .save_theme_mode(ThemeMode::Dark)
        .await
        .expect("save theme");

    let reopened = Storage::open(dir.path()).await.expect("reopen");
    assert!(reopened.get(SETTINGS_KEY).is_some());
    assert_eq!(reopened.get(THEME_KEY), Some("dark"));

    let config = ConfigManager::new(Arc::new(TokioMutex::new(reopened)));
    assert_eq!(config.load_settings().await.audio.speaker_volume, 42);
    assert_eq!(config.load_theme_mode().await, ThemeMode::Dark);
}

#[tokio::test]
async fn test_reset_removes_stored_settings() {
    let (_dir, storage) = open_temp_storage().await;
    let config = ConfigManager::new(storage.clone());
    let settings =
        Settings::default().apply(SettingsUpdate::Audio(AudioUpdate::MicrophoneVolume(10)));
    config.save_settings(&settings).await.expect("save");

    let reset = config.reset_settings().await.expect("reset");
    assert_eq!(reset, Settings::default());
    assert!(storage.lock().await.get(SETTINGS_KEY).is_none());
    assert_eq!(config.load_settings().await, Settings::default());
}

#[tracing_test::traced_test]
#[tokio::test]
async fn test_malformed_values_fall_back() {
    let (_dir, storage) = open_temp_storage().await;
    {
        let mut guard = storage.lock().await;
        guard
            .set(SETTINGS_KEY, "[1, 2".to_string())
            .await
            .expect("set settings");
        guard
            .set(THEME_KEY, "sepia".to_string())
            .await
            .expect("set theme");
    }
    let config = ConfigManager::new(storage);
    assert_eq!(config.load_settings().await, Settings::default());
    assert_eq!(config.load_theme_mode().await, ThemeMode::System);
    assert!(logs_contain("Malformed theme preference"));
}

#[tracing_test::traced_test]
#[tokio::test]
async fn test_corrupt_storage_file_opens_empty() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    tokio::fs::write(dir.path().join("storage.json"), "garbage")
        .await
        .expect("write");
    let storage = Storage::open(dir.path()).await.expect("open");
    assert!(storage.get(SETTINGS_KEY).is_none());
    assert!(logs_contain("Malformed storage file"));
}

#[tokio::test]
async fn test_storage_remove_reports_presence() {
    let (_dir, storage) = open_temp_storage().await;
    let mut storage = storage.lock().await;
    assert!(!storage.remove("missing").await.expect("remove"));
    storage.set("key", "value".to_string()).await.expect("set");
    assert!(storage.remove("key").await.expect("remove"));
    assert!(storage.get("key").is_none());
}

#[tokio::test]
async fn test_open_creates_missing_directory() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let nested = dir.path().join("profile").join("phindi");
    let mut storage = Storage::open(&nested).await.expect("open");
    storage.set("key", "value".to_string()).await.expect("set");
    assert!(nested.join("storage.json").exists());
    assert_eq!(storage.path(), nested.join("storage.json").as_path());
}

#[tokio::test]
async fn test_failed_write_keeps_previous_values() {
    let (dir, storage) = open_temp_storage().await;
    let config = ConfigManager::new(storage.clone());
    let saved =
        Settings::default().apply(SettingsUpdate::Audio(AudioUpdate::SpeakerVolume(30)));
    config.save_settings(&saved).await.expect("save");

    std::fs::remove_dir_all(dir.path()).expect("remove profile dir");

    let unsaved =
        Settings::default().apply(SettingsUpdate::Audio(AudioUpdate::SpeakerVolume(90)));
    assert!(config.save_settings(&unsaved).await.is_err());
    assert_eq!(config.load_settings().await, saved);

    assert!(storage.lock().await.remove(SETTINGS_KEY).await.is_err());
    assert!(storage.lock().await.get(SETTINGS_KEY).is_some());
}
