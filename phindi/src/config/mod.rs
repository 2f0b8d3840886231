use std::sync::Arc;

use anyhow::Context as _;
use tokio::sync::Mutex as TokioMutex;

use crate::appearance::ThemeMode;
use crate::storage::Storage;
use crate::{SETTINGS_KEY, THEME_KEY};

mod settings;

pub use settings::*;

/// Typed access to the preferences kept in [`Storage`].
/// Keys used:
/// - `"phindi-settings"`: JSON-encoded [`Settings`]
/// - `"phindi-ui-theme"`: theme mode string (`light`, `dark` or `system`)
#[derive(Clone)]
pub struct ConfigManager {
    storage: Arc<TokioMutex<Storage>>,
}

impl ConfigManager {
    /// Does not perform I/O.
    pub fn new(storage: Arc<TokioMutex<Storage>>) -> Self {
        Self { storage }
    }

    /// Stored settings, or the defaults when nothing usable is stored.
    pub async fn load_settings(&self) -> Settings {
        let storage = self.storage.lock().await;
        match storage.get(SETTINGS_KEY) {
            Some(raw) => Settings::from_json_or_default(raw),
            None => Settings::default(),
        }
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), anyhow::Error> {
        let raw = serde_json::to_string(settings).context("Failed to serialize settings")?;
        let mut storage = self.storage.lock().await;
        storage
            .set(SETTINGS_KEY, raw)
            .await
            .context("Failed to save settings")?;
        tracing::info!("Settings saved");
        Ok(())
    }

    /// Forget the stored settings and return the defaults.
    pub async fn reset_settings(&self) -> Result<Settings, anyhow::Error> {
        let mut storage = self.storage.lock().await;
        storage
            .remove(SETTINGS_KEY)
            .await
            .context("Failed to reset settings")?;
        tracing::info!("Settings reset to defaults");
        Ok(Settings::default())
    }

    pub async fn load_theme_mode(&self) -> ThemeMode {
        let storage = self.storage.lock().await;
        let Some(raw) = storage.get(THEME_KEY) else {
            return ThemeMode::default();
        };
        match raw.parse() {
            Ok(mode) => mode,
            Err(err) => {
                tracing::warn!(%err, "Malformed theme preference, using default");
                ThemeMode::default()
            }
        }
    }

    pub async fn save_theme_mode(&self, mode: ThemeMode) -> Result<(), anyhow::Error> {
        let mut storage = self.storage.lock().await;
        storage
            .set(THEME_KEY, mode.to_string())
            .await
            .context("Failed to save theme preference")
    }
}
