use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

const FILE_NAME: &str = "storage.json";

/// Environment variable overriding the profile directory.
pub const PROFILE_DIR_ENV: &str = "PHINDI_PROFILE_DIR";

/// String key-value store persisted as one JSON object in the profile
/// directory. Every mutation rewrites the file.
pub struct Storage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Storage {
    /// Open the store in `dir`, creating the directory if needed. An
    /// unreadable file is treated as empty.
    pub async fn open(dir: &Path) -> Result<Self, anyhow::Error> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create profile directory {}", dir.display()))?;
        let path = dir.join(FILE_NAME);
        let values = match tokio::fs::read_to_string(&path).await {
            Ok(data) => Self::parse(&path, &data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "Storage opened");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store `value` under `key`. The in-memory map only changes once the
    /// file is written.
    pub async fn set(&mut self, key: &str, value: String) -> Result<(), anyhow::Error> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value);
        self.flush(&values).await?;
        self.values = values;
        Ok(())
    }

    /// Remove `key`. Returns whether it was present.
    pub async fn remove(&mut self, key: &str) -> Result<bool, anyhow::Error> {
        if !self.values.contains_key(key) {
            return Ok(false);
        }
        let mut values = self.values.clone();
        values.remove(key);
        self.flush(&values).await?;
        self.values = values;
        Ok(true)
    }

    fn parse(path: &Path, data: &str) -> BTreeMap<String, String> {
        match serde_json::from_str(data) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Malformed storage file, starting empty");
                BTreeMap::new()
            }
        }
    }

    async fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), anyhow::Error> {
        let data = serde_json::to_string_pretty(values)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// Directory holding the local store: `PHINDI_PROFILE_DIR` when it is an
/// absolute path, otherwise `phindi` under the user config directory.
pub fn profile_dir() -> Result<PathBuf, anyhow::Error> {
    if let Ok(custom_dir) = std::env::var(PROFILE_DIR_ENV) {
        let path = PathBuf::from(custom_dir);
        if path.is_absolute() {
            return Ok(path);
        } else {
            tracing::warn!("{} is not an absolute path, using default", PROFILE_DIR_ENV);
        }
    }
    let base_dir = dirs::config_dir()
        .or_else(|| dirs::data_dir())
        .context("Failed to determine config directory")?;
    Ok(base_dir.join("phindi"))
}
