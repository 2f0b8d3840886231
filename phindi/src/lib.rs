pub mod appearance;
pub mod audio;
pub mod call;
pub mod chat;
pub mod contact;
pub mod media;
pub mod models;
pub mod notification;
pub mod profile;
pub mod schedule;
pub mod seed;
pub mod storage;

// Settings and theme preference persisted through storage
pub mod config;

// UI module is always available.
pub mod ui;

/// Storage key holding the serialized settings blob.
pub const SETTINGS_KEY: &str = "phindi-settings";

/// Storage key holding the theme mode string.
pub const THEME_KEY: &str = "phindi-ui-theme";
