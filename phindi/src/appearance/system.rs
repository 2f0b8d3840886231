use std::sync::Arc;

use tokio::sync::watch;

/// Overrides the detected scheme: `dark` or `light`.
pub const COLOR_SCHEME_ENV: &str = "PHINDI_COLOR_SCHEME";

/// Live "system prefers dark" signal. Clones share the same channel.
#[derive(Debug, Clone)]
pub struct SystemScheme {
    tx: Arc<watch::Sender<bool>>,
}

impl SystemScheme {
    pub fn new(is_dark: bool) -> Self {
        let (tx, _rx) = watch::channel(is_dark);
        Self { tx: Arc::new(tx) }
    }

    /// Seeded from [`probe_system_dark`].
    pub fn detect() -> Self {
        Self::new(probe_system_dark())
    }

    pub fn is_dark(&self) -> bool {
        *self.tx.borrow()
    }

    /// Publish a new value. Subscribers are only notified when it differs.
    pub fn set(&self, is_dark: bool) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == is_dark {
                false
            } else {
                *current = is_dark;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Best-effort read of the desktop color scheme from the environment.
pub fn probe_system_dark() -> bool {
    let scheme = std::env::var(COLOR_SCHEME_ENV).ok();
    let gtk_theme = std::env::var("GTK_THEME").ok();
    scheme_is_dark(scheme.as_deref(), gtk_theme.as_deref())
}

/// An explicit `dark`/`light` scheme wins; otherwise a GTK theme named
/// `*:dark` or `*-dark` counts as dark.
pub fn scheme_is_dark(scheme: Option<&str>, gtk_theme: Option<&str>) -> bool {
    match scheme.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("dark") => return true,
        Some("light") => return false,
        _ => {}
    }
    gtk_theme
        .map(|theme| theme.trim().to_ascii_lowercase())
        .is_some_and(|theme| theme.ends_with(":dark") || theme.ends_with("-dark"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_dark() {
        assert!(scheme_is_dark(Some("dark"), None));
        assert!(!scheme_is_dark(Some("light"), Some("Adwaita:dark")));
        assert!(scheme_is_dark(None, Some("Adwaita:dark")));
        assert!(scheme_is_dark(Some("auto"), Some("Yaru-dark")));
        assert!(!scheme_is_dark(None, Some("Adwaita")));
        assert!(!scheme_is_dark(None, None));
    }

    #[test]
    fn test_set_notifies_only_on_change() {
        let scheme = SystemScheme::new(false);
        let mut rx = scheme.subscribe();
        assert!(!scheme.set(false));
        assert!(!rx.has_changed().unwrap_or(true));
        assert!(scheme.set(true));
        assert!(rx.has_changed().unwrap_or(false));
        assert!(*rx.borrow_and_update());
    }
}
