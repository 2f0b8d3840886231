use tokio::sync::watch;

use super::{ResolvedTheme, SystemScheme, ThemeMode, resolve};

/// Owns the theme preference and keeps the applied theme in sync with it.
/// The environment signal is only watched while the mode is `System`.
pub struct ThemeController {
    mode: ThemeMode,
    resolved: ResolvedTheme,
    scheme: SystemScheme,
    subscription: Option<watch::Receiver<bool>>,
}

impl ThemeController {
    pub fn new(mode: ThemeMode, scheme: SystemScheme) -> Self {
        let mut controller = Self {
            mode,
            resolved: ResolvedTheme::Light,
            scheme,
            subscription: None,
        };
        controller.apply_mode();
        controller
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn resolved(&self) -> ResolvedTheme {
        self.resolved
    }

    pub fn scheme(&self) -> &SystemScheme {
        &self.scheme
    }

    pub fn is_following_system(&self) -> bool {
        self.subscription.is_some()
    }

    /// Switch preference. Returns whether the mode changed. Persisting it is
    /// up to the caller.
    pub fn set_mode(&mut self, mode: ThemeMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.apply_mode();
        tracing::info!(mode = %mode, resolved = ?self.resolved, "Theme mode changed");
        true
    }

    /// Pick up a pending environment notification. Returns whether the
    /// applied theme changed.
    pub fn poll_system(&mut self) -> bool {
        let Some(rx) = self.subscription.as_mut() else {
            return false;
        };
        if !rx.has_changed().unwrap_or(false) {
            return false;
        }
        let is_dark = *rx.borrow_and_update();
        let resolved = resolve(self.mode, is_dark);
        if resolved == self.resolved {
            return false;
        }
        tracing::debug!(?resolved, "System color scheme changed");
        self.resolved = resolved;
        true
    }

    fn apply_mode(&mut self) {
        if self.mode == ThemeMode::System {
            let mut rx = self.scheme.subscribe();
            let is_dark = *rx.borrow_and_update();
            self.subscription = Some(rx);
            self.resolved = resolve(self.mode, is_dark);
        } else {
            self.subscription = None;
            self.resolved = resolve(self.mode, false);
        }
    }
}
