use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Theme preference chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [Self::Light, Self::Dark, Self::System];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown theme mode '{0}'")]
pub struct ParseThemeModeError(pub String);

impl FromStr for ThemeMode {
    type Err = ParseThemeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(ParseThemeModeError(other.to_string())),
        }
    }
}

/// Theme actually applied to the window. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn is_dark(&self) -> bool {
        *self == Self::Dark
    }
}

pub fn resolve(mode: ThemeMode, system_is_dark: bool) -> ResolvedTheme {
    match mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::System if system_is_dark => ResolvedTheme::Dark,
        ThemeMode::System => ResolvedTheme::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for mode in ThemeMode::ALL {
            assert_eq!(mode.to_string().parse::<ThemeMode>(), Ok(mode));
        }
        assert_eq!(
            "sepia".parse::<ThemeMode>(),
            Err(ParseThemeModeError("sepia".to_string()))
        );
    }

    #[test]
    fn test_explicit_mode_ignores_system() {
        assert_eq!(resolve(ThemeMode::Light, true), ResolvedTheme::Light);
        assert_eq!(resolve(ThemeMode::Dark, false), ResolvedTheme::Dark);
    }
}
