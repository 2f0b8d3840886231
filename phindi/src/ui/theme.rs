//! Styles shared by all screens.
//!
//! Light and dark map to the Catppuccin Latte and Mocha palettes; every style
//! below derives its colors from the active palette so both variants stay
//! consistent.

use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

use crate::appearance::ResolvedTheme;
use crate::models::Presence;

pub fn to_iced_theme(resolved: ResolvedTheme) -> Theme {
    match resolved {
        ResolvedTheme::Light => Theme::CatppuccinLatte,
        ResolvedTheme::Dark => Theme::CatppuccinMocha,
    }
}

/// Custom styles for various UI components
pub mod styles {
    use super::*;

    pub fn divider(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.strong.color)),
            ..Default::default()
        }
    }

    /// Navigation sidebar
    pub fn sidebar(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.weak.color)),
            ..Default::default()
        }
    }

    pub fn page(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.base.color)),
            ..Default::default()
        }
    }

    /// Style for card containers (sections, forms, detail panels)
    pub fn card(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.weak.color)),
            border: Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }

    /// Card highlighting an unread notification
    pub fn card_unread(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.primary.weak.color)),
            border: Border {
                color: palette.primary.base.color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }

    pub fn chat_header(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.weak.color)),
            ..Default::default()
        }
    }

    pub fn message_incoming(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.strong.color)),
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            text_color: Some(palette.background.strong.text),
            ..Default::default()
        }
    }

    pub fn message_outgoing(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.primary.base.color)),
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            text_color: Some(palette.primary.base.text),
            ..Default::default()
        }
    }

    /// Circular avatar placeholder
    pub fn avatar(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.primary.strong.color)),
            border: Border {
                radius: 1000.0.into(),
                ..Default::default()
            },
            text_color: Some(palette.primary.strong.text),
            ..Default::default()
        }
    }

    /// Small count bubble (unread messages, notifications)
    pub fn badge(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.danger.base.color)),
            border: Border {
                radius: 10.0.into(),
                ..Default::default()
            },
            text_color: Some(palette.danger.base.text),
            ..Default::default()
        }
    }

    pub fn presence_dot(theme: &Theme, presence: Presence) -> container::Style {
        let palette = theme.extended_palette();
        let color = match presence {
            Presence::Online => palette.success.base.color,
            Presence::Away => Color::from_rgb(0.95, 0.77, 0.2),
            Presence::Busy => palette.danger.base.color,
            Presence::Offline => palette.background.strong.color,
        };
        container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                color: palette.background.base.color,
                width: 2.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        }
    }

    /// Full-window backdrop of the call screens
    pub fn call_background(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.strong.color)),
            ..Default::default()
        }
    }

    pub fn call_status(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.weak.color)),
            border: Border {
                color: palette.primary.base.color,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        }
    }

    pub fn participant_tile(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.base.color)),
            border: Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        }
    }

    /// Segment of the microphone level meter
    pub fn level_bar(theme: &Theme, lit: bool) -> container::Style {
        let palette = theme.extended_palette();
        let color = if lit {
            palette.success.base.color
        } else {
            palette.background.strong.color
        };
        container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: 2.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn recording(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.danger.base.color)),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            text_color: Some(palette.danger.base.text),
            ..Default::default()
        }
    }

    fn rounded(background: Color, text_color: Color) -> button::Style {
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Style for danger/destructive buttons
    pub fn button_danger(theme: &Theme, status: button::Status) -> button::Style {
        let palette = theme.extended_palette();
        match status {
            button::Status::Active | button::Status::Pressed => {
                rounded(palette.danger.base.color, palette.danger.base.text)
            }
            button::Status::Hovered => {
                rounded(palette.danger.strong.color, palette.danger.strong.text)
            }
            button::Status::Disabled => {
                rounded(palette.background.strong.color, palette.background.strong.text)
            }
        }
    }

    /// Style for sidebar entries and icon buttons (transparent background)
    pub fn button_icon(theme: &Theme, status: button::Status) -> button::Style {
        let palette = theme.extended_palette();
        match status {
            button::Status::Active => rounded(Color::TRANSPARENT, palette.background.base.text),
            button::Status::Hovered => {
                rounded(palette.background.weak.color, palette.background.base.text)
            }
            button::Status::Pressed => {
                rounded(palette.background.strong.color, palette.background.base.text)
            }
            button::Status::Disabled => {
                rounded(Color::TRANSPARENT, palette.background.strong.text)
            }
        }
    }

    /// Sidebar entry of the current route
    pub fn button_nav_active(theme: &Theme, _status: button::Status) -> button::Style {
        let palette = theme.extended_palette();
        rounded(palette.primary.weak.color, palette.primary.weak.text)
    }

    /// Round call control, lit when the feature is active
    pub fn button_call_control(theme: &Theme, status: button::Status, on: bool) -> button::Style {
        let palette = theme.extended_palette();
        let (background, text_color) = match (on, status) {
            (_, button::Status::Disabled) => {
                (palette.background.strong.color, palette.background.strong.text)
            }
            (true, button::Status::Hovered) => {
                (palette.background.strong.color, palette.background.strong.text)
            }
            (true, _) => (palette.background.weak.color, palette.background.weak.text),
            (false, _) => (palette.danger.weak.color, palette.danger.weak.text),
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                radius: 28.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Helper functions to get colors from theme
pub mod colors {
    use super::*;

    pub fn text_primary(theme: &Theme) -> Color {
        theme.extended_palette().background.base.text
    }

    pub fn text_secondary(theme: &Theme) -> Color {
        let mut color = theme.extended_palette().background.base.text;
        color.a = 0.7;
        color
    }

    pub fn text_muted(theme: &Theme) -> Color {
        let mut color = theme.extended_palette().background.base.text;
        color.a = 0.5;
        color
    }

    pub fn text_error(theme: &Theme) -> Color {
        theme.extended_palette().danger.strong.color
    }

    pub fn text_success(theme: &Theme) -> Color {
        theme.extended_palette().success.strong.color
    }

    pub fn primary(theme: &Theme) -> Color {
        theme.extended_palette().primary.base.color
    }
}
