//! Small widgets reused across screens.

use iced::widget::{Space, container, row, text};
use iced::{Alignment, Element, Length, Theme};

use crate::models::{Presence, initials};
use crate::ui::theme::{colors, styles};

/// Round placeholder with the initials of `name`.
pub fn avatar<'a, M: 'a>(name: &str, size: f32) -> Element<'a, M> {
    container(text(initials(name)).size(size * 0.4))
        .center_x(Length::Fixed(size))
        .center_y(Length::Fixed(size))
        .style(styles::avatar)
        .into()
}

/// Avatar with a presence dot in its corner row.
pub fn avatar_with_presence<'a, M: 'a>(
    name: &str,
    size: f32,
    presence: Presence,
) -> Element<'a, M> {
    row![
        avatar(name, size),
        container(presence_dot(presence))
            .height(Length::Fixed(size))
            .align_y(Alignment::End),
    ]
    .spacing(2)
    .into()
}

pub fn presence_dot<'a, M: 'a>(presence: Presence) -> Element<'a, M> {
    container(Space::new(Length::Fixed(8.0), Length::Fixed(8.0)))
        .style(move |theme: &Theme| styles::presence_dot(theme, presence))
        .into()
}

/// Count bubble. Renders nothing for zero.
pub fn badge<'a, M: 'a>(count: usize) -> Element<'a, M> {
    if count == 0 {
        return Space::new(Length::Shrink, Length::Shrink).into();
    }
    let label = if count > 99 {
        "99+".to_string()
    } else {
        count.to_string()
    };
    container(text(label).size(11))
        .padding([1, 6])
        .style(styles::badge)
        .into()
}

pub fn section_title<'a, M: 'a>(title: &'a str, theme: &Theme) -> Element<'a, M> {
    text(title).size(16).color(colors::text_primary(theme)).into()
}

/// Secondary line under a setting or field label.
pub fn hint<'a, M: 'a>(content: impl Into<String>, theme: &Theme) -> Element<'a, M> {
    text(content.into()).size(12).color(colors::text_secondary(theme)).into()
}

pub fn divider<'a, M: 'a>() -> Element<'a, M> {
    container(Space::new(Length::Fill, Length::Fixed(1.0)))
        .style(styles::divider)
        .into()
}
