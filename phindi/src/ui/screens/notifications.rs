use iced::widget::{Space, button, column, container, row, scrollable, text, text_input, toggler};
use iced::{Alignment, Element, Length, Padding, Theme};

use crate::config::{NotificationsUpdate, SettingsUpdate};
use crate::models::{DateTime, Notification, format_time_ago};
use crate::ui::AppContext;
use crate::ui::components::{hint, section_title};
use crate::ui::core::{Screen, ScreenCommand};
use crate::ui::icons::{self, icon};
use crate::ui::theme::{colors, styles};

#[derive(Clone, Debug)]
pub enum NotificationsMessage {
    MarkRead(u64),
    MarkAllRead,
    Delete(u64),
    ClearAll,
    /// Preference switch, saved right away.
    Toggle(NotificationsUpdate),
    Saved(Result<(), String>),
}

#[derive(Default)]
pub struct NotificationsScreen {
    error: Option<String>,
}

impl NotificationsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_item<'a>(
        notification: &'a Notification,
        now: DateTime,
        theme: &Theme,
    ) -> Element<'a, NotificationsMessage> {
        let icon_color = colors::text_secondary(theme);
        let mut meta = row![hint(format_time_ago(notification.timestamp, now), theme)].spacing(8);
        if let Some(sender) = &notification.sender {
            meta = meta.push(hint(sender.clone(), theme));
        }
        let mut actions = row![].spacing(4);
        if !notification.is_read {
            actions = actions.push(
                button(icon(icons::DONE_ALL, 16.0, icon_color))
                    .on_press(NotificationsMessage::MarkRead(notification.id))
                    .padding(4)
                    .style(move |t: &Theme, status| styles::button_icon(t, status)),
            );
        }
        actions = actions.push(
            button(icon(icons::DELETE, 16.0, icon_color))
                .on_press(NotificationsMessage::Delete(notification.id))
                .padding(4)
                .style(move |t: &Theme, status| styles::button_icon(t, status)),
        );

        let content = row![
            text(notification.kind.icon()).size(20),
            column![
                text(&notification.title)
                    .size(14)
                    .color(colors::text_primary(theme)),
                text(&notification.message)
                    .size(13)
                    .color(colors::text_secondary(theme)),
                meta,
            ]
            .spacing(4)
            .width(Length::Fill),
            actions,
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        container(content)
            .padding(12)
            .width(Length::Fill)
            .style(if notification.is_read {
                styles::card
            } else {
                styles::card_unread
            })
            .into()
    }

    fn build_preferences<'a>(&self, ctx: &'a AppContext, theme: &Theme) -> Element<'a, NotificationsMessage> {
        let prefs = &ctx.settings.notifications;
        let switch = |label: &'static str, value: bool, update: fn(bool) -> NotificationsUpdate| {
            toggler(value)
                .label(label)
                .text_size(13)
                .on_toggle(move |on| NotificationsMessage::Toggle(update(on)))
        };
        let mut content = column![
            section_title("Preferences", theme),
            switch(
                "Push notifications",
                prefs.push_notifications,
                NotificationsUpdate::Push
            ),
            switch(
                "Message notifications",
                prefs.message_notifications,
                NotificationsUpdate::Message
            ),
            switch(
                "Call notifications",
                prefs.call_notifications,
                NotificationsUpdate::Call
            ),
            switch(
                "Group notifications",
                prefs.group_notifications,
                NotificationsUpdate::Group
            ),
            switch("Sound", prefs.sound_enabled, NotificationsUpdate::Sound),
            switch(
                "Do not disturb",
                prefs.do_not_disturb_mode,
                NotificationsUpdate::DoNotDisturb
            ),
            switch(
                "Quiet hours",
                prefs.quiet_hours.enabled,
                NotificationsUpdate::QuietHoursEnabled
            ),
        ]
        .spacing(10);
        if prefs.quiet_hours.enabled {
            content = content.push(
                row![
                    text_input("22:00", &prefs.quiet_hours.start)
                        .on_input(|value| {
                            NotificationsMessage::Toggle(NotificationsUpdate::QuietHoursStart(value))
                        })
                        .padding(6)
                        .width(Length::Fixed(80.0)),
                    text("to").size(13),
                    text_input("08:00", &prefs.quiet_hours.end)
                        .on_input(|value| {
                            NotificationsMessage::Toggle(NotificationsUpdate::QuietHoursEnd(value))
                        })
                        .padding(6)
                        .width(Length::Fixed(80.0)),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            );
        }
        if let Some(error) = &self.error {
            content = content.push(text(error.clone()).size(12).color(colors::text_error(theme)));
        }
        container(content)
            .padding(16)
            .width(Length::Fixed(280.0))
            .style(styles::card)
            .into()
    }
}

impl Screen for NotificationsScreen {
    type Message = NotificationsMessage;

    fn update(
        &mut self,
        message: NotificationsMessage,
        ctx: &mut AppContext,
    ) -> ScreenCommand<NotificationsMessage> {
        match message {
            NotificationsMessage::MarkRead(id) => {
                ctx.notifications.mark_read(id);
            }
            NotificationsMessage::MarkAllRead => {
                ctx.notifications.mark_all_read();
            }
            NotificationsMessage::Delete(id) => {
                ctx.notifications.delete(id);
            }
            NotificationsMessage::ClearAll => {
                ctx.notifications.clear_all();
            }
            NotificationsMessage::Toggle(update) => {
                ctx.settings = ctx.settings.apply(SettingsUpdate::Notifications(update));
                return ScreenCommand::Message(
                    ctx.save_settings().map(NotificationsMessage::Saved),
                );
            }
            NotificationsMessage::Saved(result) => self.error = result.err(),
        }
        ScreenCommand::None
    }

    fn view<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, NotificationsMessage> {
        let now = DateTime::now();
        let unread = ctx.notifications.unread_count();

        let mut header_actions = row![].spacing(8);
        if unread > 0 {
            header_actions = header_actions.push(
                button(text("Mark all read").size(13))
                    .on_press(NotificationsMessage::MarkAllRead)
                    .style(button::secondary),
            );
        }
        if !ctx.notifications.is_empty() {
            header_actions = header_actions.push(
                button(text("Clear all").size(13))
                    .on_press(NotificationsMessage::ClearAll)
                    .style(move |t: &Theme, status| styles::button_danger(t, status)),
            );
        }
        let subtitle = if unread == 0 {
            "You're all caught up".to_string()
        } else {
            format!("{} unread", unread)
        };
        let header = row![
            column![
                text("Notifications")
                    .size(20)
                    .color(colors::text_primary(theme)),
                hint(subtitle, theme),
            ]
            .spacing(2),
            Space::with_width(Length::Fill),
            header_actions,
        ]
        .align_y(Alignment::Center);

        let mut list = column![].spacing(8);
        if ctx.notifications.is_empty() {
            list = list.push(
                container(
                    column![
                        icon(icons::BELL, 40.0, colors::text_muted(theme)),
                        text("No notifications")
                            .size(14)
                            .color(colors::text_muted(theme)),
                    ]
                    .spacing(8)
                    .align_x(Alignment::Center),
                )
                .center_x(Length::Fill)
                .padding(40),
            );
        }
        for notification in ctx.notifications.items() {
            list = list.push(Self::build_item(notification, now, theme));
        }

        row![
            column![header, scrollable(list).height(Length::Fill)]
                .spacing(16)
                .width(Length::Fill),
            self.build_preferences(ctx, theme),
        ]
        .spacing(16)
        .padding(Padding::from([20, 24]))
        .height(Length::Fill)
        .into()
    }
}
