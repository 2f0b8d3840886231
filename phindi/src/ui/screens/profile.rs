use iced::widget::{Space, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Padding, Theme};

use crate::models::UserProfile;
use crate::profile::ProfileField;
use crate::ui::AppContext;
use crate::ui::components::{avatar_with_presence, hint, section_title};
use crate::ui::core::{Screen, ScreenCommand};
use crate::ui::icons::{self, icon};
use crate::ui::theme::{colors, styles};

#[derive(Clone, Debug)]
pub enum ProfileMessage {
    Edit,
    FieldChanged(ProfileField, String),
    Save,
    Cancel,
}

#[derive(Default)]
pub struct ProfileScreen {
    error: Option<String>,
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_field<'a>(
        label: &'static str,
        field: ProfileField,
        saved: &'a str,
        draft: Option<&'a UserProfile>,
        theme: &Theme,
    ) -> Element<'a, ProfileMessage> {
        let value: Element<'a, ProfileMessage> = match draft {
            Some(draft) => {
                let current = match field {
                    ProfileField::Name => &draft.name,
                    ProfileField::Email => &draft.email,
                    ProfileField::Phone => &draft.phone,
                    ProfileField::Bio => &draft.bio,
                    ProfileField::Location => &draft.location,
                };
                text_input(label, current)
                    .on_input(move |value| ProfileMessage::FieldChanged(field, value))
                    .padding(8)
                    .size(14)
                    .into()
            }
            None => text(saved).size(14).color(colors::text_primary(theme)).into(),
        };
        column![
            text(label).size(11).color(colors::text_muted(theme)),
            value
        ]
        .spacing(4)
        .into()
    }

    fn build_stat<'a>(value: u32, label: &'static str, theme: &Theme) -> Element<'a, ProfileMessage> {
        container(
            column![
                text(value.to_string())
                    .size(24)
                    .color(colors::primary(theme)),
                hint(label, theme),
            ]
            .spacing(4)
            .align_x(Alignment::Center),
        )
        .padding(16)
        .width(Length::Fill)
        .style(styles::card)
        .into()
    }
}

impl Screen for ProfileScreen {
    type Message = ProfileMessage;

    fn update(
        &mut self,
        message: ProfileMessage,
        ctx: &mut AppContext,
    ) -> ScreenCommand<ProfileMessage> {
        match message {
            ProfileMessage::Edit => {
                self.error = None;
                ctx.profile.begin_edit();
            }
            ProfileMessage::FieldChanged(field, value) => {
                ctx.profile.set_field(field, value);
            }
            ProfileMessage::Save => match ctx.profile.save() {
                Ok(_) => self.error = None,
                Err(err) => self.error = Some(err.to_string()),
            },
            ProfileMessage::Cancel => {
                self.error = None;
                ctx.profile.cancel();
            }
        }
        ScreenCommand::None
    }

    fn view<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, ProfileMessage> {
        let profile = ctx.profile.profile();
        let draft = ctx.profile.draft();

        let actions: Element<'a, ProfileMessage> = if draft.is_some() {
            row![
                button(text("Cancel").size(13))
                    .on_press(ProfileMessage::Cancel)
                    .style(button::secondary),
                button(text("Save").size(13))
                    .on_press(ProfileMessage::Save)
                    .style(button::primary),
            ]
            .spacing(8)
            .into()
        } else {
            button(
                row![
                    icon(icons::EDIT, 16.0, colors::text_primary(theme)),
                    text("Edit Profile").size(13)
                ]
                .spacing(6)
                .align_y(Alignment::Center),
            )
            .on_press(ProfileMessage::Edit)
            .padding([6, 12])
            .style(button::secondary)
            .into()
        };

        let mut name_line = row![text(&profile.name).size(22).color(colors::text_primary(theme))]
            .spacing(8)
            .align_y(Alignment::Center);
        if profile.verified {
            name_line = name_line.push(icon(icons::DONE_ALL, 18.0, colors::primary(theme)));
        }

        let header = container(
            row![
                avatar_with_presence(&profile.name, 80.0, profile.presence),
                column![
                    name_line,
                    hint(profile.presence.label(), theme),
                    hint(format!("Joined {}", profile.join_date), theme),
                ]
                .spacing(4),
                Space::with_width(Length::Fill),
                actions,
            ]
            .spacing(16)
            .align_y(Alignment::Center),
        )
        .padding(20)
        .style(styles::card);

        let mut details = column![
            section_title("About", theme),
            Self::build_field("Name", ProfileField::Name, &profile.name, draft, theme),
            Self::build_field("Email", ProfileField::Email, &profile.email, draft, theme),
            Self::build_field("Phone", ProfileField::Phone, &profile.phone, draft, theme),
            Self::build_field(
                "Location",
                ProfileField::Location,
                &profile.location,
                draft,
                theme
            ),
            Self::build_field("Bio", ProfileField::Bio, &profile.bio, draft, theme),
        ]
        .spacing(12);
        if let Some(error) = &self.error {
            details = details.push(text(error).size(12).color(colors::text_error(theme)));
        }

        let stats = ctx.profile_stats;
        let stats_row = row![
            Self::build_stat(stats.messages_sent, "Messages Sent", theme),
            Self::build_stat(stats.voice_calls, "Voice Calls", theme),
            Self::build_stat(stats.video_calls, "Video Calls", theme),
        ]
        .spacing(12);

        scrollable(
            column![
                header,
                stats_row,
                container(details).padding(20).style(styles::card),
            ]
            .spacing(16)
            .padding(Padding::from([20, 24]))
            .max_width(800),
        )
        .height(Length::Fill)
        .into()
    }
}
