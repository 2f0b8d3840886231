use iced::widget::{
    Space, button, column, container, pick_list, row, scrollable, slider, text, text_input, toggler,
};
use iced::{Alignment, Element, Length, Padding, Theme};

use crate::appearance::ThemeMode;
use crate::config::{
    AudioUpdate, CAMERAS, CameraQuality, DataUsage, FontSize, GeneralUpdate, LANGUAGES,
    MICROPHONES, NotificationsUpdate, PrivacyUpdate, ProfileUpdate, SPEAKERS, Settings,
    SettingsUpdate, VideoUpdate, Visibility,
};
use crate::ui::AppContext;
use crate::ui::components::hint;
use crate::ui::core::{Screen, ScreenCommand};
use crate::ui::icons::{self, icon};
use crate::ui::theme::{colors, styles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsSection {
    #[default]
    Profile,
    Notifications,
    Privacy,
    Audio,
    Video,
    General,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 6] = [
        Self::Profile,
        Self::Notifications,
        Self::Privacy,
        Self::Audio,
        Self::Video,
        Self::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Notifications => "Notifications",
            Self::Privacy => "Privacy",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::General => "General",
        }
    }
}

#[derive(Clone, Debug)]
pub enum SettingsMessage {
    SectionSelected(SettingsSection),
    Update(SettingsUpdate),
    ThemeSelected(ThemeMode),
    ThemeSaved,
    BlockInputChanged(String),
    BlockSubmit,
    SaveSettings,
    CancelSettings,
    ResetToDefault,
    SaveComplete(Result<(), String>),
    ResetComplete(Result<Settings, String>),
}

pub struct SettingsScreen {
    section: SettingsSection,
    draft: Settings,
    block_input: String,
    status: Option<Result<String, String>>,
}

impl SettingsScreen {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            section: SettingsSection::default(),
            draft: ctx.settings.clone(),
            block_input: String::new(),
            status: None,
        }
    }

    /// Replace the draft with the saved settings.
    pub fn reload(&mut self, ctx: &AppContext) {
        self.draft = ctx.settings.clone();
    }

    pub fn has_changes(&self, ctx: &AppContext) -> bool {
        self.draft != ctx.settings
    }

    fn setting<'a>(
        label: &'static str,
        description: &'static str,
        control: impl Into<Element<'a, SettingsMessage>>,
        theme: &Theme,
    ) -> Element<'a, SettingsMessage> {
        row![
            column![
                text(label).size(14).color(colors::text_primary(theme)),
                hint(description, theme),
            ]
            .spacing(2)
            .width(Length::Fill),
            control.into(),
        ]
        .spacing(16)
        .align_y(Alignment::Center)
        .into()
    }

    fn switch<'a>(
        label: &'static str,
        description: &'static str,
        value: bool,
        update: impl Fn(bool) -> SettingsUpdate + 'a,
        theme: &Theme,
    ) -> Element<'a, SettingsMessage> {
        Self::setting(
            label,
            description,
            toggler(value).on_toggle(move |on| SettingsMessage::Update(update(on))),
            theme,
        )
    }

    fn build_profile(&self, theme: &Theme) -> Element<'_, SettingsMessage> {
        let profile = &self.draft.profile;
        let input = |placeholder: &'static str, value: &'_ str, update: fn(String) -> ProfileUpdate| {
            text_input(placeholder, value)
                .on_input(move |v| SettingsMessage::Update(SettingsUpdate::Profile(update(v))))
                .padding(8)
                .width(Length::Fixed(280.0))
        };
        column![
            Self::setting(
                "Display name",
                "Shown to your contacts",
                input("Your name", &profile.name, ProfileUpdate::Name),
                theme
            ),
            Self::setting(
                "Username",
                "Others can find you by it",
                input("@username", &profile.username, ProfileUpdate::Username),
                theme
            ),
            Self::setting(
                "Email",
                "Used for account notifications",
                input("you@example.com", &profile.email, ProfileUpdate::Email),
                theme
            ),
            Self::setting(
                "Phone",
                "Optional",
                input("+1 (555) 000-0000", &profile.phone, ProfileUpdate::Phone),
                theme
            ),
            Self::setting(
                "Bio",
                "A few words about you",
                input("Bio", &profile.bio, ProfileUpdate::Bio),
                theme
            ),
        ]
        .spacing(16)
        .into()
    }

    fn build_notifications(&self, theme: &Theme) -> Element<'_, SettingsMessage> {
        let prefs = &self.draft.notifications;
        let switch = |label, description, value, update: fn(bool) -> NotificationsUpdate| {
            Self::switch(
                label,
                description,
                value,
                move |on| SettingsUpdate::Notifications(update(on)),
                theme,
            )
        };
        let mut content = column![
            switch(
                "Push notifications",
                "Receive notifications on this device",
                prefs.push_notifications,
                NotificationsUpdate::Push
            ),
            switch(
                "Email notifications",
                "Receive a summary by email",
                prefs.email_notifications,
                NotificationsUpdate::Email
            ),
            switch(
                "Messages",
                "New direct messages",
                prefs.message_notifications,
                NotificationsUpdate::Message
            ),
            switch(
                "Calls",
                "Incoming and missed calls",
                prefs.call_notifications,
                NotificationsUpdate::Call
            ),
            switch(
                "Groups",
                "Activity in group chats",
                prefs.group_notifications,
                NotificationsUpdate::Group
            ),
            switch(
                "Sound",
                "Play sounds for notifications and calls",
                prefs.sound_enabled,
                NotificationsUpdate::Sound
            ),
            switch(
                "Vibration",
                "Vibrate on supported devices",
                prefs.vibration_enabled,
                NotificationsUpdate::Vibration
            ),
            switch(
                "Do not disturb",
                "Silence all notifications",
                prefs.do_not_disturb_mode,
                NotificationsUpdate::DoNotDisturb
            ),
            switch(
                "Quiet hours",
                "Silence notifications during a daily window",
                prefs.quiet_hours.enabled,
                NotificationsUpdate::QuietHoursEnabled
            ),
        ]
        .spacing(16);
        if prefs.quiet_hours.enabled {
            let window = row![
                text_input("22:00", &prefs.quiet_hours.start)
                    .on_input(|v| {
                        SettingsMessage::Update(SettingsUpdate::Notifications(
                            NotificationsUpdate::QuietHoursStart(v),
                        ))
                    })
                    .padding(8)
                    .width(Length::Fixed(80.0)),
                text("to").size(13),
                text_input("08:00", &prefs.quiet_hours.end)
                    .on_input(|v| {
                        SettingsMessage::Update(SettingsUpdate::Notifications(
                            NotificationsUpdate::QuietHoursEnd(v),
                        ))
                    })
                    .padding(8)
                    .width(Length::Fixed(80.0)),
            ]
            .spacing(8)
            .align_y(Alignment::Center);
            content = content.push(Self::setting("Window", "Start and end, HH:MM", window, theme));
        }
        content.into()
    }

    fn build_privacy(&self, theme: &Theme) -> Element<'_, SettingsMessage> {
        let privacy = &self.draft.privacy;
        let switch = |label, description, value, update: fn(bool) -> PrivacyUpdate| {
            Self::switch(
                label,
                description,
                value,
                move |on| SettingsUpdate::Privacy(update(on)),
                theme,
            )
        };
        let visibility =
            |label, description, value: Visibility, update: fn(Visibility) -> PrivacyUpdate| {
                Self::setting(
                    label,
                    description,
                    pick_list(Visibility::ALL, Some(value), move |v| {
                        SettingsMessage::Update(SettingsUpdate::Privacy(update(v)))
                    })
                    .width(Length::Fixed(160.0)),
                    theme,
                )
            };

        let mut blocked = column![].spacing(6);
        if privacy.blocked_users.is_empty() {
            blocked = blocked.push(hint("No blocked users", theme));
        }
        for user in &privacy.blocked_users {
            blocked = blocked.push(
                row![
                    text(user).size(14).width(Length::Fill),
                    button(text("Unblock").size(12))
                        .on_press(SettingsMessage::Update(SettingsUpdate::Privacy(
                            PrivacyUpdate::UnblockUser(user.clone()),
                        )))
                        .padding([4, 10])
                        .style(button::secondary),
                ]
                .align_y(Alignment::Center),
            );
        }
        let can_block = !self.block_input.trim().is_empty();
        blocked = blocked.push(
            row![
                text_input("Username to block", &self.block_input)
                    .on_input(SettingsMessage::BlockInputChanged)
                    .on_submit(SettingsMessage::BlockSubmit)
                    .padding(8),
                button(text("Block").size(13))
                    .on_press_maybe(can_block.then_some(SettingsMessage::BlockSubmit))
                    .style(move |t: &Theme, status| styles::button_danger(t, status)),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );

        column![
            switch(
                "Online status",
                "Let contacts see when you are online",
                privacy.online_status,
                PrivacyUpdate::OnlineStatus
            ),
            switch(
                "Last seen",
                "Show when you were last active",
                privacy.last_seen,
                PrivacyUpdate::LastSeen
            ),
            switch(
                "Read receipts",
                "Let senders know you read their messages",
                privacy.read_receipts,
                PrivacyUpdate::ReadReceipts
            ),
            visibility(
                "Profile photo",
                "Who can see your photo",
                privacy.profile_photo_visibility,
                PrivacyUpdate::ProfilePhotoVisibility
            ),
            visibility(
                "Calls",
                "Who can call you",
                privacy.who_can_call_me,
                PrivacyUpdate::WhoCanCallMe
            ),
            visibility(
                "Messages",
                "Who can message you",
                privacy.who_can_message_me,
                PrivacyUpdate::WhoCanMessageMe
            ),
            text("Blocked users")
                .size(14)
                .color(colors::text_primary(theme)),
            blocked,
        ]
        .spacing(16)
        .into()
    }

    fn build_audio(&self, theme: &Theme) -> Element<'_, SettingsMessage> {
        let audio = &self.draft.audio;
        let switch = |label, description, value, update: fn(bool) -> AudioUpdate| {
            Self::switch(
                label,
                description,
                value,
                move |on| SettingsUpdate::Audio(update(on)),
                theme,
            )
        };
        let device = |options: [&'static str; 3], current: &str, update: fn(String) -> AudioUpdate| {
            let selected = options.iter().copied().find(|option| *option == current);
            pick_list(options, selected, move |name: &'static str| {
                SettingsMessage::Update(SettingsUpdate::Audio(update(name.to_string())))
            })
            .width(Length::Fixed(200.0))
        };
        let volume = |value: u8, update: fn(u8) -> AudioUpdate| {
            row![
                slider(0..=100u8, value, move |v| {
                    SettingsMessage::Update(SettingsUpdate::Audio(update(v)))
                })
                .width(Length::Fixed(160.0)),
                text(format!("{}%", value)).size(12),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
        };
        column![
            Self::setting(
                "Microphone",
                "Input device",
                device(
                    MICROPHONES,
                    &audio.default_microphone,
                    AudioUpdate::DefaultMicrophone
                ),
                theme
            ),
            Self::setting(
                "Speaker",
                "Output device",
                device(SPEAKERS, &audio.default_speaker, AudioUpdate::DefaultSpeaker),
                theme
            ),
            Self::setting(
                "Microphone volume",
                "Input level",
                volume(audio.microphone_volume, AudioUpdate::MicrophoneVolume),
                theme
            ),
            Self::setting(
                "Speaker volume",
                "Output level",
                volume(audio.speaker_volume, AudioUpdate::SpeakerVolume),
                theme
            ),
            switch(
                "Echo cancellation",
                "Remove echo from your microphone",
                audio.echo_cancellation,
                AudioUpdate::EchoCancellation
            ),
            switch(
                "Noise suppression",
                "Filter background noise",
                audio.noise_suppression,
                AudioUpdate::NoiseSuppression
            ),
            switch(
                "Automatic gain control",
                "Keep your volume steady",
                audio.automatic_gain_control,
                AudioUpdate::AutomaticGainControl
            ),
        ]
        .spacing(16)
        .into()
    }

    fn build_video(&self, theme: &Theme) -> Element<'_, SettingsMessage> {
        let video = &self.draft.video;
        let switch = |label, description, value, update: fn(bool) -> VideoUpdate| {
            Self::switch(
                label,
                description,
                value,
                move |on| SettingsUpdate::Video(update(on)),
                theme,
            )
        };
        let camera = CAMERAS
            .iter()
            .copied()
            .find(|option| *option == video.default_camera);
        column![
            Self::setting(
                "Camera",
                "Capture device",
                pick_list(CAMERAS, camera, |name: &'static str| {
                    SettingsMessage::Update(SettingsUpdate::Video(VideoUpdate::DefaultCamera(
                        name.to_string(),
                    )))
                })
                .width(Length::Fixed(200.0)),
                theme
            ),
            Self::setting(
                "Quality",
                "Resolution sent to others",
                pick_list(CameraQuality::ALL, Some(video.camera_quality), |q| {
                    SettingsMessage::Update(SettingsUpdate::Video(VideoUpdate::CameraQuality(q)))
                })
                .width(Length::Fixed(200.0)),
                theme
            ),
            switch(
                "Background blur",
                "Blur what is behind you",
                video.background_blur,
                VideoUpdate::BackgroundBlur
            ),
            switch(
                "Virtual background",
                "Replace your background",
                video.virtual_background,
                VideoUpdate::VirtualBackground
            ),
            switch(
                "Mirror video",
                "Flip your own preview",
                video.mirror_video,
                VideoUpdate::MirrorVideo
            ),
        ]
        .spacing(16)
        .into()
    }

    fn build_general<'a>(&'a self, ctx: &AppContext, theme: &Theme) -> Element<'a, SettingsMessage> {
        let general = &self.draft.general;
        let switch = |label, description, value, update: fn(bool) -> GeneralUpdate| {
            Self::switch(
                label,
                description,
                value,
                move |on| SettingsUpdate::General(update(on)),
                theme,
            )
        };

        let current = ctx.theme.mode();
        let mut themes = row![].spacing(8);
        for mode in ThemeMode::ALL {
            let source = match mode {
                ThemeMode::Light => icons::LIGHT_MODE,
                ThemeMode::Dark => icons::DARK_MODE,
                ThemeMode::System => icons::SYSTEM_MODE,
            };
            let active = mode == current;
            themes = themes.push(
                button(
                    row![
                        icon(source, 16.0, colors::text_primary(theme)),
                        text(mode.label()).size(13)
                    ]
                    .spacing(6)
                    .align_y(Alignment::Center),
                )
                .on_press(SettingsMessage::ThemeSelected(mode))
                .padding([8, 16])
                .style(if active {
                    button::primary
                } else {
                    button::secondary
                }),
            );
        }

        let language_names = LANGUAGES.map(|(_, name)| name);
        let language = LANGUAGES
            .iter()
            .find(|(code, _)| *code == general.language)
            .map(|(_, name)| *name);

        column![
            Self::setting("Theme", "Applied immediately", themes, theme),
            Self::setting(
                "Language",
                "Interface language",
                pick_list(language_names, language, |name: &'static str| {
                    let code = LANGUAGES
                        .iter()
                        .find(|(_, n)| *n == name)
                        .map(|(code, _)| *code)
                        .unwrap_or(name);
                    SettingsMessage::Update(SettingsUpdate::General(GeneralUpdate::Language(
                        code.to_string(),
                    )))
                })
                .width(Length::Fixed(200.0)),
                theme
            ),
            Self::setting(
                "Font size",
                "Text size in chats",
                pick_list(FontSize::ALL, Some(general.font_size), |size| {
                    SettingsMessage::Update(SettingsUpdate::General(GeneralUpdate::FontSize(size)))
                })
                .width(Length::Fixed(200.0)),
                theme
            ),
            Self::setting(
                "Data usage",
                "Media quality on metered networks",
                pick_list(DataUsage::ALL, Some(general.data_usage), |usage| {
                    SettingsMessage::Update(SettingsUpdate::General(GeneralUpdate::DataUsage(
                        usage,
                    )))
                })
                .width(Length::Fixed(200.0)),
                theme
            ),
            switch(
                "Start on login",
                "Open Phindi when you sign in",
                general.auto_start,
                GeneralUpdate::AutoStart
            ),
            switch(
                "Minimize to tray",
                "Keep running when minimized",
                general.minimize_to_tray,
                GeneralUpdate::MinimizeToTray
            ),
            switch(
                "Close to tray",
                "Keep running when the window is closed",
                general.close_to_tray,
                GeneralUpdate::CloseToTray
            ),
        ]
        .spacing(16)
        .into()
    }
}

impl Screen for SettingsScreen {
    type Message = SettingsMessage;

    fn update(
        &mut self,
        message: SettingsMessage,
        ctx: &mut AppContext,
    ) -> ScreenCommand<SettingsMessage> {
        match message {
            SettingsMessage::SectionSelected(section) => self.section = section,
            SettingsMessage::Update(update) => {
                self.draft = self.draft.apply(update);
                self.status = None;
            }
            SettingsMessage::ThemeSelected(mode) => {
                self.draft = self
                    .draft
                    .apply(SettingsUpdate::General(GeneralUpdate::Theme(mode)));
                let task = ctx.set_theme_mode(mode);
                return ScreenCommand::Message(task.map(|_| SettingsMessage::ThemeSaved));
            }
            SettingsMessage::ThemeSaved => {}
            SettingsMessage::BlockInputChanged(value) => self.block_input = value,
            SettingsMessage::BlockSubmit => {
                let user = std::mem::take(&mut self.block_input);
                if !user.trim().is_empty() {
                    self.draft = self
                        .draft
                        .apply(SettingsUpdate::Privacy(PrivacyUpdate::BlockUser(user)));
                }
            }
            SettingsMessage::SaveSettings => {
                ctx.settings = self.draft.clone();
                return ScreenCommand::Message(
                    ctx.save_settings().map(SettingsMessage::SaveComplete),
                );
            }
            SettingsMessage::CancelSettings => {
                self.draft = ctx.settings.clone();
                self.status = None;
            }
            SettingsMessage::ResetToDefault => {
                return ScreenCommand::Message(
                    ctx.reset_settings().map(SettingsMessage::ResetComplete),
                );
            }
            SettingsMessage::SaveComplete(result) => {
                self.status = Some(result.map(|()| "Settings saved".to_string()));
            }
            SettingsMessage::ResetComplete(result) => match result {
                Ok(mut defaults) => {
                    // The theme lives under its own key and survives a reset.
                    defaults.general.theme = ctx.theme.mode();
                    ctx.settings = defaults;
                    self.draft = ctx.settings.clone();
                    self.status = Some(Ok("Settings reset to defaults".to_string()));
                }
                Err(err) => self.status = Some(Err(err)),
            },
        }
        ScreenCommand::None
    }

    fn view<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, SettingsMessage> {
        let header = container(
            row![text("Settings").size(24), Space::with_width(Length::Fill)]
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::ZERO.bottom(16));

        let mut tabs = column![].spacing(4).width(Length::Fixed(180.0));
        for section in SettingsSection::ALL {
            let active = section == self.section;
            tabs = tabs.push(
                button(text(section.label()).size(14))
                    .width(Length::Fill)
                    .padding([8, 12])
                    .on_press(SettingsMessage::SectionSelected(section))
                    .style(move |t: &Theme, status| {
                        if active {
                            styles::button_nav_active(t, status)
                        } else {
                            styles::button_icon(t, status)
                        }
                    }),
            );
        }

        let body = match self.section {
            SettingsSection::Profile => self.build_profile(theme),
            SettingsSection::Notifications => self.build_notifications(theme),
            SettingsSection::Privacy => self.build_privacy(theme),
            SettingsSection::Audio => self.build_audio(theme),
            SettingsSection::Video => self.build_video(theme),
            SettingsSection::General => self.build_general(ctx, theme),
        };
        let section = container(
            column![
                text(self.section.label()).size(18),
                Space::with_height(8),
                body
            ]
            .spacing(4),
        )
        .padding(20)
        .width(Length::Fill)
        .style(styles::card);

        let has_changes = self.has_changes(ctx);
        let status: Element<'a, SettingsMessage> = match &self.status {
            Some(Ok(info)) => text(info).size(12).color(colors::text_success(theme)).into(),
            Some(Err(err)) => text(err).size(12).color(colors::text_error(theme)).into(),
            None if has_changes => hint("You have unsaved changes", theme),
            None => Space::with_width(0).into(),
        };
        // Action buttons
        let actions = container(
            row![
                button(text("Reset to Default").size(14))
                    .on_press(SettingsMessage::ResetToDefault)
                    .padding([6, 12])
                    .style(button::secondary),
                Space::with_width(12),
                status,
                Space::with_width(Length::Fill),
                button(text("Cancel").size(14))
                    .on_press_maybe(has_changes.then_some(SettingsMessage::CancelSettings))
                    .padding([6, 12])
                    .style(button::secondary),
                Space::with_width(8),
                button(text("Save").size(14))
                    .on_press_maybe(has_changes.then_some(SettingsMessage::SaveSettings))
                    .padding([6, 12])
                    .style(if has_changes {
                        button::primary
                    } else {
                        button::secondary
                    }),
            ]
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::ZERO.top(16));

        let content = column![
            header,
            row![tabs, scrollable(section).height(Length::Fill)]
                .spacing(16)
                .height(Length::Fill),
            actions,
        ]
        .spacing(0);
        container(content)
            .padding(Padding::from([20, 24]))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
