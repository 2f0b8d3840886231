use iced::widget::{Space, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Color, Element, Length, Padding, Theme};

use crate::contact::{ContactFilter, NewContact, format_last_seen};
use crate::models::{Contact, ContactId, DateTime};
use crate::ui::AppContext;
use crate::ui::components::{avatar, avatar_with_presence, hint};
use crate::ui::core::{Route, Screen, ScreenCommand};
use crate::ui::icons::{self, icon};
use crate::ui::theme::{colors, styles};

#[derive(Clone, Debug)]
pub enum ContactsMessage {
    QueryChanged(String),
    FilterChanged(ContactFilter),
    SelectContact(ContactId),
    CloseDetails,
    ToggleStar(ContactId),
    Message(ContactId),
    Call(ContactId),
    VideoCall(ContactId),
    // Add contact form
    ShowAddForm,
    HideAddForm,
    NameChanged(String),
    UsernameChanged(String),
    EmailChanged(String),
    SubmitNewContact,
}

#[derive(Default)]
pub struct ContactsScreen {
    query: String,
    filter: ContactFilter,
    selected: Option<ContactId>,
    new_contact: Option<NewContact>,
    error: Option<String>,
}

impl ContactsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_call(
        ctx: &mut AppContext,
        id: ContactId,
        route: Route,
    ) -> ScreenCommand<ContactsMessage> {
        let Some(contact) = ctx.contacts.get(id) else {
            return ScreenCommand::None;
        };
        ctx.call_peer = Some(contact.peer());
        ScreenCommand::ChangeScreen(route)
    }

    fn build_header<'a>(&self, ctx: &AppContext, theme: &Theme) -> Element<'a, ContactsMessage> {
        let summary = format!(
            "{} contacts, {} online",
            ctx.contacts.len(),
            ctx.contacts.online_count()
        );
        container(
            row![
                column![
                    text("Contacts").size(20).color(colors::text_primary(theme)),
                    hint(summary, theme),
                ]
                .spacing(2),
                Space::with_width(Length::Fill),
                button(
                    row![
                        icon(icons::ADD, 16.0, colors::text_primary(theme)),
                        text("Add Contact").size(13)
                    ]
                    .spacing(6)
                    .align_y(Alignment::Center),
                )
                .on_press(ContactsMessage::ShowAddForm)
                .padding([6, 12])
                .style(button::primary),
            ]
            .align_y(Alignment::Center),
        )
        .padding(Padding::from([16, 20]))
        .into()
    }

    fn build_toolbar(&self) -> Element<'_, ContactsMessage> {
        let search = text_input("Search contacts...", &self.query)
            .on_input(ContactsMessage::QueryChanged)
            .padding(8)
            .size(14)
            .width(Length::Fill);

        let mut tabs = row![].spacing(4);
        for filter in ContactFilter::ALL {
            let active = filter == self.filter;
            tabs = tabs.push(
                button(text(filter.label()).size(13))
                    .padding([4, 12])
                    .on_press(ContactsMessage::FilterChanged(filter))
                    .style(move |t: &Theme, status| {
                        if active {
                            styles::button_nav_active(t, status)
                        } else {
                            styles::button_icon(t, status)
                        }
                    }),
            );
        }
        column![search, tabs].spacing(8).padding([0, 20]).into()
    }

    fn build_add_form<'a>(&'a self, form: &'a NewContact, theme: &Theme) -> Element<'a, ContactsMessage> {
        let mut content = column![
            text("Add Contact").size(16).color(colors::text_primary(theme)),
            text_input("Full name", &form.name)
                .on_input(ContactsMessage::NameChanged)
                .padding(8),
            text_input("@username", &form.username)
                .on_input(ContactsMessage::UsernameChanged)
                .padding(8),
            text_input("Email (optional)", &form.email)
                .on_input(ContactsMessage::EmailChanged)
                .on_submit(ContactsMessage::SubmitNewContact)
                .padding(8),
        ]
        .spacing(8);
        if let Some(error) = &self.error {
            content = content.push(text(error).size(12).color(colors::text_error(theme)));
        }
        content = content.push(
            row![
                Space::with_width(Length::Fill),
                button(text("Cancel").size(13))
                    .on_press(ContactsMessage::HideAddForm)
                    .style(button::secondary),
                button(text("Add").size(13))
                    .on_press(ContactsMessage::SubmitNewContact)
                    .style(button::primary),
            ]
            .spacing(8),
        );
        container(content)
            .padding(16)
            .style(styles::card)
            .into()
    }

    fn build_contact_row<'a>(
        &self,
        contact: &'a Contact,
        now: DateTime,
        theme: &Theme,
    ) -> Element<'a, ContactsMessage> {
        let icon_color = colors::text_primary(theme);
        let star = if contact.starred {
            icons::STAR
        } else {
            icons::STAR_OUTLINE
        };
        let star_color = if contact.starred {
            colors::primary(theme)
        } else {
            colors::text_muted(theme)
        };
        let details = column![
            text(&contact.name).size(14).color(colors::text_primary(theme)),
            text(format!(
                "{} · {}",
                contact.username,
                format_last_seen(contact, now)
            ))
            .size(12)
            .color(colors::text_secondary(theme)),
        ]
        .spacing(2)
        .width(Length::Fill);

        let selected = self.selected == Some(contact.id);
        let entry = button(
            row![
                avatar_with_presence(&contact.name, 40.0, contact.presence),
                details
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(8)
        .on_press(ContactsMessage::SelectContact(contact.id))
        .style(move |t: &Theme, status| {
            if selected {
                styles::button_nav_active(t, status)
            } else {
                styles::button_icon(t, status)
            }
        });

        let action = |source: &'static str, color: Color, message: ContactsMessage| {
            button(icon(source, 18.0, color))
                .on_press(message)
                .padding(6)
                .style(move |t: &Theme, status| styles::button_icon(t, status))
        };
        row![
            entry,
            action(star, star_color, ContactsMessage::ToggleStar(contact.id)),
            action(icons::CHAT, icon_color, ContactsMessage::Message(contact.id)),
            action(icons::PHONE, icon_color, ContactsMessage::Call(contact.id)),
            action(icons::VIDEO, icon_color, ContactsMessage::VideoCall(contact.id)),
        ]
        .spacing(4)
        .align_y(Alignment::Center)
        .into()
    }

    fn build_details<'a>(&self, contact: &'a Contact, now: DateTime, theme: &Theme) -> Element<'a, ContactsMessage> {
        let field = |label: &'static str, value: Option<String>| -> Element<'a, ContactsMessage> {
            match value {
                Some(value) => column![
                    text(label).size(11).color(colors::text_muted(theme)),
                    text(value).size(14).color(colors::text_primary(theme)),
                ]
                .spacing(2)
                .into(),
                None => Space::new(Length::Shrink, Length::Shrink).into(),
            }
        };
        let content = column![
            row![
                Space::with_width(Length::Fill),
                button(icon(icons::CLOSE, 16.0, colors::text_secondary(theme)))
                    .on_press(ContactsMessage::CloseDetails)
                    .padding(4)
                    .style(move |t: &Theme, status| styles::button_icon(t, status)),
            ],
            container(avatar(&contact.name, 80.0)).center_x(Length::Fill),
            container(text(&contact.name).size(18).color(colors::text_primary(theme)))
                .center_x(Length::Fill),
            container(hint(
                format!("{} · {}", contact.username, contact.presence.label()),
                theme
            ))
            .center_x(Length::Fill),
            field("Bio", contact.bio.clone()),
            field("Phone", contact.phone.clone()),
            field("Email", contact.email.clone()),
            field("Last seen", Some(format_last_seen(contact, now))),
            field(
                "Mutual friends",
                contact.mutual_friends.map(|count| count.to_string())
            ),
            row![
                button(text("Message").size(13))
                    .on_press(ContactsMessage::Message(contact.id))
                    .style(button::primary),
                button(text("Call").size(13))
                    .on_press(ContactsMessage::Call(contact.id))
                    .style(button::secondary),
                button(text("Video").size(13))
                    .on_press(ContactsMessage::VideoCall(contact.id))
                    .style(button::secondary),
            ]
            .spacing(8),
        ]
        .spacing(12);
        container(content)
            .padding(16)
            .width(Length::Fixed(300.0))
            .style(styles::card)
            .into()
    }
}

impl Screen for ContactsScreen {
    type Message = ContactsMessage;

    fn update(
        &mut self,
        message: ContactsMessage,
        ctx: &mut AppContext,
    ) -> ScreenCommand<ContactsMessage> {
        match message {
            ContactsMessage::QueryChanged(query) => self.query = query,
            ContactsMessage::FilterChanged(filter) => self.filter = filter,
            ContactsMessage::SelectContact(id) => self.selected = Some(id),
            ContactsMessage::CloseDetails => self.selected = None,
            ContactsMessage::ToggleStar(id) => {
                ctx.contacts.toggle_star(id);
            }
            ContactsMessage::Message(id) => {
                if !ctx.inbox.select(id) {
                    tracing::debug!(contact_id = id, "No conversation for contact");
                }
                return ScreenCommand::ChangeScreen(Route::Chats);
            }
            ContactsMessage::Call(id) => return Self::start_call(ctx, id, Route::VoiceCall),
            ContactsMessage::VideoCall(id) => return Self::start_call(ctx, id, Route::VideoCall),
            ContactsMessage::ShowAddForm => {
                self.new_contact = Some(NewContact::default());
                self.error = None;
            }
            ContactsMessage::HideAddForm => {
                self.new_contact = None;
                self.error = None;
            }
            ContactsMessage::NameChanged(value) => {
                if let Some(form) = self.new_contact.as_mut() {
                    form.name = value;
                }
            }
            ContactsMessage::UsernameChanged(value) => {
                if let Some(form) = self.new_contact.as_mut() {
                    form.username = value;
                }
            }
            ContactsMessage::EmailChanged(value) => {
                if let Some(form) = self.new_contact.as_mut() {
                    form.email = value;
                }
            }
            ContactsMessage::SubmitNewContact => {
                let Some(form) = self.new_contact.clone() else {
                    return ScreenCommand::None;
                };
                match ctx.contacts.add_contact(form) {
                    Ok(id) => {
                        self.new_contact = None;
                        self.error = None;
                        self.selected = Some(id);
                    }
                    Err(err) => self.error = Some(err.to_string()),
                }
            }
        }
        ScreenCommand::None
    }

    fn view<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, ContactsMessage> {
        let now = DateTime::now();
        let contacts = ctx.contacts.filtered(&self.query, self.filter);

        let mut list = column![].spacing(2);
        if contacts.is_empty() {
            list = list.push(
                container(
                    text("No contacts found")
                        .size(13)
                        .color(colors::text_muted(theme)),
                )
                .padding(16),
            );
        }
        for contact in contacts {
            list = list.push(self.build_contact_row(contact, now, theme));
        }

        let mut main = column![self.build_header(ctx, theme)].spacing(12);
        if let Some(form) = &self.new_contact {
            main = main.push(container(self.build_add_form(form, theme)).padding([0, 20]));
        }
        main = main
            .push(self.build_toolbar())
            .push(scrollable(list.padding([0, 20])).height(Length::Fill));

        let mut layout = row![container(main).width(Length::Fill).height(Length::Fill)];
        if let Some(contact) = self.selected.and_then(|id| ctx.contacts.get(id)) {
            layout = layout.push(container(self.build_details(contact, now, theme)).padding(16));
        }
        layout.height(Length::Fill).into()
    }
}
