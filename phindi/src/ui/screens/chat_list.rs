use std::time::Instant;

use iced::widget::{Space, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Padding, Theme};

use crate::chat::ChatFilter;
use crate::models::{ChatSummary, ContactId, Message, MessageId, Peer, Presence};
use crate::ui::components::{avatar_with_presence, badge, divider};
use crate::ui::core::{Route, Screen, ScreenCommand};
use crate::ui::icons::{self, icon};
use crate::ui::theme::{colors, styles};
use crate::ui::{AppContext, UiEvent};

#[derive(Clone, Debug)]
pub enum ChatListMessage {
    SelectChat(ContactId),
    FilterChanged(ChatFilter),
    ComposeChanged(String),
    SendMessage,
    DeleteMessage(MessageId),
    StartVoiceCall,
    StartVideoCall,
}

pub struct ChatListScreen {
    filter: ChatFilter,
    compose_text: String,
    messages_scrollable_id: scrollable::Id,
}

impl Default for ChatListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatListScreen {
    pub fn new() -> Self {
        Self {
            filter: ChatFilter::All,
            compose_text: String::new(),
            messages_scrollable_id: scrollable::Id::unique(),
        }
    }

    fn scroll_to_end(&self) -> ScreenCommand<ChatListMessage> {
        ScreenCommand::Message(scrollable::snap_to(
            self.messages_scrollable_id.clone(),
            scrollable::RelativeOffset::END,
        ))
    }

    /// Call counterpart for the open chat.
    fn selected_peer(ctx: &AppContext) -> Option<Peer> {
        let selected = ctx.inbox.selected()?;
        if let Some(contact) = ctx.contacts.get(selected) {
            return Some(contact.peer());
        }
        ctx.inbox
            .summary(selected)
            .map(|summary| Peer::new(summary.name.clone(), summary.avatar.clone(), ""))
    }

    fn build_left_panel<'a>(&'a self, ctx: &'a AppContext, theme: &Theme) -> Element<'a, ChatListMessage> {
        let header = container(
            row![
                text("Chats").size(18).color(colors::text_primary(theme)),
                Space::with_width(Length::Fill),
                badge(ctx.inbox.unread_total() as usize),
            ]
            .align_y(Alignment::Center),
        )
        .padding(Padding::from([12, 16]));

        let mut tabs = row![].spacing(4);
        for filter in ChatFilter::ALL {
            let active = filter == self.filter;
            tabs = tabs.push(
                button(text(filter.label()).size(13))
                    .padding([4, 12])
                    .on_press(ChatListMessage::FilterChanged(filter))
                    .style(move |t: &Theme, status| {
                        if active {
                            styles::button_nav_active(t, status)
                        } else {
                            styles::button_icon(t, status)
                        }
                    }),
            );
        }

        let summaries = ctx.inbox.summaries(self.filter);
        let list: Element<'a, ChatListMessage> = if summaries.is_empty() {
            container(
                text("No conversations")
                    .size(13)
                    .color(colors::text_muted(theme)),
            )
            .padding(16)
            .into()
        } else {
            let mut col = column![].spacing(2);
            for summary in summaries {
                let selected = ctx.inbox.selected() == Some(summary.contact_id);
                col = col.push(self.build_chat_entry(summary, selected, theme));
            }
            scrollable(col.padding([0, 8])).height(Length::Fill).into()
        };

        container(
            column![
                header,
                container(tabs).padding([0, 12]),
                Space::with_height(8),
                list
            ]
            .height(Length::Fill),
        )
        .width(Length::Fixed(300.0))
        .height(Length::Fill)
        .style(styles::sidebar)
        .into()
    }

    fn build_chat_entry<'a>(
        &self,
        summary: &'a ChatSummary,
        selected: bool,
        theme: &Theme,
    ) -> Element<'a, ChatListMessage> {
        let presence = if summary.online {
            Presence::Online
        } else {
            Presence::Offline
        };
        let details = column![
            row![
                text(&summary.name).size(14).color(colors::text_primary(theme)),
                Space::with_width(Length::Fill),
                text(&summary.timestamp)
                    .size(11)
                    .color(colors::text_muted(theme)),
            ],
            row![
                text(&summary.last_message)
                    .size(12)
                    .color(colors::text_secondary(theme))
                    .width(Length::Fill),
                badge(summary.unread as usize),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        ]
        .spacing(2)
        .width(Length::Fill);

        button(
            row![avatar_with_presence(&summary.name, 40.0, presence), details]
                .spacing(10)
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(8)
        .on_press(ChatListMessage::SelectChat(summary.contact_id))
        .style(move |t: &Theme, status| {
            if selected {
                styles::button_nav_active(t, status)
            } else {
                styles::button_icon(t, status)
            }
        })
        .into()
    }

    fn build_right_panel<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, ChatListMessage> {
        let Some(summary) = ctx.inbox.selected().and_then(|id| ctx.inbox.summary(id)) else {
            return container(
                text("Select a chat to start messaging")
                    .size(16)
                    .color(colors::text_muted(theme)),
            )
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
        };
        column![
            self.build_chat_header(summary, theme),
            divider(),
            self.build_chat_body(ctx, summary, theme),
            self.build_chat_footer(theme),
        ]
        .height(Length::Fill)
        .into()
    }

    fn build_chat_header<'a>(&self, summary: &'a ChatSummary, theme: &Theme) -> Element<'a, ChatListMessage> {
        let icon_color = colors::text_primary(theme);
        let (presence, status_label) = if summary.online {
            (Presence::Online, "Online")
        } else {
            (Presence::Offline, "Offline")
        };
        container(
            row![
                avatar_with_presence(&summary.name, 40.0, presence),
                column![
                    text(&summary.name).size(16).color(colors::text_primary(theme)),
                    text(status_label)
                        .size(12)
                        .color(colors::text_secondary(theme)),
                ]
                .spacing(2),
                Space::with_width(Length::Fill),
                button(icon(icons::PHONE, 20.0, icon_color))
                    .on_press(ChatListMessage::StartVoiceCall)
                    .padding(6)
                    .style(move |t: &Theme, status| styles::button_icon(t, status)),
                button(icon(icons::VIDEO, 20.0, icon_color))
                    .on_press(ChatListMessage::StartVideoCall)
                    .padding(6)
                    .style(move |t: &Theme, status| styles::button_icon(t, status)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        )
        .padding(Padding::from([10, 16]))
        .width(Length::Fill)
        .style(styles::chat_header)
        .into()
    }

    fn build_message<'a>(
        &self,
        message: &'a Message,
        font_size: u16,
        theme: &Theme,
    ) -> Element<'a, ChatListMessage> {
        let is_mine = message.is_mine();
        let mut meta = row![text(message.created_at.format_clock()).size(10)].spacing(4);
        if let Some(status) = message.status() {
            meta = meta.push(text(status.ticks()).size(10));
        }
        let bubble = container(column![text(message.text()).size(font_size), meta].spacing(4))
            .padding(10)
            .max_width(400)
            .style(if is_mine {
                styles::message_outgoing
            } else {
                styles::message_incoming
            });

        if is_mine {
            let delete = button(icon(icons::DELETE, 14.0, colors::text_muted(theme)))
                .on_press(ChatListMessage::DeleteMessage(message.id))
                .padding(4)
                .style(move |t: &Theme, status| styles::button_icon(t, status));
            row![Space::with_width(Length::Fill), delete, bubble, Space::with_width(12)]
                .spacing(4)
                .align_y(Alignment::Center)
                .into()
        } else {
            row![Space::with_width(12), bubble, Space::with_width(Length::Fill)].into()
        }
    }

    fn build_chat_body<'a>(
        &'a self,
        ctx: &'a AppContext,
        summary: &'a ChatSummary,
        theme: &Theme,
    ) -> Element<'a, ChatListMessage> {
        let font_size = ctx.settings.general.font_size.points();
        let mut col = column![].spacing(10);
        if let Some(conversation) = ctx.inbox.conversation(summary.contact_id) {
            for message in conversation.messages() {
                col = col.push(self.build_message(message, font_size, theme));
            }
            if conversation.is_typing() {
                col = col.push(
                    container(
                        text(format!("{} is typing...", summary.name))
                            .size(12)
                            .color(colors::text_muted(theme)),
                    )
                    .padding([0, 12]),
                );
            }
        }

        let sc = scrollable(col.padding(16))
            .height(Length::Fill)
            .id(self.messages_scrollable_id.clone());

        container(sc)
            .height(Length::Fill)
            .style(styles::page)
            .into()
    }

    fn build_chat_footer(&self, theme: &Theme) -> Element<'_, ChatListMessage> {
        let can_send = !self.compose_text.trim().is_empty();

        let mut send_btn = button(icon(icons::SEND, 20.0, colors::text_primary(theme))).padding(8);
        if can_send {
            send_btn = send_btn
                .on_press(ChatListMessage::SendMessage)
                .style(button::primary);
        } else {
            send_btn = send_btn.style(button::secondary);
        }

        let input = text_input("Type a message...", &self.compose_text)
            .on_input(ChatListMessage::ComposeChanged)
            .padding(10)
            .size(14)
            .width(Length::Fill)
            .on_submit(ChatListMessage::SendMessage);

        container(
            row![input, Space::with_width(8), send_btn]
                .align_y(Alignment::Center)
                .padding(12),
        )
        .width(Length::Fill)
        .style(styles::chat_header)
        .into()
    }
}

impl Screen for ChatListScreen {
    type Message = ChatListMessage;

    fn update(
        &mut self,
        message: ChatListMessage,
        ctx: &mut AppContext,
    ) -> ScreenCommand<ChatListMessage> {
        match message {
            ChatListMessage::SelectChat(contact_id) => {
                if ctx.inbox.select(contact_id) {
                    return self.scroll_to_end();
                }
                ScreenCommand::None
            }
            ChatListMessage::FilterChanged(filter) => {
                self.filter = filter;
                ScreenCommand::None
            }
            ChatListMessage::ComposeChanged(value) => {
                self.compose_text = value;
                ScreenCommand::None
            }
            ChatListMessage::SendMessage => {
                if ctx.inbox.send(&self.compose_text, Instant::now()).is_none() {
                    return ScreenCommand::None;
                }
                self.compose_text.clear();
                self.scroll_to_end()
            }
            ChatListMessage::DeleteMessage(id) => {
                if let Some(contact_id) = ctx.inbox.selected() {
                    ctx.inbox.delete_message(contact_id, id);
                }
                ScreenCommand::None
            }
            ChatListMessage::StartVoiceCall => {
                ctx.call_peer = Self::selected_peer(ctx);
                ScreenCommand::ChangeScreen(Route::VoiceCall)
            }
            ChatListMessage::StartVideoCall => {
                ctx.call_peer = Self::selected_peer(ctx);
                ScreenCommand::ChangeScreen(Route::VideoCall)
            }
        }
    }

    fn handle_ui_event(
        &mut self,
        event: UiEvent,
        ctx: &mut AppContext,
    ) -> ScreenCommand<ChatListMessage> {
        match event {
            UiEvent::MessageReceived { contact_id, .. }
                if ctx.inbox.selected() == Some(contact_id) =>
            {
                self.scroll_to_end()
            }
            UiEvent::TypingChanged {
                contact_id,
                typing: true,
            } if ctx.inbox.selected() == Some(contact_id) => self.scroll_to_end(),
            _ => ScreenCommand::None,
        }
    }

    fn view<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, ChatListMessage> {
        row![
            self.build_left_panel(ctx, theme),
            container(Space::new(Length::Fixed(1.0), Length::Fill)).style(styles::divider),
            container(self.build_right_panel(ctx, theme))
                .width(Length::Fill)
                .height(Length::Fill),
        ]
        .height(Length::Fill)
        .into()
    }
}

