use std::any::TypeId;
use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::futures::sink::SinkExt as _;
use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme, stream};
use tokio::sync::{Mutex as TokioMutex, mpsc};

use crate::appearance::{SystemScheme, ThemeController, ThemeMode, probe_system_dark};
use crate::audio::RingbackPlayer;
use crate::call::{CallKind, CallStatus};
use crate::chat::Inbox;
use crate::config::{ConfigManager, Settings};
use crate::contact::ContactDirectory;
use crate::media::{MediaDevices, SystemMediaDevices};
use crate::models::{NotificationKind, Peer, ProfileStats};
use crate::notification::NotificationCenter;
use crate::profile::ProfileEditor;
use crate::seed;
use crate::storage::{Storage, profile_dir};
use crate::ui::components::badge;
use crate::ui::core::{Route, Screen, ScreenCommand};
use crate::ui::icons;
use crate::ui::screens::{
    CallMessage, CallScreen, ChatListMessage, ChatListScreen, ContactsMessage, ContactsScreen,
    NotificationsMessage, NotificationsScreen, ProfileMessage, ProfileScreen, SettingsMessage,
    SettingsScreen,
};
use crate::ui::theme::{colors, styles, to_iced_theme};
use crate::ui::{UiEvent, UiEventListener};

/// Interval of the system color scheme probe while following the system.
const SCHEME_PROBE_INTERVAL: Duration = Duration::from_secs(2);

const STORAGE_UNAVAILABLE: &str = "Preferences storage is not available";

enum CurrentScreen {
    Chats(ChatListScreen),
    Contacts(ContactsScreen),
    Profile(ProfileScreen),
    Settings(SettingsScreen),
    Notifications(NotificationsScreen),
    Call(CallScreen),
}

pub struct AppContext {
    pub config: Option<ConfigManager>,
    /// Last saved settings.
    pub settings: Settings,
    pub theme: ThemeController,
    pub inbox: Inbox,
    pub contacts: ContactDirectory,
    pub notifications: NotificationCenter,
    pub profile: ProfileEditor,
    pub profile_stats: ProfileStats,
    pub media: Arc<dyn MediaDevices>,
    /// Counterpart of the next call screen to open.
    pub call_peer: Option<Peer>,
    pub ui_event_tx: mpsc::Sender<UiEvent>,
    pub ui_event_rx: Arc<TokioMutex<mpsc::Receiver<UiEvent>>>,
    pub ringback_player: Arc<TokioMutex<RingbackPlayer>>,
}

impl AppContext {
    fn new() -> Self {
        let (ui_event_tx, ui_event_rx) = mpsc::channel(100);
        let listener = Arc::new(UiEventListener::new(ui_event_tx.clone()));
        Self {
            config: None,
            settings: Settings::default(),
            theme: ThemeController::new(ThemeMode::default(), SystemScheme::detect()),
            inbox: seed::inbox(listener),
            contacts: ContactDirectory::new(seed::contacts()),
            notifications: NotificationCenter::new(seed::notifications()),
            profile: ProfileEditor::new(seed::user_profile()),
            profile_stats: seed::profile_stats(),
            media: Arc::new(SystemMediaDevices),
            call_peer: None,
            ui_event_tx,
            ui_event_rx: Arc::new(TokioMutex::new(ui_event_rx)),
            ringback_player: Arc::new(TokioMutex::new(RingbackPlayer::new())),
        }
    }

    pub fn listener(&self) -> Arc<UiEventListener> {
        Arc::new(UiEventListener::new(self.ui_event_tx.clone()))
    }

    /// Peer requested by the screen that started the call, or the default
    /// demo peer.
    pub fn take_call_peer(&mut self) -> Peer {
        self.call_peer.take().unwrap_or_else(seed::call_peer)
    }

    /// Write the current settings to storage.
    pub fn save_settings(&self) -> Task<Result<(), String>> {
        let Some(config) = self.config.clone() else {
            return Task::done(Err(STORAGE_UNAVAILABLE.to_string()));
        };
        let settings = self.settings.clone();
        Task::perform(
            async move {
                config.save_settings(&settings).await.map_err(|err| {
                    tracing::error!(?err, "Cannot save settings");
                    format!("{:#}", err)
                })
            },
            |result| result,
        )
    }

    /// Drop the stored settings. Resolves to the defaults.
    pub fn reset_settings(&self) -> Task<Result<Settings, String>> {
        let Some(config) = self.config.clone() else {
            return Task::done(Err(STORAGE_UNAVAILABLE.to_string()));
        };
        Task::perform(
            async move {
                config.reset_settings().await.map_err(|err| {
                    tracing::error!(?err, "Cannot reset settings");
                    format!("{:#}", err)
                })
            },
            |result| result,
        )
    }

    /// Persist the theme key and keep `general.theme` in sync.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) -> Task<()> {
        self.theme.set_mode(mode);
        self.settings.general.theme = mode;
        let Some(config) = self.config.clone() else {
            return Task::none();
        };
        Task::perform(
            async move {
                if let Err(err) = config.save_theme_mode(mode).await {
                    tracing::error!(?err, "Cannot save theme preference");
                }
            },
            |_| (),
        )
    }
}

/// Preferences read from the profile directory at startup.
#[derive(Clone)]
pub struct Preferences {
    config: ConfigManager,
    settings: Settings,
    theme: ThemeMode,
}

async fn load_preferences() -> Result<Preferences, anyhow::Error> {
    let dir = profile_dir()?;
    let storage = Storage::open(&dir).await?;
    let config = ConfigManager::new(Arc::new(TokioMutex::new(storage)));
    let settings = config.load_settings().await;
    let theme = config.load_theme_mode().await;
    Ok(Preferences {
        config,
        settings,
        theme,
    })
}

pub struct PhindiApp {
    screen: CurrentScreen,
    route: Route,
    history: Vec<Route>,
    theme: Theme,
    ctx: AppContext,
}

#[derive(Clone)]
pub enum AppMessage {
    // Wrapped screen messages
    ChatList(ChatListMessage),
    Contacts(ContactsMessage),
    Profile(ProfileMessage),
    Settings(SettingsMessage),
    Notifications(NotificationsMessage),
    Call(CallMessage),
    // Sidebar navigation
    Navigate(Route),
    Loaded(Result<Preferences, String>),
    // UI events from subscription
    UiEvent(UiEvent),
    Tick,
    ProbeSystemScheme,
    // Ringback player finished starting or stopping
    RingbackSettled,
}

impl std::fmt::Debug for AppMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppMessage::ChatList(_) => write!(f, "ChatList(<msg>)"),
            AppMessage::Contacts(_) => write!(f, "Contacts(<msg>)"),
            AppMessage::Profile(_) => write!(f, "Profile(<msg>)"),
            AppMessage::Settings(_) => write!(f, "Settings(<msg>)"),
            AppMessage::Notifications(_) => write!(f, "Notifications(<msg>)"),
            AppMessage::Call(_) => write!(f, "Call(<msg>)"),
            AppMessage::Navigate(route) => write!(f, "Navigate({})", route.path()),
            AppMessage::Loaded(result) => write!(f, "Loaded(ok: {})", result.is_ok()),
            AppMessage::UiEvent(_) => write!(f, "UiEvent(<event>)"),
            AppMessage::Tick => write!(f, "Tick"),
            AppMessage::ProbeSystemScheme => write!(f, "ProbeSystemScheme"),
            AppMessage::RingbackSettled => write!(f, "RingbackSettled"),
        }
    }
}

impl PhindiApp {
    pub fn new() -> (Self, Task<AppMessage>) {
        let ctx = AppContext::new();
        let theme = to_iced_theme(ctx.theme.resolved());
        let app = Self {
            screen: CurrentScreen::Chats(ChatListScreen::new()),
            route: Route::Chats,
            history: Vec::new(),
            theme,
            ctx,
        };
        let load = Task::perform(load_preferences(), |result| {
            AppMessage::Loaded(result.map_err(|err| format!("{:#}", err)))
        });
        (app, load)
    }

    /// Helper method to handle ScreenCommand and convert to Task<AppMessage>
    fn handle_screen_command<M, F>(&mut self, cmd: ScreenCommand<M>, wrap: F) -> Task<AppMessage>
    where
        M: Send + 'static,
        F: Fn(M) -> AppMessage + 'static + Send + Sync + Clone,
    {
        let task = match cmd {
            ScreenCommand::None => Task::none(),
            ScreenCommand::Message(task) => task.map(wrap),
            ScreenCommand::ChangeScreen(route) => {
                if route != self.route {
                    self.history.push(self.route);
                }
                self.open(route)
            }
            ScreenCommand::Back => {
                let route = self.history.pop().unwrap_or(Route::Chats);
                self.open(route)
            }
        };
        // Screens may switch the theme through the context.
        self.sync_theme();
        task
    }

    fn open(&mut self, route: Route) -> Task<AppMessage> {
        let leaving_call = matches!(self.screen, CurrentScreen::Call(_));
        tracing::debug!(from = self.route.path(), to = route.path(), "Navigate");
        self.route = route;
        let (screen, task) = match route {
            Route::Chats => (CurrentScreen::Chats(ChatListScreen::new()), Task::none()),
            Route::Contacts => (CurrentScreen::Contacts(ContactsScreen::new()), Task::none()),
            Route::Profile => (CurrentScreen::Profile(ProfileScreen::new()), Task::none()),
            Route::Settings => (
                CurrentScreen::Settings(SettingsScreen::new(&self.ctx)),
                Task::none(),
            ),
            Route::Notifications => (
                CurrentScreen::Notifications(NotificationsScreen::new()),
                Task::none(),
            ),
            Route::VoiceCall | Route::VideoCall => {
                let kind = if route == Route::VideoCall {
                    CallKind::Video
                } else {
                    CallKind::Voice
                };
                let (screen, task) = CallScreen::new(kind, &mut self.ctx);
                (CurrentScreen::Call(screen), task.map(AppMessage::Call))
            }
        };
        // Dropping the previous call screen ends its session.
        self.screen = screen;
        if leaving_call {
            Task::batch([self.stop_ringback(), task])
        } else {
            task
        }
    }

    fn sync_theme(&mut self) {
        let theme = to_iced_theme(self.ctx.theme.resolved());
        if theme != self.theme {
            self.theme = theme;
        }
    }

    fn start_ringback(&self) -> Task<AppMessage> {
        if !self.ctx.settings.notifications.sound_enabled {
            return Task::none();
        }
        let ringback = self.ctx.ringback_player.clone();
        Task::perform(
            async move {
                let mut player = ringback.lock().await;
                if let Err(err) = player.start() {
                    tracing::error!(?err, "Failed to start ringback tone");
                }
            },
            |_| AppMessage::RingbackSettled,
        )
    }

    fn stop_ringback(&self) -> Task<AppMessage> {
        let ringback = self.ctx.ringback_player.clone();
        Task::perform(
            async move {
                let mut player = ringback.lock().await;
                player.stop();
            },
            |_| AppMessage::RingbackSettled,
        )
    }

    /// Advance chat timers and turn unseen replies into notifications.
    fn advance_inbox(&mut self, now: Instant) {
        let arrivals = self.ctx.inbox.advance(now);
        let local_time = chrono::Local::now().time();
        for arrival in arrivals.into_iter().filter(|arrival| !arrival.seen) {
            let is_group = self
                .ctx
                .inbox
                .summary(arrival.contact_id)
                .is_some_and(|summary| summary.is_group);
            if !self
                .ctx
                .settings
                .notifications
                .allows_chat(is_group, local_time)
            {
                tracing::debug!(contact_id = arrival.contact_id, "Message notification muted");
                continue;
            }
            self.ctx.notifications.push(
                NotificationKind::Message,
                "New Message",
                format!(
                    "{} sent you a message: '{}'",
                    arrival.sender_name,
                    arrival.message.text()
                ),
                Some(arrival.sender_name),
            );
        }
    }

    pub fn subscription(&self) -> Subscription<AppMessage> {
        let mut subscriptions = vec![];
        // Add UI event subscription
        let event_rx = self.ctx.ui_event_rx.clone();
        let ui_event_sub = stream::channel(100, move |mut output| async move {
            loop {
                let mut rx = event_rx.lock().await;
                match rx.recv().await {
                    Some(event) => {
                        let _ = output.send(AppMessage::UiEvent(event)).await;
                    }
                    None => {
                        break;
                    }
                }
            }
        });
        subscriptions.push(Subscription::run_with_id(
            TypeId::of::<UiEvent>(),
            ui_event_sub,
        ));
        // Drives chat and call timers
        subscriptions.push(iced::time::every(Duration::from_millis(250)).map(|_| AppMessage::Tick));
        if self.ctx.theme.is_following_system() {
            subscriptions.push(
                iced::time::every(SCHEME_PROBE_INTERVAL).map(|_| AppMessage::ProbeSystemScheme),
            );
        }
        Subscription::batch(subscriptions)
    }

    pub fn title(&self) -> String {
        match self.route {
            Route::Chats => "Phindi".to_string(),
            route => format!("Phindi: {}", route.title()),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn update(&mut self, message: AppMessage) -> Task<AppMessage> {
        match (&mut self.screen, message) {
            (_, AppMessage::Loaded(Ok(preferences))) => {
                tracing::info!(theme = %preferences.theme, "Preferences loaded");
                self.ctx.config = Some(preferences.config);
                self.ctx.settings = preferences.settings;
                // The theme key wins over the copy inside the settings blob.
                self.ctx.theme.set_mode(preferences.theme);
                self.ctx.settings.general.theme = preferences.theme;
                if let CurrentScreen::Settings(screen) = &mut self.screen {
                    screen.reload(&self.ctx);
                }
                self.sync_theme();
                Task::none()
            }
            (_, AppMessage::Loaded(Err(err))) => {
                tracing::error!(%err, "Cannot load preferences, using defaults");
                Task::none()
            }
            (_, AppMessage::Navigate(route)) => {
                if route == self.route {
                    return Task::none();
                }
                // Sidebar destinations are top level.
                self.history.clear();
                self.open(route)
            }
            // Handle UI events from subscription
            (_, AppMessage::UiEvent(event)) => {
                let screen_task = match &mut self.screen {
                    CurrentScreen::Chats(screen) => {
                        let cmd = screen.handle_ui_event(event.clone(), &mut self.ctx);
                        self.handle_screen_command(cmd, AppMessage::ChatList)
                    }
                    CurrentScreen::Call(screen) => {
                        let cmd = screen.handle_ui_event(event.clone(), &mut self.ctx);
                        self.handle_screen_command(cmd, AppMessage::Call)
                    }
                    _ => Task::none(),
                };
                // Process specific UI events that need app-level handling
                let app_task = match event {
                    UiEvent::CallStatusChanged {
                        status: CallStatus::Ringing,
                        ..
                    } => self.start_ringback(),
                    UiEvent::CallStatusChanged { .. } => self.stop_ringback(),
                    _ => Task::none(),
                };
                Task::batch([screen_task, app_task])
            }
            (CurrentScreen::Chats(screen), AppMessage::ChatList(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::ChatList)
            }
            (CurrentScreen::Contacts(screen), AppMessage::Contacts(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Contacts)
            }
            (CurrentScreen::Profile(screen), AppMessage::Profile(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Profile)
            }
            (CurrentScreen::Settings(screen), AppMessage::Settings(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Settings)
            }
            (CurrentScreen::Notifications(screen), AppMessage::Notifications(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Notifications)
            }
            (CurrentScreen::Call(screen), AppMessage::Call(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Call)
            }
            (_, AppMessage::Tick) => {
                let now = Instant::now();
                self.advance_inbox(now);
                match &mut self.screen {
                    CurrentScreen::Chats(screen) => {
                        let cmd = screen.tick(now, &mut self.ctx);
                        self.handle_screen_command(cmd, AppMessage::ChatList)
                    }
                    CurrentScreen::Call(screen) => {
                        let cmd = screen.tick(now, &mut self.ctx);
                        self.handle_screen_command(cmd, AppMessage::Call)
                    }
                    _ => Task::none(),
                }
            }
            (_, AppMessage::ProbeSystemScheme) => {
                self.ctx.theme.scheme().set(probe_system_dark());
                if self.ctx.theme.poll_system() {
                    self.sync_theme();
                }
                Task::none()
            }
            (_, AppMessage::RingbackSettled) => Task::none(),
            // Ignore unmatched pairs
            _ => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, AppMessage> {
        let theme = &self.theme;
        let content = match &self.screen {
            CurrentScreen::Chats(s) => s.view(&self.ctx, theme).map(AppMessage::ChatList),
            CurrentScreen::Contacts(s) => s.view(&self.ctx, theme).map(AppMessage::Contacts),
            CurrentScreen::Profile(s) => s.view(&self.ctx, theme).map(AppMessage::Profile),
            CurrentScreen::Settings(s) => s.view(&self.ctx, theme).map(AppMessage::Settings),
            CurrentScreen::Notifications(s) => {
                s.view(&self.ctx, theme).map(AppMessage::Notifications)
            }
            CurrentScreen::Call(s) => s.view(&self.ctx, theme).map(AppMessage::Call),
        };
        if self.route.is_call() {
            return content;
        }
        row![
            self.sidebar(theme),
            container(Space::new(Length::Fixed(1.0), Length::Fill)).style(styles::divider),
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::page),
        ]
        .into()
    }

    fn sidebar<'a>(&'a self, theme: &'a Theme) -> Element<'a, AppMessage> {
        let mut entries = column![
            container(text("Phindi").size(22).color(colors::primary(theme))).padding([8, 10]),
        ]
        .spacing(4)
        .padding(12)
        .width(Length::Fixed(200.0));
        for route in Route::NAVIGATION {
            let count = match route {
                Route::Chats => self.ctx.inbox.unread_total() as usize,
                Route::Notifications => self.ctx.notifications.unread_count(),
                _ => 0,
            };
            let icon = match route {
                Route::Chats => icons::CHAT,
                Route::Contacts => icons::CONTACTS,
                Route::Notifications => icons::BELL,
                Route::Profile => icons::PERSON,
                _ => icons::SETTINGS,
            };
            let active = route == self.route;
            let label = row![
                icons::icon(icon, 18.0, colors::text_primary(theme)),
                text(route.title()).size(14),
                Space::with_width(Length::Fill),
                badge(count),
            ]
            .spacing(10)
            .align_y(Alignment::Center);
            entries = entries.push(
                button(label)
                    .width(Length::Fill)
                    .padding([8, 10])
                    .on_press(AppMessage::Navigate(route))
                    .style(move |theme: &Theme, status| {
                        if active {
                            styles::button_nav_active(theme, status)
                        } else {
                            styles::button_icon(theme, status)
                        }
                    }),
            );
        }
        container(entries)
            .height(Length::Fill)
            .style(styles::sidebar)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ringback_completion_does_not_advance_timers() {
        let (mut app, _load) = PhindiApp::new();
        let sent_at = Instant::now()
            .checked_sub(Duration::from_secs(10))
            .expect("monotonic clock past 10s");
        app.ctx.inbox.send("Hello", sent_at).expect("sent");
        assert!(app.ctx.inbox.next_due().is_some());

        let _ = app.update(AppMessage::RingbackSettled);
        assert!(app.ctx.inbox.next_due().is_some());

        let _ = app.update(AppMessage::Tick);
        assert!(app.ctx.inbox.next_due().is_none());
    }
}
