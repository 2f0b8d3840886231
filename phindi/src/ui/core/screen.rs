use std::fmt::Debug;
use std::time::Instant;

use iced::{Element, Task, Theme};

use crate::ui::{AppContext, UiEvent};

use super::Route;

/// Command returned from screen update methods
pub enum ScreenCommand<M> {
    /// No action needed
    None,
    /// Execute a command with screen's message type
    Message(Task<M>),
    /// Switch to a different screen
    ChangeScreen(Route),
    /// Return to the previously shown screen
    Back,
}

/// Base trait for all application screens
pub trait Screen {
    /// Message type for this screen
    type Message: Debug + Clone + Send + 'static;

    /// Process a screen message and return a command
    fn update(
        &mut self,
        message: Self::Message,
        ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message>;

    /// Handle UI events from listeners
    /// Default implementation ignores all events
    fn handle_ui_event(
        &mut self,
        _event: UiEvent,
        _ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        ScreenCommand::None
    }

    /// Periodic clock tick
    fn tick(&mut self, _now: Instant, _ctx: &mut AppContext) -> ScreenCommand<Self::Message> {
        ScreenCommand::None
    }

    /// Create the view for this screen
    fn view<'a>(&'a self, ctx: &'a AppContext, theme: &'a Theme) -> Element<'a, Self::Message>;
}

impl<M> ScreenCommand<M> {
    /// Check if this is a None command
    pub fn is_none(&self) -> bool {
        matches!(self, ScreenCommand::None)
    }
}
