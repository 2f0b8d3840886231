/// Source of the simulated counterpart replies.
pub trait Responder: Send + Sync {
    /// Reply to a message the user just sent, or `None` to stay silent.
    fn reply_to(&self, text: &str) -> Option<String>;
}

/// Answers every message with the same line.
#[derive(Debug, Clone)]
pub struct ScriptedResponder {
    reply: String,
}

impl ScriptedResponder {
    pub const DEFAULT_REPLY: &'static str = "Thanks for your message! I'll get back to you soon.";

    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REPLY)
    }
}

impl Responder for ScriptedResponder {
    fn reply_to(&self, _text: &str) -> Option<String> {
        Some(self.reply.clone())
    }
}

/// Never answers.
pub struct SilentResponder;

impl Responder for SilentResponder {
    fn reply_to(&self, _text: &str) -> Option<String> {
        None
    }
}
