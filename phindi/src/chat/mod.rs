mod conversation;
mod inbox;
mod listener;
mod responder;

pub use conversation::*;
pub use inbox::*;
pub use listener::*;
pub use responder::*;
