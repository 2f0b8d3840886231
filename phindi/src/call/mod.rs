mod listener;
mod participant;
mod session;

pub use listener::*;
pub use participant::*;
pub use session::*;
