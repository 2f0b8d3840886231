mod contact;
mod message;
mod notification;
mod peer;
mod profile;
mod types;

pub use contact::*;
pub use message::*;
pub use notification::*;
pub use peer::*;
pub use profile::*;
pub use types::*;
