mod call;
mod chat_list;
mod contacts;
mod notifications;
mod profile;
mod settings;

pub use call::*;
pub use chat_list::*;
pub use contacts::*;
pub use notifications::*;
pub use profile::*;
pub use settings::*;
