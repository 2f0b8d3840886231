mod controller;
mod mode;
mod system;

pub use controller::*;
pub use mode::*;
pub use system::*;
