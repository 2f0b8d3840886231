mod devices;
mod stream;
mod stub;
mod system;

pub use devices::*;
pub use stream::*;
pub use stub::*;
pub use system::*;
