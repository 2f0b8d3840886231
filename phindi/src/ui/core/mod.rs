mod route;
mod screen;

pub use route::*;
pub use screen::*;
