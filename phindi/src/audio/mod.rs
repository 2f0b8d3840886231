mod ringback;

pub use ringback::*;
