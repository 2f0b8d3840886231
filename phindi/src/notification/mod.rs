mod center;

pub use center::*;
