// Maps domain models
pub mod map;

pub use map::*;
