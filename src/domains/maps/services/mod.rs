// Maps domain services
pub mod map_service;
pub mod state;

pub use map_service::*;
pub use state::*;
