// Map (smoking area) repositories
pub mod map_repository;
pub mod memory_map_repository;

pub use map_repository::*;
pub use memory_map_repository::*;
