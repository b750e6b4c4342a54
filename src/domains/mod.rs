// Domain modules
pub mod auth;
pub mod maps;
pub mod users;
