// Shared module
pub mod clients;
pub mod config;
pub mod database;
pub mod errors;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod services;
pub mod utils;
