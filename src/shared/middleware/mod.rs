// Middleware module
pub mod auth;
pub mod error_report;

pub use auth::*;
pub use error_report::*;
