pub mod auth;
pub mod encounters;
