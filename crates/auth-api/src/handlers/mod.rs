pub mod auth;
pub mod health;
pub mod notify;
pub mod user;
