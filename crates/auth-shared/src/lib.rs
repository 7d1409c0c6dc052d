//! # Auth Shared
//! 
//! Configuration, telemetry, constants, and small helpers shared by every layer.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
