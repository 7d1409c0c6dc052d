//! # Auth Core
//! 
//! Domain entities, validation, ports, and the session lifecycle services.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod session_store;
pub mod validation;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
pub use session_store::{SessionStore, SessionStoreError};
