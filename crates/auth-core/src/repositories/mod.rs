//! Repository traits (ports)

pub mod notifier;
pub mod session_backend;
pub mod user_repository;

pub use notifier::{NotifyError, Notifier};
pub use session_backend::{BackendError, SessionBackend};
pub use user_repository::UserRepository;
