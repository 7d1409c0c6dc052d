//! Domain services (business logic)

pub mod event_bus;
pub mod session_manager;
pub mod signup_service;

pub use event_bus::{EventBus, FanoutNotifier};
pub use session_manager::SessionManager;
pub use signup_service::SignupService;
