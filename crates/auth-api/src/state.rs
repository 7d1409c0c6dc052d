use std::sync::Arc;

use auth_core::repositories::Notifier;
use auth_core::services::{EventBus, SessionManager, SignupService};

use crate::cookie::SessionCookie;

/// Application state shared across handlers. Every dependency is constructed
/// at startup and passed in; nothing is read from globals.
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
    pub signup_service: Arc<SignupService>,
    pub notifier: Arc<dyn Notifier>,
    pub event_bus: Arc<EventBus>,
    pub cookie: SessionCookie,
    pub notify_channel: String,
    pub notify_event: String,
}
