//! # Auth API
//! 
//! HTTP handlers, session middleware, cookie codec, and the router.

pub mod cookie;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
