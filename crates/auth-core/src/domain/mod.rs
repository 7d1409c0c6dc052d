//! # Auth Core - Domain Module
//! 
//! Domain entities for the session lifecycle.

pub mod credentials;
pub mod notification;
pub mod session;
pub mod user;

pub use credentials::Credentials;
pub use notification::Notification;
pub use session::{AuthenticatedUser, SessionId, SessionRecord, SignedIn};
pub use user::{NewUser, PublicUser, SignupParams, UserRecord};
