//! In-process adapters for development and tests

pub mod session_backend;
pub mod user_repository;

pub use session_backend::MemorySessionBackend;
pub use user_repository::InMemoryUserRepository;
