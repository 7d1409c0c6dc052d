//! # Auth Infrastructure
//! 
//! Database, cache, and notification implementations (adapters).

pub mod cache;
pub mod database;
pub mod memory;
pub mod notify;

pub use cache::{create_redis_pool, RedisSessionBackend};
pub use database::{create_pool, run_migrations, PgUserRepository};
pub use memory::{InMemoryUserRepository, MemorySessionBackend};
pub use notify::WebhookNotifier;
