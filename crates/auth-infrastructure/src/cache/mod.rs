//! Cache module (Redis adapters)

pub mod redis_session_backend;

pub use redis_session_backend::{create_redis_pool, RedisSessionBackend};
