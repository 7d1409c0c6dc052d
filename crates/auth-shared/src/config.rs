//! Configuration management

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_EVENT_BUS_CAPACITY, DEFAULT_NOTIFY_CHANNEL, DEFAULT_NOTIFY_EVENT, SESSION_COOKIE_NAME,
    SESSION_COOKIE_PATH,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub jwt: JwtSettings,
    pub cookie: CookieSettings,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings").field("secret", &"<redacted>").finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub path: String,
    /// Must be `true` behind TLS in production.
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    pub channel: String,
    pub event: String,
    pub capacity: usize,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
}

impl AppConfig {
    /// Load `.env`, then defaults, `config/default`, `config/{APP_ENV}`, and `SECTION__KEY` env vars.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builder pre-populated with every default the server can run with.
    pub fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "auth-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("redis.url", "redis://127.0.0.1:6379/0")?
            .set_default("redis.max_connections", 16)?
            .set_default("cookie.name", SESSION_COOKIE_NAME)?
            .set_default("cookie.path", SESSION_COOKIE_PATH)?
            .set_default("cookie.secure", false)?
            .set_default("notifications.channel", DEFAULT_NOTIFY_CHANNEL)?
            .set_default("notifications.event", DEFAULT_NOTIFY_EVENT)?
            .set_default("notifications.capacity", DEFAULT_EVENT_BUS_CAPACITY as u64)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::MissingSetting("jwt.secret"));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::MissingSetting("database.url"));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}
