//! Session cookie codec

use auth_core::SessionId;
use auth_shared::config::CookieSettings;
use axum::http::{header, HeaderMap, HeaderValue};
use std::time::Duration;

use crate::error::ApiError;

/// The cookie carries only the session id; the session store is the source of truth.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    path: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, path: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            secure,
        }
    }

    /// First value for our cookie name across all `Cookie` headers.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == self.name)
            .map(|(_, value)| value.trim().to_string())
    }

    pub fn issue(&self, session_id: &SessionId, max_age: Duration) -> Result<HeaderValue, ApiError> {
        self.header(&session_id.to_string(), &format!("Max-Age={}", max_age.as_secs()))
    }

    /// Expire the cookie immediately.
    pub fn clear(&self) -> Result<HeaderValue, ApiError> {
        self.header("", "Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT")
    }

    fn header(&self, value: &str, lifetime: &str) -> Result<HeaderValue, ApiError> {
        let mut cookie = format!("{}={}; {}; Path={}; HttpOnly", self.name, value, lifetime, self.path);
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::InternalError(format!("invalid cookie header: {}", e)))
    }
}

impl From<&CookieSettings> for SessionCookie {
    fn from(settings: &CookieSettings) -> Self {
        Self::new(settings.name.clone(), settings.path.clone(), settings.secure)
    }
}
