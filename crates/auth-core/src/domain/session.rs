// ============================================================================
// Auth Core - Session Entities
// File: crates/auth-core/src/domain/session.rs
// ============================================================================
//! Session identifiers and the server-side session record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Opaque session identifier, also the cookie value and the store key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Cookie values that are not UUIDs can never name a stored session.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Stored under the session id. Written once at sign-in, never mutated.
///
/// The JSON shape is fixed: `{"token": "...", "userId": "..."}`. Unknown or
/// missing fields fail deserialization instead of falling back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: Uuid,
}

/// Identity attached to a request that passed session authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub session_id: SessionId,
    /// Token expiry; the session cannot outlive it.
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful sign-in, ready to be turned into a cookie.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub session_id: SessionId,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Remaining token validity at session creation; also the store TTL and cookie max-age.
    pub ttl: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_parse() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
        assert_eq!(SessionId::parse("not-a-uuid"), None);
        assert_eq!(SessionId::parse(""), None);
    }

    #[test]
    fn test_record_schema_is_camel_case() {
        let record = SessionRecord {
            token: "tok".to_string(),
            user_id: Uuid::nil(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["token"], "tok");
    }

    #[test]
    fn test_record_rejects_drifted_schema() {
        let snake = r#"{"token":"tok","user_id":"00000000-0000-0000-0000-000000000000"}"#;
        assert!(serde_json::from_str::<SessionRecord>(snake).is_err());

        let missing = r#"{"token":"tok"}"#;
        assert!(serde_json::from_str::<SessionRecord>(missing).is_err());

        let extra = r#"{"token":"tok","userId":"00000000-0000-0000-0000-000000000000","role":"x"}"#;
        assert!(serde_json::from_str::<SessionRecord>(extra).is_err());
    }
}
