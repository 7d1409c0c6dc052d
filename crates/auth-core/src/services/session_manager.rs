// ============================================================================
// Auth Core - Session Manager
// File: crates/auth-core/src/services/session_manager.rs
// ============================================================================
//! Sign-in, logout and per-request authorization over a server-side session store

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use auth_security::{JwtService, PasswordService};
use auth_shared::utils::{mask_email, mask_session_id};

use crate::domain::{AuthenticatedUser, Credentials, SessionId, SessionRecord, SignedIn};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use crate::session_store::SessionStore;
use crate::validation::validate_credentials;

/// Stateless between requests: every call rebuilds its view from the cookie
/// value and the session store.
pub struct SessionManager {
    user_repo: Arc<dyn UserRepository>,
    sessions: SessionStore,
    jwt: Arc<JwtService>,
}

impl SessionManager {
    pub fn new(user_repo: Arc<dyn UserRepository>, sessions: SessionStore, jwt: Arc<JwtService>) -> Self {
        Self {
            user_repo,
            sessions,
            jwt,
        }
    }

    /// Authenticate and persist a new session. The caller sets the cookie
    /// only after this returns `Ok`, so no cookie ever names an unsaved session.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SignedIn, DomainError> {
        let masked = mask_email(&credentials.email);
        info!("Sign-in attempt for {}", masked);

        // 1. Shape
        let errors = validate_credentials(credentials);
        if !errors.is_empty() {
            warn!("Sign-in rejected for {}: {}", masked, errors.join(", "));
            return Err(DomainError::Validation(errors));
        }

        // 2. Account lookup
        let user = self
            .user_repo
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| {
                warn!("Sign-in failed: no account for {}", masked);
                DomainError::UserNotFound
            })?;

        // 3. Password
        if !PasswordService::verify(&credentials.password, &user.password_hash) {
            warn!("Sign-in failed: incorrect password for {}", masked);
            return Err(DomainError::IncorrectPassword);
        }

        // 4. Token
        let issued = self.jwt.issue(&user.id, &user.email).map_err(|e| {
            error!("Token signing failed: {}", e);
            DomainError::TokenSigning(e.to_string())
        })?;

        // 5. Session record, TTL matched to the token's remaining validity
        let ttl = issued.claims.remaining(Utc::now());
        if ttl.is_zero() {
            error!("Token expired before the session could be stored");
            return Err(DomainError::TokenSigning("token expired on issue".to_string()));
        }

        let session_id = SessionId::generate();
        let record = SessionRecord {
            token: issued.token,
            user_id: user.id,
        };
        self.sessions
            .create(&session_id, &record, ttl)
            .await
            .map_err(|e| {
                error!("Failed to persist session: {}", e);
                DomainError::from(e)
            })?;

        info!(
            "Sign-in successful for {} (session {}, ttl {}s)",
            masked,
            mask_session_id(&session_id.to_string()),
            ttl.as_secs()
        );

        Ok(SignedIn {
            session_id,
            user_id: user.id,
            expires_at: issued.claims.expires_at(),
            ttl,
        })
    }

    /// Revoke the session named by the cookie value.
    pub async fn logout(&self, session_cookie: Option<&str>) -> Result<SessionId, DomainError> {
        let raw = session_cookie
            .filter(|value| !value.is_empty())
            .ok_or(DomainError::NoSession)?;

        let session_id = SessionId::parse(raw).ok_or_else(|| {
            warn!("Logout with malformed session cookie");
            DomainError::NoActiveSession
        })?;

        let removed = self.sessions.delete(&session_id).await.map_err(|e| {
            error!(
                "Failed to end session {}: {}",
                mask_session_id(&session_id.to_string()),
                e
            );
            DomainError::from(e)
        })?;

        if !removed {
            warn!(
                "Logout for unknown or expired session {}",
                mask_session_id(&session_id.to_string())
            );
            return Err(DomainError::NoActiveSession);
        }

        info!("Session {} ended", mask_session_id(&session_id.to_string()));
        Ok(session_id)
    }

    /// Resolve the cookie value to an identity. Any failure rejects the request.
    pub async fn authorize(&self, session_cookie: Option<&str>) -> Result<AuthenticatedUser, DomainError> {
        let raw = session_cookie
            .filter(|value| !value.is_empty())
            .ok_or(DomainError::NoSession)?;

        let session_id = SessionId::parse(raw).ok_or(DomainError::SessionNotFound)?;
        let masked = mask_session_id(&session_id.to_string());

        let record = match self.sessions.get(&session_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("Session {} not found or expired", masked);
                return Err(DomainError::SessionNotFound);
            }
            Err(e) => {
                error!("Failed to load session {}: {}", masked, e);
                return Err(DomainError::from(e));
            }
        };

        let claims = self.jwt.verify(&record.token).map_err(|e| {
            warn!("Session {} carries an invalid token: {}", masked, e);
            DomainError::InvalidToken(e.to_string())
        })?;

        if claims.sub != record.user_id.to_string() {
            error!("Session {} token subject does not match its user", masked);
            return Err(DomainError::InvalidToken("subject mismatch".to_string()));
        }

        Ok(AuthenticatedUser {
            user_id: record.user_id,
            expires_at: claims.expires_at(),
            email: claims.email,
            session_id,
        })
    }
}
