// ============================================================================
// Auth API - Session Handlers
// File: crates/auth-api/src/handlers/auth.rs
// ============================================================================
//! Sign-in, logout and the authenticated probe route

use auth_core::{AuthenticatedUser, Credentials, ErrorKind};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::error::ApiError;
use crate::response::{AuthRouteResponse, MessageResponse, SignInResponse};
use crate::state::AppState;

/// Sign-in handler - POST /sign-in
///
/// The cookie is only attached once the session record has been persisted.
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(credentials) = payload?;

    let signed_in = state.session_manager.sign_in(&credentials).await?;
    let cookie = state.cookie.issue(&signed_in.session_id, signed_in.ttl)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            message: "Logged in successfully".to_string(),
            expires: signed_in.expires_at,
        }),
    )
        .into_response())
}

/// Logout handler - POST /logout
///
/// The cookie is cleared whenever the session is known to be gone (200, 401).
/// On a store failure the cookie is kept so the client can retry.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let cookie = state.cookie.read(&headers);

    match state.session_manager.logout(cookie.as_deref()).await {
        Ok(_) => Ok((
            [(header::SET_COOKIE, state.cookie.clear()?)],
            Json(MessageResponse::new("Session ended successfully")),
        )
            .into_response()),
        Err(err) if err.kind() == ErrorKind::Unauthorized => {
            let mut response = ApiError::from(err).into_response();
            response
                .headers_mut()
                .insert(header::SET_COOKIE, state.cookie.clear()?);
            Ok(response)
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /auth-route
pub async fn auth_route(Extension(user): Extension<AuthenticatedUser>) -> Json<AuthRouteResponse> {
    Json(AuthRouteResponse {
        message: "Authenticated routes are working successfully".to_string(),
        user_id: user.user_id,
        email: user.email,
    })
}
