//! Session authorization middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the session cookie to an `AuthenticatedUser` and attach it to the
/// request. Any failure responds immediately; the handler never runs.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cookie = state.cookie.read(request.headers());
    let user = state.session_manager.authorize(cookie.as_deref()).await?;

    debug!("Request authorized for user {}", user.user_id);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
