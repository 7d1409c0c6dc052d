//! Real-time notification routes

use auth_core::{AuthenticatedUser, Notification};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::sse::{Event, KeepAlive, Sse},
    Extension, Json,
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::ApiError;
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "message must be 1 to 2000 characters"))]
    pub message: String,
    #[validate(length(min = 1, max = 64, message = "username must be 1 to 64 characters"))]
    pub username: String,
}

/// GET /check-ws
pub async fn check_ws(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    state
        .notifier
        .publish(
            &state.notify_channel,
            &state.notify_event,
            json!({ "message": "Message received from check-ws" }),
        )
        .await?;

    Ok(Json(MessageResponse::new("notification published")))
}

/// POST /send-message
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;

    if let Err(errors) = request.validate() {
        let details = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        return Err(ApiError::BadRequest {
            message: "validation failed".to_string(),
            details,
        });
    }

    let payload = serde_json::to_value(&request)
        .map_err(|e| ApiError::InternalError(format!("failed to encode message: {}", e)))?;

    state
        .notifier
        .publish(&state.notify_channel, &state.notify_event, payload)
        .await?;

    info!("Message from user {} published", user.user_id);
    Ok(Json(MessageResponse::new("message sent")))
}

/// GET /events
///
/// Streams every notification published after subscription. The stream ends
/// when the session's token expires or the bus shuts down.
pub async fn events(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.event_bus.subscribe();
    let remaining = (user.expires_at - chrono::Utc::now())
        .to_std()
        .unwrap_or_default();
    let deadline = tokio::time::Instant::now() + remaining;

    debug!("Event stream opened for user {}", user.user_id);

    let stream = async_stream::stream! {
        loop {
            let received = tokio::select! {
                received = rx.recv() => received,
                _ = tokio::time::sleep_until(deadline) => {
                    debug!("Event stream closed: session expired for user {}", user.user_id);
                    break;
                }
            };

            match received {
                Ok(notification) => yield Ok(notification_event(&notification)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, {} notifications dropped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn notification_event(notification: &Notification) -> Event {
    Event::default()
        .event(notification.event.as_str())
        .data(serde_json::to_string(notification).unwrap_or_else(|_| "{}".to_string()))
}
