use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{auth, health, notify, user};
use crate::middleware::require_session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/signup", post(user::signup))
        .route("/sign-in", post(auth::sign_in))
        .route("/logout", post(auth::logout));

    // Protected routes (session required)
    let protected_routes = Router::new()
        .route("/health-check", get(health::health_check))
        .route("/auth-route", get(auth::auth_route))
        .route("/check-ws", get(notify::check_ws))
        .route("/send-message", post(notify::send_message))
        .route("/events", get(notify::events))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
