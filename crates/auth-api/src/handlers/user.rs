use auth_core::{PublicUser, SignupParams};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::ApiError;
use crate::response::SignupResponse;
use crate::state::AppState;

/// Signup handler - POST /signup
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupParams>, JsonRejection>,
) -> Result<Json<SignupResponse>, ApiError> {
    let Json(params) = payload?;

    let user = state.signup_service.register(params).await?;

    Ok(Json(SignupResponse {
        user: PublicUser::from(&user),
    }))
}
