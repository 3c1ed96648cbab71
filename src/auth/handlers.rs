use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::auth::dto::{LoginRequest, MessageResponse, SignupRequest};
use crate::auth::services;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::signup(&state, payload).await?;
    Ok(Json(MessageResponse::new("Signup successful")))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::login(&state, payload).await?;
    Ok(Json(MessageResponse::new("Login successful")))
}

/// Nothing to invalidate server-side; the client discards its stored email.
#[instrument]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logout successful"))
}
