use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::auth::dto::MessageResponse;
use crate::error::ApiError;
use crate::reset::dto::{CheckEmailRequest, ResetAck, ResetPasswordRequest, VerifyPasscodeRequest};
use crate::reset::services;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/check-email", post(check_email))
        .route("/api/verify-passcode", post(verify_passcode))
        .route("/api/reset-password", post(reset_password))
}

#[instrument(skip(state, payload))]
pub async fn check_email(
    State(state): State<AppState>,
    Json(payload): Json<CheckEmailRequest>,
) -> Result<Json<ResetAck>, ApiError> {
    services::request_reset(&state, &payload.email).await?;
    Ok(Json(ResetAck::ok("Passcode sent to email")))
}

#[instrument(skip(state, payload))]
pub async fn verify_passcode(
    State(state): State<AppState>,
    Json(payload): Json<VerifyPasscodeRequest>,
) -> Result<Json<ResetAck>, ApiError> {
    services::verify_passcode(&state, &payload.email, &payload.passcode).await?;
    Ok(Json(ResetAck::ok("Passcode verified")))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::reset_password(&state, payload).await?;
    Ok(Json(MessageResponse::new("Password reset successful")))
}
