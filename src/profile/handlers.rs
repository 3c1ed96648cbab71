use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::MessageResponse;
use crate::error::ApiError;
use crate::profile::dto::{ProfileQuery, ProfileResponse, UpdateProfileRequest};
use crate::profile::services;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(get_profile))
        .route("/api/update-profile", post(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = services::get_profile(&state, &query.email).await?;
    Ok(Json(profile))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::update_profile(&state, payload).await?;
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}
