use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::profile::dto::{ProfileResponse, UpdateProfileRequest};
use crate::state::AppState;
use crate::store::{self, Profession};

/// Merge rule inherited from the flat-file format: a non-empty submitted
/// value overwrites, anything else keeps the stored value. A deliberate
/// clear-to-empty is indistinguishable from "not provided".
fn merge_field(current: &mut String, submitted: String) {
    if !submitted.is_empty() {
        *current = submitted;
    }
}

pub async fn get_profile(state: &AppState, email: &str) -> Result<ProfileResponse, ApiError> {
    if email.trim().is_empty() {
        warn!("profile request with missing email");
        return Err(ApiError::BadRequest("Email is required".into()));
    }
    let email = store::normalize_email(email);

    let records = state.store.load().await.map_err(|e| {
        error!(error = %e, "load user store failed");
        ApiError::Fatal("Error loading profile. Please try again.".into())
    })?;

    let Some(user) = store::find_by_email(&records, &email) else {
        warn!(%email, "profile request for unknown email");
        return Err(ApiError::NotFound("User not found".into()));
    };

    Ok(ProfileResponse::from(user))
}

pub async fn update_profile(state: &AppState, req: UpdateProfileRequest) -> Result<(), ApiError> {
    if req.email.trim().is_empty() {
        warn!("profile update with missing email");
        return Err(ApiError::BadRequest("Email is required".into()));
    }
    let email = store::normalize_email(&req.email);

    let _guard = state.store_lock.lock().await;
    let mut records = state.store.load().await.map_err(|e| {
        error!(error = %e, "load user store failed");
        ApiError::Fatal("Error updating profile. Please try again.".into())
    })?;

    let Some(user) = store::find_by_email_mut(&mut records, &email) else {
        warn!(%email, "profile update for unknown email");
        return Err(ApiError::NotFound("User not found".into()));
    };

    merge_field(&mut user.first_name, req.first_name);
    merge_field(&mut user.last_name, req.last_name);
    merge_field(&mut user.mobile, req.mobile);
    merge_field(&mut user.date_of_birth, req.date_of_birth);
    merge_field(&mut user.age, req.age);
    merge_field(&mut user.gender, req.gender);
    if let Some(profession) = req.profession {
        user.profession = profession;
    }

    // The detail fields always track the submitted profession; an omitted
    // profession clears all three.
    let submitted = req.profession.unwrap_or(Profession::Unspecified);
    let (study_field, job_role, other_profession) =
        submitted.select_detail(req.study_field, req.job_role, req.other_profession);
    user.study_field = study_field;
    user.job_role = job_role;
    user.other_profession = other_profession;

    state.store.save(&records).await.map_err(|e| {
        error!(error = %e, %email, "persist profile failed");
        ApiError::Fatal("Error updating profile. Please try again.".into())
    })?;

    info!(%email, "profile updated");
    Ok(())
}
