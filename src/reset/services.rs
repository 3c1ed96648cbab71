use rand::Rng;
use tracing::{error, info, warn};

use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::reset::dto::ResetPasswordRequest;
use crate::state::AppState;
use crate::store;

/// Draw a fresh reset passcode: uniform over 100000..=999999, so the
/// rendered string is always exactly six ASCII digits.
pub fn generate_passcode() -> String {
    let n: u32 = 100_000 + rand::thread_rng().gen_range(0..900_000);
    n.to_string()
}

fn passcode_email_body(passcode: &str) -> String {
    format!(
        "Your password reset passcode is: {passcode}\n\n\
         Please use this passcode to reset your password."
    )
}

/// Start a reset: persist a fresh passcode on the record, then email it.
/// Persist-before-notify: a passcode that failed to persist is never sent,
/// so a delivered passcode is always the one on record.
pub async fn request_reset(state: &AppState, email: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        warn!("reset requested with missing email");
        return Err(ApiError::BadRequest("Email is required".into()));
    }
    let email = store::normalize_email(email);

    let _guard = state.store_lock.lock().await;
    let mut records = state.store.load().await.map_err(|e| {
        error!(error = %e, "load user store failed");
        ApiError::Fatal("Error sending passcode. Please try again.".into())
    })?;

    let Some(user) = store::find_by_email_mut(&mut records, &email) else {
        warn!(%email, "reset requested for unknown email");
        return Err(ApiError::NotFound("Email not found".into()));
    };

    let passcode = generate_passcode();
    user.passcode = Some(passcode.clone());

    state.store.save(&records).await.map_err(|e| {
        error!(error = %e, %email, "persist passcode failed");
        ApiError::Fatal("Error saving passcode. Please try again.".into())
    })?;
    info!(%email, "passcode persisted");

    state
        .mailer
        .send(
            &email,
            "Password Reset Passcode",
            &passcode_email_body(&passcode),
        )
        .await
        .map_err(|e| {
            error!(error = %e, %email, "send passcode email failed");
            ApiError::Fatal("Error sending passcode. Please try again.".into())
        })?;

    info!(%email, "passcode emailed");
    Ok(())
}

/// Single-use check: a matching candidate clears the stored passcode, so a
/// repeat attempt can never match again.
pub async fn verify_passcode(
    state: &AppState,
    email: &str,
    candidate: &str,
) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        warn!("passcode verification with missing email");
        return Err(ApiError::BadRequest("Email is required".into()));
    }
    if candidate.is_empty() {
        warn!("passcode verification with empty passcode");
        return Err(ApiError::BadRequest("Passcode is required".into()));
    }
    let email = store::normalize_email(email);

    let _guard = state.store_lock.lock().await;
    let mut records = state.store.load().await.map_err(|e| {
        error!(error = %e, "load user store failed");
        ApiError::Fatal("Error verifying passcode. Please try again.".into())
    })?;

    let Some(user) = store::find_by_email_mut(&mut records, &email) else {
        warn!(%email, "passcode verification for unknown email");
        return Err(ApiError::NotFound("Email not found".into()));
    };

    // A cleared slot holds no value, so no candidate can match it.
    if user.passcode.as_deref() != Some(candidate) {
        warn!(%email, "invalid passcode");
        return Err(ApiError::Unauthorized("Invalid passcode".into()));
    }

    user.passcode = None;
    state.store.save(&records).await.map_err(|e| {
        error!(error = %e, %email, "clear passcode failed");
        ApiError::Fatal("Error clearing passcode. Please try again.".into())
    })?;

    info!(%email, "passcode verified");
    Ok(())
}

/// Replace the stored hash. Deliberately not gated on a prior passcode
/// verification; the client flow provides that ordering.
pub async fn reset_password(state: &AppState, req: ResetPasswordRequest) -> Result<(), ApiError> {
    if req.email.trim().is_empty() {
        warn!("password reset with missing email");
        return Err(ApiError::BadRequest("Email is required".into()));
    }
    if req.new_password != req.confirm_password {
        warn!("reset passwords do not match");
        return Err(ApiError::BadRequest("Passwords do not match".into()));
    }
    let email = store::normalize_email(&req.email);

    let _guard = state.store_lock.lock().await;
    let mut records = state.store.load().await.map_err(|e| {
        error!(error = %e, "load user store failed");
        ApiError::Fatal("Error resetting password. Please try again.".into())
    })?;

    let Some(user) = store::find_by_email_mut(&mut records, &email) else {
        warn!(%email, "password reset for unknown email");
        return Err(ApiError::NotFound("User not found".into()));
    };

    user.password_hash = hash_password(&req.new_password).map_err(|e| {
        error!(error = %e, "hash password failed");
        ApiError::Fatal("Error resetting password. Please try again.".into())
    })?;

    state.store.save(&records).await.map_err(|e| {
        error!(error = %e, %email, "persist new password failed");
        ApiError::Fatal("Error resetting password. Please try again.".into())
    })?;

    info!(%email, "password reset");
    Ok(())
}
