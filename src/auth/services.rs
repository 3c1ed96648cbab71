use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use crate::auth::dto::{LoginRequest, SignupRequest};
use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{self, UserRecord};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Create a new account. The normalized email becomes the unique key; the
/// passcode slot starts empty.
pub async fn signup(state: &AppState, req: SignupRequest) -> Result<(), ApiError> {
    if req.email.trim().is_empty() {
        warn!("signup with missing email");
        return Err(ApiError::BadRequest("Email is required".into()));
    }
    let email = store::normalize_email(&req.email);
    if !is_valid_email(&email) {
        warn!(%email, "signup with invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if req.password != req.confirm_password {
        warn!(%email, "signup passwords do not match");
        return Err(ApiError::BadRequest("Passwords do not match".into()));
    }

    let _guard = state.store_lock.lock().await;
    let mut records = state.store.load().await.map_err(|e| {
        error!(error = %e, "load user store failed");
        ApiError::Fatal("Error creating account. Please try again.".into())
    })?;

    if store::find_by_email(&records, &email).is_some() {
        warn!(%email, "signup for existing account");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        error!(error = %e, "hash password failed");
        ApiError::Fatal("Error creating account. Please try again.".into())
    })?;

    let profession = req.profession.unwrap_or_default();
    let (study_field, job_role, other_profession) =
        profession.select_detail(req.study_field, req.job_role, req.other_profession);

    records.push(UserRecord {
        email: email.clone(),
        first_name: req.first_name,
        last_name: req.last_name,
        mobile: req.mobile,
        date_of_birth: req.date_of_birth,
        age: req.age,
        gender: req.gender,
        profession,
        study_field,
        job_role,
        other_profession,
        password_hash,
        passcode: None,
    });

    state.store.save(&records).await.map_err(|e| {
        error!(error = %e, "save user store failed");
        ApiError::Fatal("Error creating account. Please try again.".into())
    })?;

    info!(%email, "account created");
    Ok(())
}

/// Session-less authentication: success only acknowledges the credentials,
/// the client keeps hold of the email.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<(), ApiError> {
    let email = store::normalize_email(&req.email);

    let records = state.store.load().await.map_err(|e| {
        error!(error = %e, "load user store failed");
        ApiError::Fatal("Error during login. Please try again.".into())
    })?;

    // Unknown account and bad password keep their distinct messages.
    let Some(user) = store::find_by_email(&records, &email) else {
        warn!(%email, "login for unknown account");
        return Err(ApiError::Unauthorized("Account doesn't exist".into()));
    };

    let ok = verify_password(&req.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify password failed");
        ApiError::Fatal("Error during login. Please try again.".into())
    })?;
    if !ok {
        warn!(%email, "login with invalid password");
        return Err(ApiError::Unauthorized("Invalid password".into()));
    }

    info!(%email, "login ok");
    Ok(())
}
