use serde::{Deserialize, Serialize};

use crate::store::{Profession, UserRecord};

/// Query parameters for the profile lookup.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub email: String,
}

/// Profile as returned to clients: the stored record minus its credential
/// fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub date_of_birth: String,
    pub age: String,
    pub gender: String,
    pub profession: Profession,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_profession: Option<String>,
}

impl From<&UserRecord> for ProfileResponse {
    fn from(user: &UserRecord) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            mobile: user.mobile.clone(),
            email: user.email.clone(),
            date_of_birth: user.date_of_birth.clone(),
            age: user.age.clone(),
            gender: user.gender.clone(),
            profession: user.profession,
            study_field: user.study_field.clone(),
            job_role: user.job_role.clone(),
            other_profession: user.other_profession.clone(),
        }
    }
}

/// Partial update. Empty or omitted fields keep the stored value; the
/// profession detail fields always follow the submitted profession.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub profession: Option<Profession>,
    #[serde(default)]
    pub study_field: Option<String>,
    #[serde(default)]
    pub job_role: Option<String>,
    #[serde(default)]
    pub other_profession: Option<String>,
}
