use serde::{Deserialize, Serialize};

/// Broad occupation category. At most one of the detail fields on
/// [`UserRecord`] may be populated, and it must match the selected variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    Student,
    Employee,
    Other,
    #[default]
    #[serde(alias = "")]
    Unspecified,
}

impl Profession {
    /// Keep only the detail value matching the selected profession,
    /// discarding the other two.
    pub fn select_detail(
        self,
        study_field: Option<String>,
        job_role: Option<String>,
        other_profession: Option<String>,
    ) -> (Option<String>, Option<String>, Option<String>) {
        match self {
            Profession::Student => (study_field, None, None),
            Profession::Employee => (None, job_role, None),
            Profession::Other => (None, None, other_profession),
            Profession::Unspecified => (None, None, None),
        }
    }
}

/// A user as persisted in the flat-file store. Field names mirror the
/// on-disk JSON, so a store file written by one release loads unchanged in
/// the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique key: lowercased, whitespace-trimmed.
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
    pub profession: Profession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_profession: Option<String>,
    pub password_hash: String,
    /// Set by a reset request, cleared by the matching verification.
    /// Serialized as an explicit `null` in between.
    #[serde(default)]
    pub passcode: Option<String>,
}
