mod file;
mod types;

pub use file::FileStore;
pub use types::{Profession, UserRecord};

use async_trait::async_trait;

/// Whole-file persistence for the user records. `load` yields every record
/// in stored order; `save` replaces the full set.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn load(&self) -> anyhow::Result<Vec<UserRecord>>;
    async fn save(&self, records: &[UserRecord]) -> anyhow::Result<()>;
}

/// Lowercased, whitespace-trimmed form used as the unique record key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Case-insensitive lookup against the normalized storage form.
pub fn find_by_email<'a>(records: &'a [UserRecord], email: &str) -> Option<&'a UserRecord> {
    let needle = normalize_email(email);
    records.iter().find(|r| r.email.to_lowercase() == needle)
}

pub fn find_by_email_mut<'a>(
    records: &'a mut [UserRecord],
    email: &str,
) -> Option<&'a mut UserRecord> {
    let needle = normalize_email(email);
    records.iter_mut().find(|r| r.email.to_lowercase() == needle)
}
