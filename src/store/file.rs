use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::{UserRecord, UserStore};

/// Flat-file store: a single JSON array holding every user record. Reads
/// and writes are whole-file; a save goes through a temp file in the same
/// directory and renames over the target, so a load never observes a
/// partial write.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UserStore for FileStore {
    async fn load(&self) -> anyhow::Result<Vec<UserRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store file missing, creating empty store");
            self.save(&[]).await?;
            return Ok(Vec::new());
        }

        // An unreadable or malformed file degrades to an empty store: the
        // store self-heals on the next save instead of taking every
        // operation down with it.
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "store file unreadable, starting empty");
                return Ok(Vec::new());
            }
        };
        match serde_json::from_slice::<Vec<UserRecord>>(&data) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "store file malformed, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[UserRecord]) -> anyhow::Result<()> {
        let data = serde_json::to_vec_pretty(records).context("serialize user records")?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(&data).context("write user records")?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_record;

    fn store_in(dir: &Path) -> FileStore {
        FileStore::new(dir.join("users.json"))
    }

    #[tokio::test]
    async fn missing_file_loads_empty_and_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let records = store.load().await.unwrap();
        assert!(records.is_empty());
        assert!(dir.path().join("users.json").exists());
    }

    #[tokio::test]
    async fn malformed_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("users.json"), b"not json at all").unwrap();

        let store = store_in(dir.path());
        let records = store.load().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut record = sample_record("a@b.com");
        record.passcode = Some("482913".into());
        store.save(&[record]).await.unwrap();

        let records = store.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "a@b.com");
        assert_eq!(records[0].passcode.as_deref(), Some("482913"));
    }

    #[tokio::test]
    async fn save_of_unchanged_load_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = FileStore::new(path.clone());

        store
            .save(&[sample_record("a@b.com"), sample_record("c@d.com")])
            .await
            .unwrap();
        let before = std::fs::read(&path).unwrap();

        let records = store.load().await.unwrap();
        store.save(&records).await.unwrap();
        let after = std::fs::read(&path).unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn save_replaces_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store
            .save(&[sample_record("a@b.com"), sample_record("c@d.com")])
            .await
            .unwrap();
        store.save(&[sample_record("c@d.com")]).await.unwrap();

        let records = store.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "c@d.com");
    }
}
