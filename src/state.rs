use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::mailer::{Mailer, SmtpMailer};
use crate::store::{FileStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<AppConfig>,
    /// Serializes load-modify-save cycles within this process so concurrent
    /// writers cannot drop each other's changes.
    pub store_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(FileStore::new(config.users_file.clone())) as Arc<dyn UserStore>;
        let mailer = Arc::new(SmtpMailer::new(&config.smtp)?) as Arc<dyn Mailer>;
        Ok(Self::from_parts(store, mailer, config))
    }

    pub fn from_parts(
        store: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            mailer,
            config,
            store_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State wired to empty in-memory doubles, for tests that do not need
    /// to inspect them.
    pub fn fake() -> Self {
        crate::testing::state_with(
            Arc::new(crate::testing::MemStore::default()),
            Arc::new(crate::testing::RecordingMailer::default()),
        )
    }
}
