//! In-memory doubles for the store and mailer collaborators, shared by the
//! unit tests across modules.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::dto::SignupRequest;
use crate::config::{AppConfig, SmtpConfig};
use crate::mailer::Mailer;
use crate::state::AppState;
use crate::store::{Profession, UserRecord, UserStore};

/// Store backed by a plain Vec. `fail_saves` turns every save into an
/// error, for exercising persistence-failure paths.
#[derive(Default)]
pub struct MemStore {
    records: Mutex<Vec<UserRecord>>,
    fail_saves: AtomicBool,
}

impl MemStore {
    pub fn records(&self) -> Vec<UserRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn load(&self) -> anyhow::Result<Vec<UserRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn save(&self, records: &[UserRecord]) -> anyhow::Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            anyhow::bail!("store write disabled");
        }
        *self.records.lock().unwrap() = records.to_vec();
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Mailer that records outgoing messages instead of sending them.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
    fail_sends: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, text: &str) -> anyhow::Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            anyhow::bail!("smtp transport unavailable");
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
        });
        Ok(())
    }
}

pub fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        users_file: "users.json".into(),
        smtp: SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "mailer@example.com".into(),
            password: "app-password".into(),
            from: "no-reply@example.com".into(),
        },
    })
}

/// App state wired to the given doubles.
pub fn state_with(store: Arc<MemStore>, mailer: Arc<RecordingMailer>) -> AppState {
    AppState::from_parts(store, mailer, test_config())
}

/// A stored record with every profile field populated.
pub fn sample_record(email: &str) -> UserRecord {
    UserRecord {
        email: email.into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        mobile: "555-0100".into(),
        date_of_birth: "1990-01-01".into(),
        age: "35".into(),
        gender: "female".into(),
        profession: Profession::Student,
        study_field: Some("Mathematics".into()),
        job_role: None,
        other_profession: None,
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".into(),
        passcode: None,
    }
}

/// A signup request matching [`sample_record`]'s profile fields.
pub fn signup_request(email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        email: email.into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        mobile: "555-0100".into(),
        date_of_birth: "1990-01-01".into(),
        age: "35".into(),
        gender: "female".into(),
        profession: Some(Profession::Student),
        study_field: Some("Mathematics".into()),
        job_role: None,
        other_profession: None,
        password: password.into(),
        confirm_password: password.into(),
    }
}
