//! In-memory Seedr stand-ins for tests

use async_trait::async_trait;
use seedr::{Authenticated, Authenticator, DriveClient, SeedrError, SharedClient};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared log of remote calls made by every fake drive
pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

pub(crate) struct FakeDrive {
    calls: CallLog,
    failing: Arc<AtomicBool>,
}

impl FakeDrive {
    fn record(&self, call: String) -> Result<(), SeedrError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(SeedrError::Api("remote failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DriveClient for FakeDrive {
    async fn get_drive(&self) -> seedr::Result<Value> {
        self.record("get_drive".to_string())?;
        Ok(json!({"space_used": 1024, "space_max": 2048, "folders": [], "files": []}))
    }

    async fn get_folder(&self, folder_id: &str) -> seedr::Result<Value> {
        self.record(format!("get_folder:{}", folder_id))?;
        Ok(json!({"id": folder_id, "folders": [], "files": []}))
    }

    async fn get_file(&self, file_id: &str) -> seedr::Result<Value> {
        self.record(format!("get_file:{}", file_id))?;
        Ok(json!({"id": file_id, "url": format!("https://cdn.example/{}", file_id)}))
    }

    async fn add_torrent(&self, link: &str) -> seedr::Result<Value> {
        self.record(format!("add_torrent:{}", link))?;
        Ok(json!({"result": true, "title": "queued"}))
    }

    async fn delete_folder(&self, folder_id: &str) -> seedr::Result<Value> {
        self.record(format!("delete_folder:{}", folder_id))?;
        Ok(json!({"result": true}))
    }

    async fn delete_file(&self, file_id: &str) -> seedr::Result<Value> {
        self.record(format!("delete_file:{}", file_id))?;
        Ok(json!({"result": true}))
    }
}

/// Fake Seedr account accepting one email/password pair
pub(crate) struct FakeSeedr {
    valid_tokens: Mutex<HashSet<String>>,
    issued: AtomicUsize,
    login_calls: AtomicUsize,
    token_calls: AtomicUsize,
    login_outage: AtomicBool,
    tokenless_logins: AtomicBool,
    failing_drives: Arc<AtomicBool>,
    calls: CallLog,
}

impl FakeSeedr {
    pub const EMAIL: &'static str = "owner@example.com";
    pub const PASSWORD: &'static str = "correct-horse";

    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            valid_tokens: Mutex::new(HashSet::new()),
            issued: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            token_calls: AtomicUsize::new(0),
            login_outage: AtomicBool::new(false),
            tokenless_logins: AtomicBool::new(false),
            failing_drives: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Issue a token the fake will accept
    pub fn grant_token(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        let token = format!("issued-{}", n);
        self.valid_tokens.lock().unwrap().insert(token.clone());
        token
    }

    pub fn drive(&self) -> SharedClient {
        Arc::new(FakeDrive {
            calls: self.calls.clone(),
            failing: self.failing_drives.clone(),
        })
    }

    /// Make logins fail with a non-credential error
    pub fn set_login_outage(&self, down: bool) {
        self.login_outage.store(down, Ordering::SeqCst);
    }

    /// Successful logins return a client without an issued token
    pub fn set_tokenless_logins(&self, tokenless: bool) {
        self.tokenless_logins.store(tokenless, Ordering::SeqCst);
    }

    /// Every drive, including ones already handed out, fails its calls while set
    pub fn set_failing_drives(&self, failing: bool) {
        self.failing_drives.store(failing, Ordering::SeqCst);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authenticator for FakeSeedr {
    async fn login(&self, email: &str, password: &str) -> seedr::Result<Authenticated> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if self.login_outage.load(Ordering::SeqCst) {
            return Err(SeedrError::Api("service unreachable".to_string()));
        }
        if email != Self::EMAIL || password != Self::PASSWORD {
            return Err(SeedrError::InvalidLogin);
        }
        if self.tokenless_logins.load(Ordering::SeqCst) {
            return Ok(Authenticated::new(self.drive(), None));
        }
        let token = self.grant_token();
        Ok(Authenticated::new(self.drive(), Some(token)))
    }

    async fn from_token(&self, token: &str) -> seedr::Result<Authenticated> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        if !self.valid_tokens.lock().unwrap().contains(token) {
            return Err(SeedrError::InvalidToken);
        }
        Ok(Authenticated::new(self.drive(), Some(token.to_string())))
    }
}
