//! Owner session registry

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use seedr::Authenticated;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Random bytes behind each session id (256 bits)
const SESSION_ID_BYTES: usize = 32;

/// An authenticated owner
#[derive(Debug, Clone)]
pub struct OwnerSession {
    pub session_id: String,
    /// Client authenticated with the owner's own credentials
    pub auth: Authenticated,
    /// When the owner logged in
    pub created_at: DateTime<Utc>,
}

/// Sessions mapped by id
///
/// Sessions have no expiry; they live until logout or process restart.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, OwnerSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session for an authenticated owner
    ///
    /// # Returns
    /// * The new session id, 64 hexadecimal characters
    pub fn create(&self, auth: Authenticated) -> String {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let session_id = loop {
            let candidate = generate_session_id();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        sessions.insert(
            session_id.clone(),
            OwnerSession {
                session_id: session_id.clone(),
                auth,
                created_at: Utc::now(),
            },
        );
        session_id
    }

    /// Get a session by id
    pub fn lookup(&self, session_id: &str) -> Option<OwnerSession> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(session_id).cloned()
    }

    /// Remove a session
    ///
    /// # Returns
    /// * `true` if the session existed
    pub fn delete(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(session_id).is_some()
    }

    /// Get count of active sessions
    pub fn count(&self) -> usize {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }
}

fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
