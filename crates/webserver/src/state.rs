//! Shared application state handed to every handler

use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;

use crate::resolver::CredentialResolver;
use crate::sessions::SessionRegistry;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Public client and token persistence
    resolver: Arc<CredentialResolver>,
    /// Owner sessions mapped by id
    sessions: SessionRegistry,
    /// Secret for signing session cookies
    secret: Arc<str>,
}

impl AppState {
    /// Create new application state
    ///
    /// # Arguments
    /// * `resolver` - Credential resolver owning the public client
    /// * `secret` - Cookie signing secret; `None` generates one for this process
    pub fn new(resolver: CredentialResolver, secret: Option<String>) -> Self {
        let secret = secret.unwrap_or_else(random_secret);
        Self {
            resolver: Arc::new(resolver),
            sessions: SessionRegistry::new(),
            secret: Arc::from(secret),
        }
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
