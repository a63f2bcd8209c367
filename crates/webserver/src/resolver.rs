//! Resolution and caching of the client used for public traffic
//!
//! Resolution order:
//! 1. account credentials, when configured; a rejected password ends resolution
//! 2. the persisted token, else the environment token
//! 3. one more credential login if the token turned out stale
//!
//! With neither credentials nor a token, public access is disabled.

use seedr::{Authenticated, Authenticator, SeedrError, SharedClient};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::ConfigStore;
use crate::settings::Credentials;

/// Outcome of one run of the resolution policy
#[derive(Debug)]
pub enum Resolution {
    /// A public client is cached
    Ready,
    /// No credentials and no token are configured
    Disabled,
    /// The Seedr client could not be constructed at all
    Unavailable,
    /// A credential source exists but authentication failed
    Failed(SeedrError),
}

impl Resolution {
    pub fn is_ready(&self) -> bool {
        matches!(self, Resolution::Ready)
    }
}

/// Why a token could not be made the public token
#[derive(Debug, PartialEq, Eq)]
pub enum SaveTokenError {
    /// The session's client carries no token
    NoToken,
    /// Writing the config file failed
    Persist,
}

/// Owns the public client handle and the config writes that go with it
pub struct CredentialResolver {
    authenticator: Option<Arc<dyn Authenticator>>,
    credentials: Option<Credentials>,
    env_token: Option<String>,
    store: ConfigStore,
    /// Cached public client; the lock also serializes config writes
    public: Mutex<Option<SharedClient>>,
}

impl CredentialResolver {
    /// Create a resolver
    ///
    /// # Arguments
    /// * `authenticator` - Seedr entry point, `None` when the client is unavailable
    /// * `credentials` - Account credentials from the environment
    /// * `env_token` - Token from the environment, used when the config file has none
    /// * `store` - Config store holding the persisted token
    pub fn new(
        authenticator: Option<Arc<dyn Authenticator>>,
        credentials: Option<Credentials>,
        env_token: Option<String>,
        store: ConfigStore,
    ) -> Self {
        Self {
            authenticator,
            credentials,
            env_token,
            store,
            public: Mutex::new(None),
        }
    }

    /// Whether a Seedr client exists to authenticate with
    pub fn seedr_available(&self) -> bool {
        self.authenticator.is_some()
    }

    pub fn authenticator(&self) -> Option<&Arc<dyn Authenticator>> {
        self.authenticator.as_ref()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Token resolution would try: persisted first, then environment
    pub fn configured_token(&self) -> Option<String> {
        self.store
            .load()
            .token()
            .map(ToOwned::to_owned)
            .or_else(|| self.env_token.clone())
    }

    /// Run the resolution policy, replacing the cached client on success
    pub async fn resolve(&self) -> Resolution {
        let mut public = self.public.lock().await;
        self.resolve_into(&mut public).await
    }

    /// Cached public client, resolving once if none is cached
    pub async fn get_public_client(&self) -> Option<SharedClient> {
        let mut public = self.public.lock().await;
        if public.is_none() {
            let outcome = self.resolve_into(&mut public).await;
            tracing::debug!("Lazy public client resolution: {:?}", outcome);
        }
        public.clone()
    }

    /// Make a freshly authenticated owner client the public client
    ///
    /// Persists the issued token when there is one. The client is installed
    /// either way.
    ///
    /// # Returns
    /// * `true` if a token was written to the config file
    pub async fn adopt(&self, auth: &Authenticated) -> bool {
        let mut public = self.public.lock().await;
        let saved = match auth.issued_token.as_deref() {
            Some(token) => self.store.store_token(token),
            None => false,
        };
        *public = Some(auth.client.clone());
        tracing::info!("Public client replaced by owner login (token saved: {})", saved);
        saved
    }

    /// Persist the token of an owner client and make it the public client
    ///
    /// The public client is left untouched if the token cannot be written.
    pub async fn save_token(&self, auth: &Authenticated) -> Result<(), SaveTokenError> {
        let token = auth.issued_token.as_deref().ok_or(SaveTokenError::NoToken)?;
        let mut public = self.public.lock().await;
        if !self.store.store_token(token) {
            return Err(SaveTokenError::Persist);
        }
        *public = Some(auth.client.clone());
        tracing::info!("Owner token saved; public access enabled");
        Ok(())
    }

    async fn resolve_into(&self, public: &mut Option<SharedClient>) -> Resolution {
        let Some(authenticator) = self.authenticator.as_deref() else {
            return Resolution::Unavailable;
        };

        let mut last_error = None;

        if let Some(credentials) = &self.credentials {
            match self.login_with_credentials(authenticator, credentials).await {
                Ok(client) => {
                    *public = Some(client);
                    return Resolution::Ready;
                }
                Err(SeedrError::InvalidLogin) => {
                    tracing::error!("Invalid Seedr credentials; public access not enabled");
                    return Resolution::Failed(SeedrError::InvalidLogin);
                }
                Err(e) => {
                    tracing::warn!("Credential login failed, trying token: {}", e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(token) = self.configured_token() {
            match authenticator.from_token(&token).await {
                Ok(auth) => {
                    tracing::info!("Public Seedr client initialized with token");
                    *public = Some(auth.client);
                    return Resolution::Ready;
                }
                Err(e) if e.is_token_failure() => {
                    let Some(credentials) = &self.credentials else {
                        tracing::warn!("Stored token rejected and no credentials to fall back on");
                        return Resolution::Failed(e);
                    };
                    tracing::warn!("Stored token rejected, retrying with credentials");
                    return match self.login_with_credentials(authenticator, credentials).await {
                        Ok(client) => {
                            *public = Some(client);
                            Resolution::Ready
                        }
                        Err(e) => Resolution::Failed(e),
                    };
                }
                Err(e) => {
                    tracing::warn!("Token authentication failed: {}", e);
                    return Resolution::Failed(e);
                }
            }
        }

        match last_error {
            Some(e) => Resolution::Failed(e),
            None => Resolution::Disabled,
        }
    }

    async fn login_with_credentials(
        &self,
        authenticator: &dyn Authenticator,
        credentials: &Credentials,
    ) -> Result<SharedClient, SeedrError> {
        let auth = authenticator
            .login(&credentials.email, &credentials.password)
            .await?;
        if let Some(token) = auth.issued_token.as_deref() {
            self.store.store_token(token);
        }
        tracing::info!("Logged in with credentials successfully");
        Ok(auth.client)
    }
}
