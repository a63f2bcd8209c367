//! Seedr.cc API client
//!
//! This crate provides a small interface to the Seedr cloud-torrent API.
//! It handles password and token authentication, error classification,
//! and the handful of drive operations the web frontend forwards.

pub mod client;
pub mod error;

pub use client::{SeedrApi, SeedrClient, DEFAULT_API_URL};
pub use error::SeedrError;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Result type alias for Seedr operations
pub type Result<T> = std::result::Result<T, SeedrError>;

/// Shared handle to an authenticated drive client
pub type SharedClient = Arc<dyn DriveClient>;

/// Operations available on an authenticated Seedr account
///
/// Every call returns the JSON object produced by the remote service so the
/// caller can pass it through untouched.
#[async_trait]
pub trait DriveClient: Send + Sync {
    /// Root folder listing plus account space usage
    async fn get_drive(&self) -> Result<Value>;

    async fn get_folder(&self, folder_id: &str) -> Result<Value>;

    /// File metadata including its download URL
    async fn get_file(&self, file_id: &str) -> Result<Value>;

    /// Queue a magnet link or torrent URL for download
    async fn add_torrent(&self, link: &str) -> Result<Value>;

    async fn delete_folder(&self, folder_id: &str) -> Result<Value>;

    async fn delete_file(&self, file_id: &str) -> Result<Value>;
}

/// Outcome of a successful authentication
#[derive(Clone)]
pub struct Authenticated {
    /// Client bound to the authenticated account
    pub client: SharedClient,
    /// Token issued (or accepted) by the remote service
    pub issued_token: Option<String>,
}

impl Authenticated {
    pub fn new(client: SharedClient, issued_token: Option<String>) -> Self {
        Self { client, issued_token }
    }
}

impl std::fmt::Debug for Authenticated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticated")
            .field("has_token", &self.issued_token.is_some())
            .finish()
    }
}

/// Produces authenticated drive clients
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange an account email and password for a client
    ///
    /// # Errors
    /// Returns [`SeedrError::InvalidLogin`] when the service rejects the credentials
    async fn login(&self, email: &str, password: &str) -> Result<Authenticated>;

    /// Build a client from a previously issued token
    ///
    /// # Errors
    /// Returns [`SeedrError::InvalidToken`] when the token is stale or revoked
    async fn from_token(&self, token: &str) -> Result<Authenticated>;
}
