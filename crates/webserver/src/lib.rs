//! HTTP frontend for a shared Seedr account
//!
//! This crate serves the public drive endpoints through one shared Seedr
//! client and the owner endpoints behind a session gate. Owner logins can
//! refresh the persisted token the public client is built from.

pub mod auth;
pub mod config;
pub mod cookie;
pub mod error;
pub mod handlers;
pub mod resolver;
mod server;
pub mod sessions;
pub mod settings;
mod state;

#[cfg(test)]
mod testing;

pub use config::{ConfigStore, PersistedConfig};
pub use error::ApiError;
pub use resolver::{CredentialResolver, Resolution};
pub use server::WebServerApi;
pub use sessions::{OwnerSession, SessionRegistry};
pub use settings::{Credentials, Settings};
pub use state::AppState;

/// Result type alias for web server setup operations
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
