use std::sync::Arc;

use seedr::{Authenticator, SeedrApi};
use tracing_subscriber::EnvFilter;
use webserver::{AppState, ConfigStore, CredentialResolver, Resolution, Settings, WebServerApi};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    init_tracing();

    let settings = Settings::from_env();

    // A missing Seedr client leaves the pages up but disables every Seedr call
    let authenticator: Option<Arc<dyn Authenticator>> =
        match SeedrApi::new(&settings.seedr_api_url, settings.seedr_timeout) {
            Ok(api) => Some(Arc::new(api)),
            Err(e) => {
                tracing::error!("Failed to create Seedr client: {}", e);
                None
            }
        };

    let resolver = CredentialResolver::new(
        authenticator,
        settings.credentials.clone(),
        settings.env_token.clone(),
        ConfigStore::new(&settings.config_file),
    );

    let has_credentials = resolver.has_credentials();
    let has_token = resolver.configured_token().is_some();
    match resolver.resolve().await {
        Resolution::Ready => tracing::info!("Public access: ENABLED"),
        Resolution::Unavailable => tracing::warn!("Public access: DISABLED (Seedr client unavailable)"),
        Resolution::Disabled => tracing::warn!("Public access: DISABLED (no credentials or token set)"),
        Resolution::Failed(e) if has_credentials => {
            tracing::error!("Public access: FAILED (check credentials): {}", e)
        }
        Resolution::Failed(e) if has_token => {
            tracing::error!("Public access: FAILED (invalid token): {}", e)
        }
        Resolution::Failed(e) => tracing::error!("Public access: FAILED: {}", e),
    }

    let server = WebServerApi::new(AppState::new(resolver, settings.session_secret.clone()));

    tracing::info!("Public:  http://{}:{}", settings.host, settings.port);
    tracing::info!("Owner:   http://{}:{}/owner-login", settings.host, settings.port);

    if let Err(e) = server.serve(&settings.host, settings.port).await {
        tracing::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stdout; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
