//! HTTP server wiring

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_owner;
use crate::handlers::{owner, pages, public};
use crate::state::AppState;

/// Web server API for serving the public and owner endpoints
#[derive(Clone)]
pub struct WebServerApi {
    state: AppState,
}

impl WebServerApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Get the server state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Create the axum router with all routes configured
    pub fn router(&self) -> Router {
        let owner_routes = Router::new()
            .route("/api/owner/logout", post(owner::logout))
            .route("/api/owner/token", get(owner::token))
            .route("/api/owner/save-token", post(owner::save_token))
            .route("/api/owner/torrent", post(owner::add_torrent))
            .route("/api/owner/folder/:id", delete(owner::delete_folder))
            .route("/api/owner/file/:id", delete(owner::delete_file))
            .route_layer(middleware::from_fn_with_state(
                self.state.clone(),
                require_owner,
            ));

        Router::new()
            .route("/", get(pages::index))
            .route("/owner-login", get(pages::owner_login))
            .route("/health", get(pages::health_check))
            .route("/api/status", get(public::status))
            .route("/api/drive", get(public::drive))
            .route("/api/folder/:id", get(public::folder))
            .route("/api/file/:id", get(public::file))
            .route("/api/torrent", post(public::add_torrent))
            .route("/api/owner/login", post(owner::login))
            .merge(owner_routes)
            .with_state(self.state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Start the web server
    ///
    /// # Arguments
    /// * `host` - Host to bind to (e.g., "0.0.0.0")
    /// * `port` - Port to bind to (e.g., 5000)
    pub async fn serve(self, host: &str, port: u16) -> crate::Result<()> {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Web server listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
