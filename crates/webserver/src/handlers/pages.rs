//! Static HTML pages and health check

use axum::{extract::State, http::StatusCode, response::{Html, IntoResponse}};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const OWNER_HTML: &str = include_str!("../../assets/owner.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /owner-login
pub async fn owner_login() -> Html<&'static str> {
    Html(OWNER_HTML)
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        format!(
            "CloudTorrent running. Active owner sessions: {}",
            state.sessions().count()
        ),
    )
}
