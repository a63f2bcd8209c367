//! Owner authentication gate

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::cookie::{parse_cookie, verify_session_cookie, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying a session id; takes priority over the cookie
pub const SESSION_HEADER: &str = "x-session-id";

/// Extract the owner session id from a request
///
/// The `X-Session-ID` header wins when present and non-empty; otherwise the
/// signed session cookie is used if its signature checks out.
pub fn session_id_from_headers(headers: &HeaderMap, secret: &str) -> Option<String> {
    let from_header = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty());
    if let Some(id) = from_header {
        return Some(id.to_string());
    }

    let cookie = parse_cookie(headers, SESSION_COOKIE)?;
    verify_session_cookie(&cookie, secret).map(ToOwned::to_owned)
}

/// Middleware rejecting requests without a live owner session
///
/// On success the [`crate::sessions::OwnerSession`] is placed in the request
/// extensions for the handler.
pub async fn require_owner(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = session_id_from_headers(request.headers(), state.secret())
        .and_then(|id| state.sessions().lookup(&id))
        .ok_or_else(|| {
            tracing::debug!("Rejected owner request to {}", request.uri().path());
            ApiError::auth_required()
        })?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
