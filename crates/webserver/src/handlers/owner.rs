//! Owner endpoints
//!
//! Everything except `login` runs behind the owner gate and acts with the
//! client the owner authenticated.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use seedr::SeedrError;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{item_id, required_link, TorrentRequest};
use crate::cookie::{clear_session_cookie_header, session_cookie_header};
use crate::error::{code, ApiError};
use crate::resolver::SaveTokenError;
use crate::sessions::OwnerSession;
use crate::state::AppState;

/// Body of an owner login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/owner/login
///
/// Authenticates with Seedr, opens an owner session, and makes the owner's
/// token the public token.
pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<LoginRequest>>,
) -> Result<Response, ApiError> {
    let authenticator = state
        .resolver()
        .authenticator()
        .cloned()
        .ok_or_else(|| ApiError::Unavailable {
            message: "Seedr client not available".to_string(),
            code: Some(code::SEEDR_UNAVAILABLE),
        })?;

    let (email, password) = body
        .and_then(|Json(req)| match (req.email, req.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        })
        .ok_or_else(|| ApiError::BadRequest("Email and password required".to_string()))?;

    let auth = authenticator.login(&email, &password).await.map_err(|e| match e {
        SeedrError::InvalidLogin => {
            tracing::warn!("Owner login rejected");
            ApiError::Unauthorized {
                message: "Invalid email or password".to_string(),
                code: code::INVALID_LOGIN,
            }
        }
        other => unknown_error(other),
    })?;

    let drive = auth.client.get_drive().await.map_err(unknown_error)?;

    let session_id = state.sessions().create(auth.clone());
    tracing::info!("Owner logged in ({} active sessions)", state.sessions().count());

    let token_saved = if auth.issued_token.is_some() {
        state.resolver().adopt(&auth).await
    } else {
        false
    };

    let mut response = Json(json!({
        "success": true,
        "session_id": session_id,
        "token_saved": token_saved,
        "space_used": drive.get("space_used").cloned().unwrap_or_else(|| json!(0)),
        "space_max": drive.get("space_max").cloned().unwrap_or_else(|| json!(0)),
    }))
    .into_response();

    if let Some(cookie) = session_cookie_header(&session_id, state.secret()) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

/// POST /api/owner/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<OwnerSession>,
) -> Response {
    state.sessions().delete(&session.session_id);
    tracing::info!("Owner logged out ({} active sessions)", state.sessions().count());

    let mut response = Json(json!({ "success": true })).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, clear_session_cookie_header());
    response
}

/// GET /api/owner/token
pub async fn token(Extension(session): Extension<OwnerSession>) -> Result<Json<Value>, ApiError> {
    let token = session
        .auth
        .issued_token
        .ok_or_else(|| ApiError::NotFound("Token not available".to_string()))?;
    Ok(Json(json!({ "token": token })))
}

/// POST /api/owner/save-token
pub async fn save_token(
    State(state): State<AppState>,
    Extension(session): Extension<OwnerSession>,
) -> Result<Json<Value>, ApiError> {
    match state.resolver().save_token(&session.auth).await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "message": "Token saved to config file",
        }))),
        Err(SaveTokenError::NoToken) => Err(ApiError::NotFound("Token not available".to_string())),
        Err(SaveTokenError::Persist) => Err(ApiError::internal("Failed to save config file")),
    }
}

/// POST /api/owner/torrent
pub async fn add_torrent(
    Extension(session): Extension<OwnerSession>,
    body: Option<Json<TorrentRequest>>,
) -> Result<Json<Value>, ApiError> {
    let link = required_link(body)?;
    let result = session.auth.client.add_torrent(&link).await?;
    Ok(Json(json!({ "success": true, "result": result })))
}

/// DELETE /api/owner/folder/:id
pub async fn delete_folder(
    Extension(session): Extension<OwnerSession>,
    Path(folder_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let folder_id = item_id(folder_id)?;
    session.auth.client.delete_folder(&folder_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/owner/file/:id
pub async fn delete_file(
    Extension(session): Extension<OwnerSession>,
    Path(file_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let file_id = item_id(file_id)?;
    session.auth.client.delete_file(&file_id).await?;
    Ok(Json(json!({ "success": true })))
}

fn unknown_error(err: SeedrError) -> ApiError {
    tracing::error!("Owner login failed: {}", err);
    ApiError::Internal {
        message: err.to_string(),
        code: Some(code::UNKNOWN_ERROR),
    }
}
