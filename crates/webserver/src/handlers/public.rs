//! Public endpoints served with the shared public client

use axum::{
    extract::{Path, State},
    Json,
};
use seedr::SharedClient;
use serde_json::{json, Value};

use super::{item_id, required_link, TorrentRequest};
use crate::error::ApiError;
use crate::state::AppState;

async fn public_client(state: &AppState) -> Result<SharedClient, ApiError> {
    state
        .resolver()
        .get_public_client()
        .await
        .ok_or_else(ApiError::public_unavailable)
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let public_access = state.resolver().get_public_client().await.is_some();
    let message = if public_access {
        "Public access ready"
    } else {
        "No public token configured"
    };

    Json(json!({
        "status": "online",
        "seedr_available": state.resolver().seedr_available(),
        "public_access": public_access,
        "message": message,
    }))
}

/// GET /api/drive
pub async fn drive(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let client = public_client(&state).await?;
    Ok(Json(client.get_drive().await?))
}

/// GET /api/folder/:id
pub async fn folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let client = public_client(&state).await?;
    let folder_id = item_id(folder_id)?;
    Ok(Json(client.get_folder(&folder_id).await?))
}

/// GET /api/file/:id
pub async fn file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let client = public_client(&state).await?;
    let file_id = item_id(file_id)?;
    Ok(Json(client.get_file(&file_id).await?))
}

/// POST /api/torrent
pub async fn add_torrent(
    State(state): State<AppState>,
    body: Option<Json<TorrentRequest>>,
) -> Result<Json<Value>, ApiError> {
    let client = public_client(&state).await?;
    let link = required_link(body)?;
    let result = client.add_torrent(&link).await?;
    Ok(Json(json!({ "success": true, "result": result })))
}
