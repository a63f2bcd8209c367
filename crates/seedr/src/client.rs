use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::{json, Value};
use std::time::Duration;

use crate::{Authenticated, Authenticator, DriveClient, Result, SeedrError};

/// Public Seedr endpoint
pub const DEFAULT_API_URL: &str = "https://www.seedr.cc";

/// OAuth client id accepted by the password grant
const OAUTH_CLIENT_ID: &str = "seedr_chrome";

const TOKEN_PATH: &[&str] = &["oauth_test", "token.php"];
const RESOURCE_PATH: &[&str] = &["oauth_test", "resource.php"];
const FOLDER_PATH: &[&str] = &["api", "folder"];

/// Entry point for authenticating against Seedr
///
/// Holds the HTTP client shared by every [`SeedrClient`] it produces.
#[derive(Clone)]
pub struct SeedrApi {
    http: reqwest::Client,
    base_url: Url,
}

impl SeedrApi {
    /// Create a new API entry point
    ///
    /// # Arguments
    /// * `base_url` - Seedr base URL (e.g., https://www.seedr.cc)
    /// * `timeout` - Upper bound for every remote call
    ///
    /// # Errors
    /// Returns an error if the base URL is not an http(s) URL or the HTTP
    /// client cannot be constructed
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| SeedrError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(SeedrError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self { http, base_url })
    }

    fn client_for(&self, token: String) -> SeedrClient {
        SeedrClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }
}

#[async_trait]
impl Authenticator for SeedrApi {
    async fn login(&self, email: &str, password: &str) -> Result<Authenticated> {
        tracing::info!("Authenticating with Seedr using account credentials");
        let form = [
            ("grant_type", "password"),
            ("client_id", OAUTH_CLIENT_ID),
            ("type", "login"),
            ("username", email),
            ("password", password),
        ];

        let resp = self
            .http
            .post(endpoint(&self.base_url, TOKEN_PATH, None)?)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Seedr for login: {}", e);
                SeedrError::from(e)
            })?;

        let body = read_json(resp).await.and_then(|(status, body)| classify_login(status, body))?;
        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SeedrError::Decode("login response has no access_token".to_string()))?
            .to_string();

        let client = self.client_for(token.clone());
        Ok(Authenticated::new(std::sync::Arc::new(client), Some(token)))
    }

    async fn from_token(&self, token: &str) -> Result<Authenticated> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SeedrError::LoginRequired);
        }

        let client = self.client_for(token.to_string());
        // The token is opaque; one drive request tells us whether it still works
        client.get_drive().await.map_err(|e| {
            tracing::warn!("Seedr token rejected: {}", e);
            e
        })?;

        Ok(Authenticated::new(std::sync::Arc::new(client), Some(token.to_string())))
    }
}

/// Client bound to one Seedr access token
#[derive(Clone)]
pub struct SeedrClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl SeedrClient {
    async fn folder(&self, folder_id: Option<&str>) -> Result<Value> {
        let resp = self
            .http
            .get(endpoint(&self.base_url, FOLDER_PATH, folder_id)?)
            .query(&[("access_token", self.token.as_str())])
            .send()
            .await?;
        let (status, body) = read_json(resp).await?;
        classify_resource(status, body)
    }

    async fn resource(&self, func: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        form.push(("func", func));
        form.extend_from_slice(params);

        let resp = self
            .http
            .post(endpoint(&self.base_url, RESOURCE_PATH, None)?)
            .query(&[("access_token", self.token.as_str())])
            .form(&form)
            .send()
            .await?;
        let (status, body) = read_json(resp).await?;
        classify_resource(status, body)
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<Value> {
        let items = json!([{ "type": kind, "id": id }]).to_string();
        self.resource("delete", &[("delete_arr", items.as_str())]).await
    }
}

#[async_trait]
impl DriveClient for SeedrClient {
    async fn get_drive(&self) -> Result<Value> {
        tracing::debug!("Fetching Seedr drive root");
        self.folder(None).await.map_err(|e| {
            tracing::error!("Error fetching drive: {}", e);
            e
        })
    }

    async fn get_folder(&self, folder_id: &str) -> Result<Value> {
        tracing::debug!("Fetching Seedr folder {}", folder_id);
        self.folder(Some(folder_id))
            .await
            .map_err(|e| {
                tracing::error!("Error fetching folder {}: {}", folder_id, e);
                e
            })
    }

    async fn get_file(&self, file_id: &str) -> Result<Value> {
        tracing::debug!("Fetching Seedr file {}", file_id);
        self.resource("fetch_file", &[("folder_file_id", file_id)])
            .await
            .map_err(|e| {
                tracing::error!("Error fetching file {}: {}", file_id, e);
                e
            })
    }

    async fn add_torrent(&self, link: &str) -> Result<Value> {
        tracing::info!("Adding torrent to Seedr");
        self.resource("add_torrent", &[("torrent_magnet", link)])
            .await
            .map_err(|e| {
                tracing::error!("Error adding torrent: {}", e);
                e
            })
    }

    async fn delete_folder(&self, folder_id: &str) -> Result<Value> {
        tracing::info!("Deleting Seedr folder {}", folder_id);
        self.delete("folder", folder_id).await.map_err(|e| {
            tracing::error!("Error deleting folder {}: {}", folder_id, e);
            e
        })
    }

    async fn delete_file(&self, file_id: &str) -> Result<Value> {
        tracing::info!("Deleting Seedr file {}", file_id);
        self.delete("file", file_id).await.map_err(|e| {
            tracing::error!("Error deleting file {}: {}", file_id, e);
            e
        })
    }
}

/// Build an endpoint URL under the base URL
///
/// `id` is appended as a single percent-encoded path segment, so it can never
/// climb out of `path` or add a query string.
fn endpoint(base_url: &Url, path: &[&str], id: Option<&str>) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| SeedrError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(path)
        .extend(id);
    Ok(url)
}

async fn read_json(resp: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = resp.status();
    let text = resp.text().await?;
    if text.trim().is_empty() {
        return Ok((status, Value::Null));
    }
    match serde_json::from_str(&text) {
        Ok(body) => Ok((status, body)),
        Err(_) if status == StatusCode::UNAUTHORIZED => Ok((status, Value::Null)),
        Err(e) => Err(SeedrError::Decode(format!("HTTP {}: {}", status.as_u16(), e))),
    }
}

/// Map a token endpoint response onto the error taxonomy
fn classify_login(status: StatusCode, body: Value) -> Result<Value> {
    match error_code(&body) {
        Some("invalid_grant") | Some("invalid_client") => Err(SeedrError::InvalidLogin),
        Some(_) => Err(SeedrError::Api(error_message(&body))),
        None if status == StatusCode::UNAUTHORIZED => Err(SeedrError::InvalidLogin),
        None if !status.is_success() => Err(SeedrError::Api(format!("HTTP {}", status.as_u16()))),
        None => Ok(body),
    }
}

/// Map a resource response onto the error taxonomy
fn classify_resource(status: StatusCode, body: Value) -> Result<Value> {
    match error_code(&body) {
        Some("invalid_token") | Some("expired_token") => return Err(SeedrError::InvalidToken),
        Some(_) => return Err(SeedrError::Api(error_message(&body))),
        None => {}
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(SeedrError::InvalidToken);
    }
    if !status.is_success() {
        return Err(SeedrError::Api(format!("HTTP {}", status.as_u16())));
    }
    if body.get("result").and_then(Value::as_bool) == Some(false) {
        return Err(SeedrError::Api(error_message(&body)));
    }
    Ok(body)
}

fn error_code(body: &Value) -> Option<&str> {
    body.get("error").and_then(Value::as_str)
}

fn error_message(body: &Value) -> String {
    body.get("error_description")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "request rejected by Seedr".to_string())
}
