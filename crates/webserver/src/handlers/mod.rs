//! Request handlers
//!
//! Handlers are split by access class: `public` uses the shared public client,
//! `owner` runs behind [`crate::auth::require_owner`] with the owner's own client.

pub mod owner;
pub mod pages;
pub mod public;

use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;

/// Body of a torrent submission
#[derive(Debug, Deserialize)]
pub struct TorrentRequest {
    pub link: Option<String>,
}

/// Pull the torrent link out of an optional JSON body
///
/// A missing body, unparsable body, or blank link is a bad request.
pub(crate) fn required_link(body: Option<Json<TorrentRequest>>) -> Result<String, ApiError> {
    body.and_then(|Json(req)| req.link)
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Torrent link required".to_string()))
}

/// Check a folder or file id taken from the request path
///
/// Seedr ids are decimal integers; anything else is a bad request.
pub(crate) fn item_id(raw: String) -> Result<String, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest("Invalid id".to_string()));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id() {
        assert_eq!(item_id("12345".to_string()).unwrap(), "12345");
        for raw in ["", "abc", "-1", "1 ", "../../oauth_test/token.php", "7?x=1", "%2e%2e"] {
            assert!(matches!(item_id(raw.to_string()), Err(ApiError::BadRequest(_))), "{:?}", raw);
        }
    }

    #[test]
    fn test_required_link() {
        let body = Some(Json(TorrentRequest {
            link: Some(" magnet:?xt=urn:btih:abc ".to_string()),
        }));
        assert_eq!(required_link(body).unwrap(), "magnet:?xt=urn:btih:abc");
    }

    #[test]
    fn test_required_link_missing() {
        assert!(matches!(required_link(None), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            required_link(Some(Json(TorrentRequest { link: None }))),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            required_link(Some(Json(TorrentRequest { link: Some("  ".to_string()) }))),
            Err(ApiError::BadRequest(_))
        ));
    }
}
