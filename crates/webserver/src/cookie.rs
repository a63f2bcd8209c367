//! Signed owner session cookie

use axum::http::{header, HeaderMap, HeaderValue};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the owner session reference
pub const SESSION_COOKIE: &str = "cloudtorrent_owner";

fn session_mac(session_id: &str, secret: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(session_id.as_bytes());
    Some(mac)
}

/// Generate the signature for a session id
///
/// # Arguments
/// * `session_id` - Session id the cookie refers to
/// * `secret` - Process secret used as the HMAC key
///
/// # Returns
/// * 64-character hexadecimal HMAC-SHA256
pub fn sign_session_id(session_id: &str, secret: &str) -> Option<String> {
    let mac = session_mac(session_id, secret)?;
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Cookie value for a session: `<session_id>.<signature>`
pub fn session_cookie_value(session_id: &str, secret: &str) -> Option<String> {
    let signature = sign_session_id(session_id, secret)?;
    Some(format!("{}.{}", session_id, signature))
}

/// Verify a cookie value
///
/// # Returns
/// * `Some(session_id)` if the signature matches, `None` otherwise
pub fn verify_session_cookie<'a>(value: &'a str, secret: &str) -> Option<&'a str> {
    let (session_id, signature) = value.rsplit_once('.')?;
    if session_id.is_empty() {
        return None;
    }
    let expected = hex::decode(signature).ok()?;
    let mac = session_mac(session_id, secret)?;
    // Constant-time comparison
    mac.verify_slice(&expected).ok()?;
    Some(session_id)
}

/// Find a cookie by name in the request headers
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value establishing the session cookie
pub fn session_cookie_header(session_id: &str, secret: &str) -> Option<HeaderValue> {
    let value = session_cookie_value(session_id, secret)?;
    HeaderValue::from_str(&format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE, value)).ok()
}

/// `Set-Cookie` value removing the session cookie
pub fn clear_session_cookie_header() -> HeaderValue {
    HeaderValue::from_static(
        "cloudtorrent_owner=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax; Path=/",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_deterministic() {
        assert_eq!(sign_session_id("abc", "secret"), sign_session_id("abc", "secret"));
    }

    #[test]
    fn test_signature_depends_on_inputs() {
        assert_ne!(sign_session_id("abc", "secret"), sign_session_id("abd", "secret"));
        assert_ne!(sign_session_id("abc", "secret1"), sign_session_id("abc", "secret2"));
    }

    #[test]
    fn test_signature_is_hmac_sha256() {
        // RFC 4231 test case 2
        let sig = sign_session_id("what do ya want for nothing?", "Jefe").unwrap();
        assert_eq!(sig, "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843");
    }

    #[test]
    fn test_verify_roundtrip() {
        let value = session_cookie_value("f00d", "secret").unwrap();
        assert_eq!(verify_session_cookie(&value, "secret"), Some("f00d"));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let value = session_cookie_value("f00d", "secret").unwrap();
        assert_eq!(verify_session_cookie(&value, "other"), None);

        let forged = format!("beef.{}", sign_session_id("f00d", "secret").unwrap());
        assert_eq!(verify_session_cookie(&forged, "secret"), None);

        assert_eq!(verify_session_cookie("f00d", "secret"), None);
        assert_eq!(verify_session_cookie("", "secret"), None);
        assert_eq!(verify_session_cookie(".abc", "secret"), None);
    }

    #[test]
    fn test_verify_rejects_truncated_or_malformed_signature() {
        let signature = sign_session_id("f00d", "secret").unwrap();
        let truncated = format!("f00d.{}", &signature[..16]);
        assert_eq!(verify_session_cookie(&truncated, "secret"), None);

        let not_hex = format!("f00d.{}", "z".repeat(64));
        assert_eq!(verify_session_cookie(&not_hex, "secret"), None);
    }

    #[test]
    fn test_parse_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; cloudtorrent_owner=abc.def; lang=en"),
        );
        assert_eq!(parse_cookie(&headers, SESSION_COOKIE).as_deref(), Some("abc.def"));
        assert_eq!(parse_cookie(&headers, "lang").as_deref(), Some("en"));
        assert!(parse_cookie(&headers, "missing").is_none());
    }

    #[test]
    fn test_parse_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("cloudtorrent_owner=x.y"));
        assert_eq!(parse_cookie(&headers, SESSION_COOKIE).as_deref(), Some("x.y"));
    }

    #[test]
    fn test_set_cookie_header() {
        let value = session_cookie_header("abc", "secret").unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("cloudtorrent_owner=abc."));
        assert!(text.contains("HttpOnly"));
        assert!(clear_session_cookie_header().to_str().unwrap().starts_with("cloudtorrent_owner=deleted"));
    }
}
