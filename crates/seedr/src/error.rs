use thiserror::Error;

/// Errors raised by the Seedr client
#[derive(Debug, Error)]
pub enum SeedrError {
    /// Email/password pair rejected by the service
    #[error("Invalid Seedr email or password")]
    InvalidLogin,
    /// Token expired, revoked, or malformed
    #[error("Invalid or expired Seedr token")]
    InvalidToken,
    /// Operation attempted without any token
    #[error("Seedr login required")]
    LoginRequired,
    /// The service answered with an error payload
    #[error("Seedr API error: {0}")]
    Api(String),
    /// Base URL is not usable for API requests
    #[error("Invalid Seedr URL: {0}")]
    InvalidUrl(String),
    /// Transport failure (connect, timeout, TLS)
    #[error("Seedr request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body was not the JSON we expected
    #[error("Unexpected Seedr response: {0}")]
    Decode(String),
}

impl SeedrError {
    /// Whether the error means the token should be discarded
    pub fn is_token_failure(&self) -> bool {
        matches!(self, SeedrError::InvalidToken | SeedrError::LoginRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failure_excludes_invalid_login() {
        assert!(SeedrError::InvalidToken.is_token_failure());
        assert!(SeedrError::LoginRequired.is_token_failure());
        assert!(!SeedrError::InvalidLogin.is_token_failure());
    }

    #[test]
    fn test_display_carries_api_message() {
        let err = SeedrError::Api("Not enough space".to_string());
        assert_eq!(err.to_string(), "Seedr API error: Not enough space");
    }
}
