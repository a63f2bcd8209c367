//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Machine-readable error codes returned alongside messages
pub mod code {
    pub const AUTH_REQUIRED: &str = "AUTH_REQUIRED";
    pub const INVALID_LOGIN: &str = "INVALID_LOGIN";
    pub const SEEDR_UNAVAILABLE: &str = "SEEDR_UNAVAILABLE";
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
}

/// Application error types
#[derive(Debug)]
pub enum ApiError {
    /// Public access or the Seedr client is not available (503)
    Unavailable {
        message: String,
        code: Option<&'static str>,
    },
    BadRequest(String),
    Unauthorized {
        message: String,
        code: &'static str,
    },
    NotFound(String),
    /// Remote or local failure, carrying its description (500)
    Internal {
        message: String,
        code: Option<&'static str>,
    },
}

impl ApiError {
    pub fn public_unavailable() -> Self {
        ApiError::Unavailable {
            message: "Public access not configured".to_string(),
            code: None,
        }
    }

    pub fn auth_required() -> Self {
        ApiError::Unauthorized {
            message: "Owner authentication required".to_string(),
            code: code::AUTH_REQUIRED,
        }
    }

    pub fn internal(message: impl ToString) -> Self {
        ApiError::Internal {
            message: message.to_string(),
            code: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<seedr::SeedrError> for ApiError {
    fn from(err: seedr::SeedrError) -> Self {
        ApiError::internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, code) = match self {
            ApiError::Unavailable { message, code } => (message, code),
            ApiError::BadRequest(message) => (message, None),
            ApiError::Unauthorized { message, code } => (message, Some(code)),
            ApiError::NotFound(message) => (message, None),
            ApiError::Internal { message, code } => (message, code),
        };

        let body = match code {
            Some(code) => json!({ "error": message, "code": code }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::public_unavailable().status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::auth_required().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_seedr_error_becomes_internal_with_description() {
        let err: ApiError = seedr::SeedrError::Api("quota exceeded".to_string()).into();
        match err {
            ApiError::Internal { message, code } => {
                assert_eq!(message, "Seedr API error: quota exceeded");
                assert!(code.is_none());
            }
            other => panic!("Expected internal error, got {:?}", other),
        }
    }
}
