//! Error handling module
//!
//! Defines the normalized error shape shared by every upstream client and the
//! mapping from application errors to HTTP responses

use crate::prompts::PromptError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Symbolic error codes exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    GeminiAuthError,
    GeminiRateLimit,
    GeminiApiError,
    GeminiNoContent,
    GeminiRequestFailed,
    ElevenlabsAuthError,
    ElevenlabsRateLimit,
    ElevenlabsApiError,
    ElevenlabsRequestFailed,
    InvalidRequest,
    TemplateNotFound,
    UnresolvedVariables,
    InternalError,
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::GeminiAuthError => "GEMINI_AUTH_ERROR",
            ErrorCode::GeminiRateLimit => "GEMINI_RATE_LIMIT",
            ErrorCode::GeminiApiError => "GEMINI_API_ERROR",
            ErrorCode::GeminiNoContent => "GEMINI_NO_CONTENT",
            ErrorCode::GeminiRequestFailed => "GEMINI_REQUEST_FAILED",
            ErrorCode::ElevenlabsAuthError => "ELEVENLABS_AUTH_ERROR",
            ErrorCode::ElevenlabsRateLimit => "ELEVENLABS_RATE_LIMIT",
            ErrorCode::ElevenlabsApiError => "ELEVENLABS_API_ERROR",
            ErrorCode::ElevenlabsRequestFailed => "ELEVENLABS_REQUEST_FAILED",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            ErrorCode::UnresolvedVariables => "UNRESOLVED_VARIABLES",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream vendor a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Gemini,
    ElevenLabs,
}

impl Vendor {
    /// Map a non-2xx upstream status to the vendor's error code
    pub fn code_for_status(&self, status: u16) -> ErrorCode {
        match (self, status) {
            (Vendor::Gemini, 401 | 403) => ErrorCode::GeminiAuthError,
            (Vendor::Gemini, 429) => ErrorCode::GeminiRateLimit,
            (Vendor::Gemini, _) => ErrorCode::GeminiApiError,
            (Vendor::ElevenLabs, 401 | 403) => ErrorCode::ElevenlabsAuthError,
            (Vendor::ElevenLabs, 429) => ErrorCode::ElevenlabsRateLimit,
            (Vendor::ElevenLabs, _) => ErrorCode::ElevenlabsApiError,
        }
    }

    /// Code used when the request never produced an HTTP status
    pub fn request_failed_code(&self) -> ErrorCode {
        match self {
            Vendor::Gemini => ErrorCode::GeminiRequestFailed,
            Vendor::ElevenLabs => ErrorCode::ElevenlabsRequestFailed,
        }
    }
}

/// Normalized error
///
/// Every upstream failure is converted into this shape before it reaches
/// the caller.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    /// Symbolic error code
    pub code: ErrorCode,
    /// Human readable message
    pub message: String,
    /// HTTP status
    pub status: u16,
    /// Opaque details (upstream payload, original error)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>, status: u16) -> Self {
        Self {
            code,
            message: message.into(),
            status,
            details: None,
        }
    }

    /// Attach details
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Error for a non-2xx upstream reply
    pub fn upstream(vendor: Vendor, status: u16, message: impl Into<String>) -> Self {
        Self::new(vendor.code_for_status(status), message, status)
    }

    /// Error for a transport or parse failure
    pub fn request_failed(vendor: Vendor, message: impl Into<String>) -> Self {
        Self::new(
            vendor.request_failed_code(),
            message,
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        )
    }

    /// HTTP status code, falling back to 500 for out-of-range values
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.code, ErrorCode::GeminiAuthError | ErrorCode::ElevenlabsAuthError)
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Normalized upstream error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Prompt template error
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        normalize(self).0
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        match self {
            AppError::Api(e) => !e.is_auth_error(),
            _ => true,
        }
    }
}

/// Map any application error to an HTTP status and normalized body
///
/// Normalized upstream errors pass through verbatim. Unclassified errors
/// become `INTERNAL_ERROR` with status 500.
pub fn normalize(error: &AppError) -> (StatusCode, ApiError) {
    let body = match error {
        AppError::Api(e) => e.clone(),
        AppError::Validation(msg) => ApiError::new(
            ErrorCode::InvalidRequest,
            msg.clone(),
            StatusCode::BAD_REQUEST.as_u16(),
        ),
        AppError::Prompt(e @ PromptError::TemplateNotFound(_)) => ApiError::new(
            ErrorCode::TemplateNotFound,
            e.to_string(),
            StatusCode::NOT_FOUND.as_u16(),
        ),
        AppError::Prompt(e @ PromptError::UnresolvedVariables(names)) => ApiError::new(
            ErrorCode::UnresolvedVariables,
            e.to_string(),
            StatusCode::BAD_REQUEST.as_u16(),
        )
        .with_details(serde_json::json!({ "variables": names })),
        AppError::Serialization(_) | AppError::Config(_) | AppError::Internal(_) => ApiError::new(
            ErrorCode::InternalError,
            error.to_string(),
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        ),
    };

    (body.status_code(), body)
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = normalize(&self);

        if self.should_log_details() {
            tracing::error!("Application error: {} - Code: {} - Status code: {}", self, body.code, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", body.code, status);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_status_mapping() {
        assert_eq!(Vendor::Gemini.code_for_status(StatusCode::UNAUTHORIZED.as_u16()), ErrorCode::GeminiAuthError);
        assert_eq!(Vendor::Gemini.code_for_status(StatusCode::FORBIDDEN.as_u16()), ErrorCode::GeminiAuthError);
        assert_eq!(Vendor::Gemini.code_for_status(StatusCode::TOO_MANY_REQUESTS.as_u16()), ErrorCode::GeminiRateLimit);
        assert_eq!(Vendor::Gemini.code_for_status(StatusCode::BAD_REQUEST.as_u16()), ErrorCode::GeminiApiError);
        assert_eq!(Vendor::ElevenLabs.code_for_status(StatusCode::UNAUTHORIZED.as_u16()), ErrorCode::ElevenlabsAuthError);
        assert_eq!(Vendor::ElevenLabs.code_for_status(StatusCode::TOO_MANY_REQUESTS.as_u16()), ErrorCode::ElevenlabsRateLimit);
        assert_eq!(Vendor::ElevenLabs.code_for_status(StatusCode::SERVICE_UNAVAILABLE.as_u16()), ErrorCode::ElevenlabsApiError);
    }

    #[test]
    fn test_code_serialization_matches_as_str() {
        for code in [
            ErrorCode::GeminiNoContent,
            ErrorCode::ElevenlabsRequestFailed,
            ErrorCode::UnresolvedVariables,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::Value::String(code.as_str().to_string()));
        }
    }

    #[test]
    fn test_normalized_error_passes_through() {
        let api_error = ApiError::new(ErrorCode::GeminiRateLimit, "slow down", 429)
            .with_details(serde_json::json!({"retry": false}));
        let (status, body) = normalize(&AppError::Api(api_error.clone()));

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, api_error);
    }

    #[test]
    fn test_unclassified_error_becomes_internal() {
        let (status, body) = normalize(&AppError::Internal("boom".to_string()));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, ErrorCode::InternalError);
        assert_eq!(body.status, 500);
        assert!(body.message.contains("boom"));
        assert!(body.details.is_none());
    }

    #[test]
    fn test_should_log_details() {
        let auth = AppError::Api(ApiError::new(ErrorCode::ElevenlabsAuthError, "bad key", 401));
        assert!(!auth.should_log_details());
        assert!(AppError::Validation("x".to_string()).should_log_details());
    }
}
