//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success answer carrying the backend message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a server-side rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message sent by the backend, if any
    pub fn server_message(&self) -> Option<&str> {
        let msg = match self {
            Self::Api { message, .. }
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Validation(message)
            | Self::InvalidResponse(message) => message.as_str(),
            _ => return None,
        };
        Some(msg.trim()).filter(|m| !m.is_empty())
    }

    /// Fill an empty server message with an endpoint-specific default
    pub fn or_message(self, default: &str) -> Self {
        if self.server_message().is_some() {
            return self;
        }
        match self {
            Self::Api { status, .. } => Self::Api {
                status,
                message: default.to_string(),
            },
            Self::Unauthorized(_) => Self::Unauthorized(default.to_string()),
            Self::Forbidden(_) => Self::Forbidden(default.to_string()),
            Self::NotFound(_) => Self::NotFound(default.to_string()),
            Self::Validation(_) => Self::Validation(default.to_string()),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Connection refused, DNS failure or timeout
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Unified error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(e) if e.is_connect() || e.is_request() => ErrorCode::NetworkError,
            Self::Http(_) | Self::InvalidResponse(_) | Self::Serialization(_) => {
                ErrorCode::InvalidFormat
            }
            Self::Unauthorized(_) => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Api { status: 409, .. } => ErrorCode::AlreadyExists,
            Self::Api { status, .. } if *status < 500 => ErrorCode::InvalidRequest,
            Self::Api { .. } | Self::Internal(_) => ErrorCode::InternalError,
            Self::Url(_) => ErrorCode::ConfigError,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        let app = AppError::with_message(err.code(), message);
        match err.status() {
            Some(status) => app.with_detail("status", status),
            None => app,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
