use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

use crate::repositories::StoreError;
use crate::validation::ValidationErrors;

/// Stable error codes exposed in every error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidParameter,
    MissingParameter,
    InvalidFormat,
    ContentNotFound,
    ResourceNotFound,
    InternalError,
    DatabaseError,
    TimeoutError,
    ConnectionError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::MissingParameter => "MISSING_PARAMETER",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ContentNotFound => "CONTENT_NOT_FOUND",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::TimeoutError => "TIMEOUT_ERROR",
            ErrorCode::ConnectionError => "CONNECTION_ERROR",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidParameter
            | ErrorCode::MissingParameter
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            ErrorCode::ContentNotFound | ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ErrorCode::TimeoutError => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::ConnectionError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request parameters failed validation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Request exceeded its deadline")]
    RequestTimeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(errors) => errors.code(),
            ApiError::MalformedRequest(_) => ErrorCode::InvalidFormat,
            ApiError::ContentNotFound(_) => ErrorCode::ContentNotFound,
            ApiError::ResourceNotFound(_) => ErrorCode::ResourceNotFound,
            ApiError::Store(StoreError::Database(_)) => ErrorCode::DatabaseError,
            ApiError::Store(StoreError::Timeout) => ErrorCode::TimeoutError,
            ApiError::Store(StoreError::Connection(_)) => ErrorCode::ConnectionError,
            ApiError::RequestTimeout => ErrorCode::TimeoutError,
            ApiError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code().status()
    }

    /// Message safe to return to callers. Store and internal detail never
    /// leaves the process.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::MalformedRequest(_) => "Request could not be decoded".to_string(),
            ApiError::ContentNotFound(id) => format!("Content '{id}' was not found"),
            ApiError::ResourceNotFound(path) => format!("Resource '{path}' was not found"),
            ApiError::Store(StoreError::Database(_)) => "A database error occurred".to_string(),
            ApiError::Store(StoreError::Timeout) => {
                "The content store did not respond in time".to_string()
            }
            ApiError::Store(StoreError::Connection(_)) => {
                "The content store is unavailable".to_string()
            }
            ApiError::RequestTimeout => "The request did not complete in time".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn details(&self) -> Option<Value> {
        match self {
            ApiError::Validation(errors) => Some(json!({ "errors": errors.errors() })),
            _ => None,
        }
    }

    /// Whether the underlying detail must stay in the logs.
    pub fn is_server_fault(&self) -> bool {
        self.status().is_server_error()
    }
}
