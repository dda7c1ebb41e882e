use thiserror::Error;

use crate::provider::{Operation, ResourceKind};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        resource: ResourceKind,
        operation: Operation,
    },

    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("{resource} '{id}' not found")]
    NotFound { resource: ResourceKind, id: String },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    /// Error code reported by the API, if the failure came from an envelope.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            ProviderError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
