use std::time::Instant;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::errors::{ApiError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: u64,
}

/// Uniform wrapper for every response, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl<T> Envelope<T> {
    /// HTTP status matching the error code, `200 OK` for success.
    pub fn status(&self) -> StatusCode {
        self.error
            .as_ref()
            .map(|err| err.code.status())
            .unwrap_or(StatusCode::OK)
    }
}

fn stamp(request_id: &str, started_at: Instant) -> ResponseMeta {
    let elapsed = started_at.elapsed().as_millis();

    ResponseMeta {
        request_id: request_id.to_string(),
        timestamp: Utc::now(),
        processing_time_ms: u64::try_from(elapsed).unwrap_or(u64::MAX),
    }
}

pub fn assemble_success<T>(data: T, request_id: &str, started_at: Instant) -> Envelope<T> {
    Envelope {
        success: true,
        data: Some(data),
        error: None,
        meta: Some(stamp(request_id, started_at)),
    }
}

/// Builds the error envelope. Server-side faults are logged here with their
/// full detail; only the public message goes into the body.
pub fn assemble_error<T>(err: &ApiError, request_id: &str, started_at: Instant) -> Envelope<T> {
    let code = err.code();

    if err.is_server_fault() {
        error!(request_id, code = %code, error = %err, "Request failed");
    } else {
        warn!(request_id, code = %code, error = %err, "Request rejected");
    }

    let meta = stamp(request_id, started_at);

    Envelope {
        success: false,
        data: None,
        error: Some(ErrorBody {
            code,
            message: err.public_message(),
            details: err.details(),
            timestamp: meta.timestamp,
            request_id: request_id.to_string(),
        }),
        meta: Some(meta),
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
