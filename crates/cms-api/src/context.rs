use std::convert::Infallible;
use std::time::Instant;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request correlation data stamped onto every envelope.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub started_at: Instant,
}

impl RequestContext {
    /// Uses the caller's id when it is non-empty, otherwise generates one.
    /// Over HTTP the id normally comes from `SetRequestIdLayer`; generation
    /// covers callers that build requests without headers.
    pub fn new(request_id: Option<&str>) -> Self {
        let request_id = request_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            request_id,
            started_at: Instant::now(),
        }
    }
}

/// Reads the `x-request-id` header installed by the request-id layers.
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(RequestContext::new(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_id_when_absent() {
        let ctx = RequestContext::new(None);
        assert!(Uuid::parse_str(&ctx.request_id).is_ok());
    }

    #[test]
    fn test_blank_header_is_replaced() {
        let ctx = RequestContext::new(Some("   "));
        assert!(!ctx.request_id.trim().is_empty());
        assert!(Uuid::parse_str(&ctx.request_id).is_ok());
    }

    #[test]
    fn test_caller_id_is_kept() {
        let ctx = RequestContext::new(Some("trace-42"));
        assert_eq!(ctx.request_id, "trace-42");
    }
}
