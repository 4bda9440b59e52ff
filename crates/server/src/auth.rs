//! API key gate and request tracing middleware.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderValue;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the request correlation id.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Maximum length for trace IDs.
/// Longer trace IDs are truncated to prevent log bloat and potential log injection.
const MAX_TRACE_ID_LEN: usize = 128;

/// Trace ID for request correlation.
#[derive(Clone, Debug)]
pub struct TraceId(pub String);

impl TraceId {
    /// Generate a new random trace ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a trace ID from a client-provided value.
    ///
    /// Truncated to `MAX_TRACE_ID_LEN` characters, keeping only printable
    /// ASCII. Falls back to a generated id when nothing survives.
    pub fn from_client(value: &str) -> Self {
        let sanitized: String = value
            .chars()
            .take(MAX_TRACE_ID_LEN)
            .filter(|c| c.is_ascii_graphic() || *c == ' ')
            .collect();

        if sanitized.trim().is_empty() {
            Self::new()
        } else {
            Self(sanitized)
        }
    }

    /// Get the trace ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A key that passed the gate, exactly as the caller sent it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ApiKey>()
            .cloned()
            .ok_or(ApiError::MissingCredential)
    }
}

/// Compares the `X-API-KEY` header against the configured secret.
#[derive(Clone)]
pub struct ApiKeyGate {
    secret: Arc<str>,
}

impl ApiKeyGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Check a presented header value.
    ///
    /// An absent or empty header is a missing credential. Anything else that
    /// is not byte-for-byte the secret is unauthorized.
    pub fn check(&self, header: Option<&HeaderValue>) -> ApiResult<ApiKey> {
        let value = match header {
            Some(value) if !value.is_empty() => value,
            _ => return Err(ApiError::MissingCredential),
        };
        let presented = value.to_str().map_err(|_| ApiError::Unauthorized)?;
        if presented == &*self.secret {
            Ok(ApiKey(presented.to_string()))
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Reject requests without the right key before any extractor runs.
///
/// Installed with `route_layer`, so a bad key wins over a bad body.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match state.gate.check(req.headers().get(API_KEY_HEADER)) {
        Ok(key) => {
            req.extensions_mut().insert(key);
            Ok(next.run(req).await)
        }
        Err(err) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                code = err.code(),
                "Rejected request"
            );
            Err(err)
        }
    }
}

/// Extract trace ID from X-Trace-Id header or generate a new one.
fn extract_or_generate_trace_id(req: &Request) -> TraceId {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(TraceId::from_client)
        .unwrap_or_else(TraceId::new)
}

/// Run the request inside a span carrying its trace ID and echo that ID back.
pub async fn trace_middleware(mut req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(&req);
    let header = HeaderValue::from_str(trace_id.as_str()).ok();
    let span = tracing::info_span!("request", trace_id = %trace_id);
    req.extensions_mut().insert(trace_id);

    let mut response = next.run(req).instrument(span).await;
    if let Some(header) = header {
        response.headers_mut().insert(TRACE_ID_HEADER, header);
    }
    response
}
