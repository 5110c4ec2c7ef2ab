//! Request-scoped middleware: correlation ids and the resolve-route rate limit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

pub(crate) const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id for one request, available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuses a caller-supplied `x-request-id`, else generates a `UUIDv4`.
    fn for_request(req: &Request) -> Self {
        let id = req
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);
        Self(id)
    }
}

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    used: usize,
}

/// Fixed-window counter shared by every route that triggers outbound fetches.
/// A resolve costs up to two upstream requests, so this also caps upstream load.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(Window {
                opened_at: Instant::now(),
                used: 0,
            })),
        }
    }

    /// Counts one request against the current window. Returns `false` once
    /// the cap is reached; the count resets when the window elapses.
    async fn try_acquire(&self) -> bool {
        let mut current = self.current.lock().await;
        if current.opened_at.elapsed() >= self.window {
            *current = Window {
                opened_at: Instant::now(),
                used: 0,
            };
        }

        if current.used >= self.max_requests {
            return false;
        }
        current.used += 1;
        true
    }
}

/// Tags the request with a [`RequestId`] extension and echoes it in the
/// `x-request-id` response header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = RequestId::for_request(&req);
    let header = HeaderValue::from_str(&id.0).ok();
    req.extensions_mut().insert(id);

    let mut res = next.run(req).await;
    if let Some(value) = header {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

/// Rejects requests over the window cap with a `rate_limited` API error.
pub async fn enforce_rate_limit(
    State(limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    if limit.try_acquire().await {
        return next.run(req).await;
    }

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map_or_else(String::new, |id| id.0.clone());
    tracing::warn!(
        path = %req.uri().path(),
        request_id = %request_id,
        "rate limit exceeded"
    );
    ApiError::new(request_id, "rate_limited", "rate limit exceeded").into_response()
}
