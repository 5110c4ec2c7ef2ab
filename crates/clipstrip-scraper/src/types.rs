//! Values passed between pipeline stages.

use serde::Serialize;

/// Outcome of a single page GET. Any HTTP status is a valid result;
/// only transport-level failures are errors.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    /// URL after all followed redirects.
    pub final_url: String,
    pub body: String,
}

/// Result of best-effort link normalization. Never an error: on failure the
/// trimmed input is carried forward together with the cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    Resolved(String),
    Degraded { original: String, reason: String },
}

impl Normalization {
    /// The URL the next stage should fetch.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Resolved(url) => url,
            Self::Degraded { original, .. } => original,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVideo {
    /// Watermark-free video URL.
    pub video_url: String,
    /// URL as found in the page payload, before the suffix rewrite.
    pub watermark_url: String,
}
