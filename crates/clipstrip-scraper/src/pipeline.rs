//! End-to-end resolution: share link in, watermark-free video URL out.

use url::Url;

use crate::client::{HostPolicy, PageClient};
use crate::error::ResolveError;
use crate::normalize::normalize_url;
use crate::parse::{extract_next_data, locate_watermark_url};
use crate::trace::TraceLog;
use crate::types::ResolvedVideo;
use crate::watermark::strip_watermark;

/// Result of one pipeline run. The trace is present whether or not the run
/// succeeded and lists every attempted step in order.
#[derive(Debug)]
pub struct Resolution {
    pub trace: TraceLog,
    pub outcome: Result<ResolvedVideo, ResolveError>,
}

/// Runs the four-step resolution pipeline. Holds no per-request state, so a
/// single instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: PageClient,
}

impl Resolver {
    #[must_use]
    pub fn new(client: PageClient) -> Self {
        Self { client }
    }

    /// Builds a resolver with its own [`PageClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Transport`] if the HTTP client cannot be built.
    pub fn with_settings(
        timeout_secs: u64,
        user_agent: &str,
        policy: HostPolicy,
    ) -> Result<Self, ResolveError> {
        Ok(Self::new(PageClient::new(timeout_secs, user_agent, policy)?))
    }

    /// Resolves a pasted share link to its watermark-free video URL.
    pub async fn resolve(&self, raw_url: &str) -> Resolution {
        let mut trace = TraceLog::new();
        let outcome = self.run(raw_url, &mut trace).await;

        match &outcome {
            Ok(video) => tracing::info!(video_url = %video.video_url, "resolved video"),
            Err(e) => tracing::warn!(code = e.code(), error = %e, "resolution failed"),
        }

        Resolution { trace, outcome }
    }

    async fn run(
        &self,
        raw_url: &str,
        trace: &mut TraceLog,
    ) -> Result<ResolvedVideo, ResolveError> {
        trace.push(format!("received: {raw_url}"));

        let normalized = normalize_url(&self.client, raw_url, trace).await;
        trace.push(format!("normalized: {}", normalized.url()));

        let page = match self.client.fetch_page(normalized.url()).await {
            Ok(page) => page,
            Err(e) => {
                trace.push(format!("fetch error: {e}"));
                return Err(e);
            }
        };
        trace.push(format!("http status: {}", page.status));
        trace.push(format!("final url: {}", page.final_url));

        if page.status != 200 {
            return Err(ResolveError::NonSuccessStatus {
                status: page.status,
            });
        }

        let Some(payload) = extract_next_data(&page.body).filter(|payload| !payload.is_empty())
        else {
            trace.push("data block: not found");
            return Err(ResolveError::DataBlockNotFound);
        };

        let Some(watermark_url) = locate_watermark_url(payload) else {
            trace.push("watermark field: not found");
            return Err(ResolveError::FieldNotFound);
        };
        trace.push(format!("watermark url: {watermark_url}"));

        if !is_web_url(&watermark_url) {
            trace.push("watermark field: not an http(s) URL");
            return Err(ResolveError::FieldNotFound);
        }

        let video_url = strip_watermark(&watermark_url).into_owned();
        trace.push(format!("clean url: {video_url}"));

        Ok(ResolvedVideo {
            video_url,
            watermark_url,
        })
    }
}

/// Only http(s) links may be rendered into `href`/`src` attributes.
fn is_web_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}
