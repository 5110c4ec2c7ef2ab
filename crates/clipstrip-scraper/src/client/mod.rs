//! HTTP client for storefront pages and short-link expansion.

mod hosts;

use std::time::Duration;

use reqwest::{redirect, Client, Url};

use crate::error::ResolveError;
use crate::types::FetchResult;

pub use hosts::HostPolicy;

/// Redirect hops followed before the request fails.
pub(crate) const MAX_REDIRECTS: usize = 10;

/// Single-attempt HTTP client shared by every stage of the pipeline.
///
/// Each call makes exactly one GET bounded by the configured timeout.
/// Redirects are followed, but a hop to a host outside the [`HostPolicy`]
/// stops the chain and the redirect response itself is returned.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: Client,
    policy: HostPolicy,
}

impl PageClient {
    /// Creates a `PageClient` with a fixed per-call timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        policy: HostPolicy,
    ) -> Result<Self, ResolveError> {
        let redirect_policy = {
            let policy = policy.clone();
            redirect::Policy::custom(move |attempt| {
                if attempt.previous().len() >= MAX_REDIRECTS {
                    attempt.error("too many redirects")
                } else if policy.allows(attempt.url()) {
                    attempt.follow()
                } else {
                    tracing::warn!(
                        url = %attempt.url(),
                        "redirect to host outside allow-list; not following"
                    );
                    attempt.stop()
                }
            })
        };

        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .redirect(redirect_policy)
            .build()?;

        Ok(Self { client, policy })
    }

    /// Fetches a page, following redirects, and returns status, final URL and body.
    ///
    /// A non-2xx status is still `Ok`; the caller decides what to do with it.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidUrl`] — `url` does not parse.
    /// - [`ResolveError::HostNotAllowed`] — `url` is outside the host policy.
    /// - [`ResolveError::Transport`] — connection failure, timeout, or an
    ///   unreadable body.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchResult, ResolveError> {
        let target = self.checked_url(url)?;

        let response = self
            .client
            .get(target)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9,en;q=0.8")
            .send()
            .await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        tracing::debug!(
            url,
            status,
            final_url = %final_url,
            bytes = body.len(),
            "fetched page"
        );

        Ok(FetchResult {
            status,
            final_url,
            body,
        })
    }

    /// Follows a short link's redirects and returns the URL it lands on.
    ///
    /// # Errors
    ///
    /// Same as [`PageClient::fetch_page`].
    pub async fn expand_short_link(&self, url: &str) -> Result<String, ResolveError> {
        let target = self.checked_url(url)?;
        let response = self.client.get(target).send().await?;
        let final_url = response.url().to_string();

        tracing::debug!(
            url,
            final_url = %final_url,
            status = response.status().as_u16(),
            "expanded short link"
        );

        Ok(final_url)
    }

    fn checked_url(&self, url: &str) -> Result<Url, ResolveError> {
        let parsed = parse_url(url)?;
        self.policy.check(&parsed)?;
        Ok(parsed)
    }
}

/// Parses a URL, mapping failures to [`ResolveError::InvalidUrl`].
fn parse_url(url: &str) -> Result<Url, ResolveError> {
    Url::parse(url).map_err(|e| ResolveError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
