//! Outbound host allow-list.

use reqwest::Url;

use crate::error::ResolveError;

/// Which hosts the pipeline may contact. Caller input decides every URL we
/// fetch, so production deployments should run with an allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPolicy {
    Any,
    /// Exact hosts or parent domains; `shopee.com.br` also admits
    /// `m.shopee.com.br`.
    AllowList(Vec<String>),
}

impl HostPolicy {
    /// Builds a policy from the configured host list; `None` means unrestricted.
    #[must_use]
    pub fn from_allowed_hosts(hosts: Option<Vec<String>>) -> Self {
        match hosts {
            None => Self::Any,
            Some(hosts) => Self::AllowList(
                hosts
                    .into_iter()
                    .map(|h| h.trim().trim_start_matches('.').to_ascii_lowercase())
                    .filter(|h| !h.is_empty())
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn allows_host(&self, host: &str) -> bool {
        match self {
            Self::Any => true,
            Self::AllowList(entries) => {
                let host = host.trim_end_matches('.').to_ascii_lowercase();
                entries.iter().any(|entry| {
                    host == *entry
                        || host
                            .strip_suffix(entry.as_str())
                            .is_some_and(|prefix| prefix.ends_with('.'))
                })
            }
        }
    }

    #[must_use]
    pub fn allows(&self, url: &Url) -> bool {
        match self {
            Self::Any => true,
            Self::AllowList(_) => url.host_str().is_some_and(|h| self.allows_host(h)),
        }
    }

    /// # Errors
    ///
    /// Returns [`ResolveError::HostNotAllowed`] when the URL's host is outside the policy.
    pub fn check(&self, url: &Url) -> Result<(), ResolveError> {
        if self.allows(url) {
            Ok(())
        } else {
            Err(ResolveError::HostNotAllowed {
                host: url.host_str().unwrap_or_default().to_owned(),
            })
        }
    }
}
