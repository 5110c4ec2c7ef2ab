//! Share-link normalization: short-link expansion, then universal-link unwrapping.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::{form_urlencoded, Url};

use crate::client::PageClient;
use crate::error::ResolveError;
use crate::trace::TraceLog;
use crate::types::Normalization;

/// Substring identifying a short link (`shp.ee`, `br.shp.ee`).
pub const SHORT_LINK_MARKER: &str = "shp.ee";

/// Substring identifying the app-handoff wrapper around a product URL.
pub const UNIVERSAL_LINK_MARKER: &str = "shopee.com.br/universal-link";

const REDIR_PARAM: &str = "redir";

/// Turns a pasted share link into the direct product-page URL.
///
/// Short links are expanded first, since they commonly land on a universal
/// link. Any failure degrades to the trimmed input with the cause recorded
/// in `trace`; this function never fails.
pub async fn normalize_url(
    client: &PageClient,
    raw: &str,
    trace: &mut TraceLog,
) -> Normalization {
    let original = raw.trim();
    trace.push(format!("initial: {original}"));

    match try_normalize(client, original, trace).await {
        Ok(url) => Normalization::Resolved(url),
        Err(e) => {
            tracing::warn!(
                url = original,
                error = %e,
                "link normalization failed; using input as-is"
            );
            trace.push(format!("normalize error: {e}"));
            Normalization::Degraded {
                original: original.to_owned(),
                reason: e.to_string(),
            }
        }
    }
}

async fn try_normalize(
    client: &PageClient,
    original: &str,
    trace: &mut TraceLog,
) -> Result<String, ResolveError> {
    let mut current = original.to_owned();

    if current.contains(SHORT_LINK_MARKER) {
        current = client.expand_short_link(&current).await?;
        trace.push(format!("after short-link redirect: {current}"));
    }

    if let Some(redir) = unwrap_universal_link(&current) {
        trace.push(format!("after redir decode: {redir}"));
        current = redir;
    }

    Ok(current)
}

/// Extracts the wrapped target from a universal link's `redir` parameter.
///
/// Returns `None` when `url` is not a universal link or carries no non-blank
/// `redir`. The parameter is form-decoded by the query parser and then
/// percent-decoded once more, since share links double-encode it.
///
/// Links pasted without a scheme do not parse as absolute URLs; for those
/// the text after the first `?` (up to any `#`) is read as the query.
#[must_use]
pub fn unwrap_universal_link(url: &str) -> Option<String> {
    if !url.contains(UNIVERSAL_LINK_MARKER) {
        return None;
    }

    match Url::parse(url) {
        Ok(parsed) => first_redir(parsed.query_pairs()),
        Err(_) => first_redir(form_urlencoded::parse(raw_query(url).as_bytes())),
    }
}

fn raw_query(url: &str) -> &str {
    let query = url.split_once('?').map_or("", |(_, query)| query);
    query.split_once('#').map_or(query, |(query, _)| query)
}

fn first_redir<'a>(
    mut pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
) -> Option<String> {
    pairs
        .find(|(key, value)| key == REDIR_PARAM && !value.trim().is_empty())
        .map(|(_, value)| percent_decode_str(&value).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
