//! Page-payload extraction: the `__NEXT_DATA__` block and the watermarked video URL inside it.
//!
//! Both steps are text pattern matches rather than HTML/JSON parsing. The
//! field lookup falls back to a structural `serde_json` walk only when the
//! compact `"key":"value"` form is absent.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse_helpers::{find_string_field, unescape_slashes};

/// Key of the watermarked video URL inside the page payload.
pub const WATERMARK_FIELD: &str = "watermarkVideoUrl";

static NEXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("valid regex")
});

// Value runs to the next unescaped quote.
static WATERMARK_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""watermarkVideoUrl":"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});

/// Returns the inner text of the first `__NEXT_DATA__` JSON script block,
/// verbatim. The block may span multiple lines.
#[must_use]
pub fn extract_next_data(html: &str) -> Option<&str> {
    NEXT_DATA_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Finds the watermarked video URL in a page payload, with `\/` un-escaped.
///
/// Returns `None` when the field is missing or empty.
#[must_use]
pub fn locate_watermark_url(payload: &str) -> Option<String> {
    if let Some(caps) = WATERMARK_FIELD_RE.captures(payload) {
        let raw = caps.get(1).map_or("", |m| m.as_str());
        return Some(unescape_slashes(raw)).filter(|url| !url.is_empty());
    }

    let found = find_string_field(payload, WATERMARK_FIELD);
    if found.is_some() {
        tracing::debug!("watermark field located by structural fallback");
    }
    found
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
