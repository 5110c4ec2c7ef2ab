//! Watermark suffix removal.
//!
//! Watermarked videos are served as `.../mms/<id>.<n1>.<n2>.mp4`; the clean
//! file lives at `.../mms/<id>.mp4`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static WATERMARK_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d+\.\d+\.mp4$").expect("valid regex"));

/// Rewrites a trailing `.<digits>.<digits>.mp4` to `.mp4`.
///
/// Only the end of the string is considered; URLs without the suffix are
/// returned borrowed and unchanged.
#[must_use]
pub fn strip_watermark(url: &str) -> Cow<'_, str> {
    WATERMARK_SUFFIX_RE.replace(url, ".mp4")
}
