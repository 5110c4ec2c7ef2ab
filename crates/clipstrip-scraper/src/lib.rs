pub mod client;
pub mod error;
pub mod normalize;
pub mod parse;
mod parse_helpers;
pub mod pipeline;
pub mod trace;
pub mod types;
pub mod watermark;

pub use client::{HostPolicy, PageClient};
pub use error::ResolveError;
pub use normalize::{normalize_url, unwrap_universal_link};
pub use parse::{extract_next_data, locate_watermark_url};
pub use pipeline::{Resolution, Resolver};
pub use trace::TraceLog;
pub use types::{FetchResult, Normalization, ResolvedVideo};
pub use watermark::strip_watermark;
