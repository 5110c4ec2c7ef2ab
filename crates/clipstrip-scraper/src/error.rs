use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("internal error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("outbound requests to host \"{host}\" are not allowed")]
    HostNotAllowed { host: String },

    #[error("failed to load page: {status}")]
    NonSuccessStatus { status: u16 },

    #[error("__NEXT_DATA__ JSON block not found on the final page")]
    DataBlockNotFound,

    #[error("video link not found inside the JSON")]
    FieldNotFound,
}

impl ResolveError {
    /// Stable machine-readable code for API consumers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "fetch_failed",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::HostNotAllowed { .. } => "host_not_allowed",
            Self::NonSuccessStatus { .. } => "upstream_status",
            Self::DataBlockNotFound => "data_block_not_found",
            Self::FieldNotFound => "field_not_found",
        }
    }
}
