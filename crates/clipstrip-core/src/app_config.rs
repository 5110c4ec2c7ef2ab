use std::net::SocketAddr;

/// Desktop browser UA sent on outbound requests; the storefront serves a
/// stripped page without `__NEXT_DATA__` to unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_ALLOWED_HOSTS: &str = "shopee.com.br,shp.ee";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    /// `None` means outbound fetches are unrestricted (`CLIPSTRIP_ALLOWED_HOSTS=*`).
    pub allowed_hosts: Option<Vec<String>>,
    pub rate_limit_per_minute: usize,
}
