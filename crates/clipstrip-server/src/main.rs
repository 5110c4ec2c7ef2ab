mod api;
mod middleware;
mod web;

use std::sync::Arc;

use clipstrip_scraper::{HostPolicy, Resolver};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, rate_limit_per_minute, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = clipstrip_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let policy = HostPolicy::from_allowed_hosts(config.allowed_hosts.clone());
    if policy == HostPolicy::Any {
        tracing::warn!("CLIPSTRIP_ALLOWED_HOSTS=*; outbound fetches are unrestricted");
    }

    let resolver =
        Resolver::with_settings(config.fetch_timeout_secs, &config.user_agent, policy)?;
    let app = build_app(
        AppState {
            resolver: Arc::new(resolver),
        },
        rate_limit_per_minute(config.rate_limit_per_minute),
    );

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        "starting clipstrip-server"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
