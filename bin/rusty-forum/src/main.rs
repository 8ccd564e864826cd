//! # Rusty Forum Binary
//!
//! The entry point that assembles the application based on compile-time features.

use anyhow::Context;
use rf_api::{router, AppState, RouterOptions};
use rf_config::{LogFormat, LogSettings, Settings};
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "db-sqlite")]
use rf_db_sqlite::SqliteForumRepo;

#[cfg(feature = "auth-simple")]
use rf_auth_simple::SimpleAuthProvider;

#[cfg(not(all(feature = "db-sqlite", feature = "auth-simple")))]
compile_error!("rusty-forum needs a store and an auth provider: enable `db-sqlite` and `auth-simple`");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    init_tracing(&settings.log);

    info!(version = env!("CARGO_PKG_VERSION"), "starting rusty-forum");

    // 1. Persistence
    #[cfg(feature = "db-sqlite")]
    let repo = SqliteForumRepo::new(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
        settings.database.acquire_timeout(),
    )
    .await
    .context("failed to open the sqlite store")?;

    // 2. Password hashing
    #[cfg(feature = "auth-simple")]
    let auth = SimpleAuthProvider::new();

    let state = AppState::new(repo, auth);

    if !settings.server.secure_cookies {
        warn!("session cookies are sent without the Secure flag; enable server.secure_cookies behind HTTPS");
    }
    let app = router(
        state,
        RouterOptions {
            request_timeout: settings.server.request_timeout(),
            secure_cookies: settings.server.secure_cookies,
        },
    );

    let addr = settings.server.address()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down cleanly");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
