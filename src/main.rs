//! Welp - one binary for every role of the deployment
//!
//! Usage: `welp <cache|storage|detail|review|reservation|gateway|standalone>`

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use welp::{app, Config, Role};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Pick the role from the first argument (default: standalone)
/// 3. Load configuration from environment variables
/// 4. Build the role's router, validating every configured name
/// 5. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "welp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let role: Role = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Role::Standalone,
    };
    let config = Config::from_env().context("invalid configuration")?;
    let name = config
        .service_name
        .clone()
        .unwrap_or_else(|| role.as_str().to_string());
    info!(
        "Starting {} ({}): port={}, policy={}, capacity={}, cache_enabled={}",
        name,
        role.as_str(),
        config.server_port,
        config.eviction_policy,
        config.cache_capacity,
        config.cache_enabled
    );

    let router = app::build_router(role, &config)
        .await
        .with_context(|| format!("failed to start {}", name))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("{} listening on http://{}", name, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("{} shutdown complete", name);
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
