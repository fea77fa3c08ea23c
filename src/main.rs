use chatrag_api::{Settings, build_router, config};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize tracing (logging) before resolving so parse warnings are kept
    let debug = config::parse_flag(std::env::var("DEBUG").ok().as_deref());
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::default_log_filter(debug).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env();

    tracing::info!(
        app = settings.app_name,
        version = settings.app_version,
        debug = settings.debug,
        region = %settings.aws_region,
        "settings resolved"
    );
    tracing::debug!(?settings);
    if settings.database_url().is_some() {
        tracing::info!(
            host = settings.database_host.as_deref().unwrap_or_default(),
            port = settings.database_port,
            database = %settings.database_name,
            "database connection configured"
        );
    } else {
        tracing::info!("DATABASE_HOST or DATABASE_PASSWORD not set, no database configured");
    }
    if let Some(redis_url) = settings.redis_url() {
        tracing::info!(%redis_url, "cache configured");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let app = build_router(Arc::new(settings));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
