mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use promopost_scraper::ProductPageClient;
use promopost_telegram::TelegramNotifier;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = promopost_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let scraper = Arc::new(ProductPageClient::from_config(&config)?);
    let notifier = Arc::new(TelegramNotifier::from_config(&config)?);
    let app = build_app(AppState { scraper, notifier });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(env = %config.env, addr = %config.bind_addr, "promopost server listening");
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
