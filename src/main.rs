use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use records_desk::config::Config;
use records_desk::db::{self, RecordStore};
use records_desk::router::{DeskState, desk_router};
use records_desk::service::StaticAccounts;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.listen_addr,
        database_url = %cfg.database_url.as_deref().unwrap_or("<none>"),
        static_dir = %cfg.static_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<none>".to_string()),
        loglevel = %cfg.loglevel,
        accounts = cfg.accounts.len()
    );

    let store = match cfg.database_url.as_deref() {
        Some(url) => Some(RecordStore::new(db::connect(url).await?)),
        None => {
            warn!("no database configured; record endpoints will report an unbound store");
            None
        }
    };

    let accounts = Arc::new(StaticAccounts::new(cfg.accounts.clone()));
    let mut state = DeskState::new(store, accounts);
    if let Some(dir) = cfg.static_dir.as_ref() {
        state = state.with_assets(dir);
    }
    let app = desk_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
