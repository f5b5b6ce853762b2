//! coinvault service binary
//!
//! Wires config, logging, the PostgreSQL-backed transfer core and the
//! HTTP gateway.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use coinvault::api::{self, AppState};
use coinvault::config::AppConfig;
use coinvault::db::{Database, ensure_schema};
use coinvault::ledger::anonymity::AnonymityLogger;
use coinvault::ledger::recorder::TransactionRecorder;
use coinvault::logging::init_logging;
use coinvault::transfer::db::TransferDb;
use coinvault::transfer::orchestrator::{RetryPolicy, TransferOrchestrator};
use coinvault::wallet::store::PgDirectory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::args().nth(1).unwrap_or_else(|| "dev".to_string());
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    info!(env = %env, "Starting coinvault");

    let db = Database::connect(&config.postgres_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    ensure_schema(db.pool())
        .await
        .context("Failed to ensure schema")?;
    let pool = db.pool().clone();

    let recorder = TransactionRecorder::with_lock_timeout(
        pool.clone(),
        Duration::from_millis(config.transfer.lock_timeout_ms),
    );

    let orchestrator = TransferOrchestrator::new(
        Arc::new(TransferDb::new(pool.clone())),
        Arc::new(PgDirectory::new(pool.clone())),
        Arc::new(recorder),
        Arc::new(AnonymityLogger::new(pool)),
    )
    .with_retry_policy(RetryPolicy {
        max_busy_retries: config.transfer.max_busy_retries,
        backoff: Duration::from_millis(config.transfer.retry_backoff_ms),
    });

    let state = Arc::new(AppState {
        orchestrator: Arc::new(orchestrator),
    });

    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port)
        .parse()
        .context("Invalid gateway address")?;
    info!(%addr, "Transfer gateway listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind gateway address")?;
    axum::serve(listener, api::router(state).into_make_service())
        .await
        .context("Gateway server exited")?;

    Ok(())
}
