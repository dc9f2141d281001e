use std::sync::Arc;

use rust_postgres_kv::config::Config;
use rust_postgres_kv::error::StartupError;
use rust_postgres_kv::routes;
use rust_postgres_kv::state::AppState;
use rust_postgres_kv::store::{KvStore, PgStore};
use rust_postgres_kv::telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    tracing::info!("rust-postgres-kv starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = PgStore::from_config(&config).await?;
    store.ensure_schema().await.map_err(StartupError::Schema)?;

    let app = routes::router(AppState::new(Arc::new(store)));

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("Listening on port {}...", config.service_port);
    axum::serve(listener, app).await?;

    Ok(())
}
