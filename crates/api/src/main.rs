use anyhow::Context;
use clap::Parser;

use stockroom_api::config::{Config, LogFormat};
use stockroom_infra::InMemorySessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    match config.log_format {
        LogFormat::Json => stockroom_observability::init(),
        LogFormat::Pretty => stockroom_observability::init_pretty(),
    }

    if config.empty {
        tracing::info!("sessions start with an empty inventory");
    }

    let store = InMemorySessionStore::with_limits(config.seed(), config.limits());
    let app = stockroom_api::app::build_app_with(store);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
