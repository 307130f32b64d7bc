use std::sync::Arc;

use datawhere_api::config::AppConfig;
use datawhere_api::{build_router, migrations, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    datawhere_shared::middleware::init_tracing("datawhere-api");

    let config = AppConfig::load()?;
    tracing::info!(database_url = %config.redacted_database_url(), "configuration loaded");

    let state = Arc::new(AppState::new(config));

    if state.config.run_migrations {
        let applied = state.db.run(migrations::run_pending_migrations).await?;
        tracing::info!(applied = applied, "schema migrations applied");
    }

    let addr = state.config.bind_addr();
    let app = build_router(state);

    tracing::info!(addr = %addr, "datawhere-api starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
