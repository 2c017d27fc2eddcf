//! Passage admin server: load config, open the store, self-heal the admin
//! account, and serve the dashboard and JSON API.

mod api_types;
mod error;
mod handlers;
mod pages;
mod routes;
mod session;
mod state;

use tokio::net::TcpListener;

use crate::state::AppState;
use passage_core::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;

    let default_filter = if config.server.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        )
        .init();

    let store = passage_store::connect(&config.database.url).await?;
    store.init_schema().await?;
    passage_store::admin::ensure_admin(store.as_ref()).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(address = %addr, backend = store.backend(), "starting passage admin server");

    let state = AppState::new(&config, store);
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
