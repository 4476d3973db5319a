//! Returns Desk API server.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use rd_api::config::ApiConfig;
use rd_api::{AppState, build_router};
use rd_assistant::AssistantConfig;
use rd_assistant::bootstrap::build_resolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "rd-api starting");

    let config = ApiConfig::from_env();
    let assistant = AssistantConfig::load(config.assistant_config.as_deref())?;
    let resolver = build_resolver(&assistant).await?;

    let app = build_router(AppState::new(resolver));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
