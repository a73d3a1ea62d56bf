use aayu_storefront::config::StoreConfig;
use aayu_storefront::logger::init_logger;
use aayu_storefront::router::create_app_router;
use aayu_storefront::state::AppState;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load configuration (.env honoured)
    let config = StoreConfig::from_env()?;
    init_logger(&config.log_level);

    let addr = config.bind_addr();

    // Initialize application state
    let state = Arc::new(AppState::new(config)?);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    tracing::info!("Server running on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
