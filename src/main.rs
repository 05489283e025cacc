use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zoraverse::{build_router, config::Config, services::zora::ZoraService, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zoraverse=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.zora_api_key.is_empty() {
        tracing::warn!("ZORA_API_KEY is not set, Zora requests will likely fail and demo data will be served");
    }

    let zora = match ZoraService::new(
        config.zora_api_key.clone(),
        config.zora_base_url.clone(),
        config.profile_cache_ttl,
        config.request_timeout,
    ) {
        Ok(zora) => zora,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Using Zora API at {}", zora.base_url());

    let app = build_router(AppState { zora }, &config.cors_origins);

    // Start server
    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("ZoraVerse API listening on {}", config.bind_addr);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        tracing::info!("Shutting down");
    };

    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown).await {
        tracing::error!("Server error: {}", e);
    }
}
