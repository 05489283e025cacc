// src/lib.rs

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use services::zora::ZoraService;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub zora: ZoraService,
}

pub mod config;

pub mod models {
    pub mod filter;
    pub mod profile;
    pub mod response;
}

pub mod services {
    pub mod charts;
    pub mod demo_profiles;
    pub mod evaluator;
    pub mod format;
    pub mod profile_feed;
    pub mod zora;
}

pub mod handlers {
    pub mod profile;
    pub mod status;
}

pub mod jobs {
    pub mod profile_poll;
}

pub mod dashboard {
    pub mod commands;
    pub mod render;
    pub mod state;
    pub mod view;
}

/// Routes of the profiles API
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::status::root))
        .route("/health", get(handlers::status::health_check))
        .route("/profiles", get(handlers::profile::get_profiles))
        .route("/profile/{address}", get(handlers::profile::get_profile))
        .route("/holders/{token_address}", get(handlers::profile::get_token_holders))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
