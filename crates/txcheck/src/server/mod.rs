mod error;
mod lookup;

use std::sync::Arc;

use axum::routing::{any, get};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use txcheck_core::catalog::{Coin, COINS};
use txcheck_core::TxLookup;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub lookup: Arc<dyn TxLookup>,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

pub fn build_router(state: AppState) -> Router {
    // The gateway exists so browser clients can reach chain APIs without
    // cross-origin restrictions, so any origin is allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let shared = Arc::new(state);

    Router::new()
        .route("/lookup", get(lookup::lookup_tx))
        .route("/api/check-tx", get(lookup::lookup_tx))
        .route("/api/v1/health", get(health))
        .route("/api/v1/coins", get(coins))
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found))
        .layer(cors)
        .with_state(shared)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn coins() -> Json<&'static [Coin]> {
    Json(COINS)
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFound("API route not found".to_string())
}
