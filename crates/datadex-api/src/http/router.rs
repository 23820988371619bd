//! Axum router configuration with middleware.
//!
//! Routes live at the root to match the original surface.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home::home))
        // Session tracking
        .route("/start_session", get(handlers::session::start_session))
        .route("/store_message", post(handlers::session::store_message))
        .route("/get_session", get(handlers::session::get_session))
        // OAuth gateway (responds 400 when not configured)
        .route("/login", get(handlers::auth::login))
        .route("/auth/callback", get(handlers::auth::callback))
        .route("/logout", get(handlers::auth::logout))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
