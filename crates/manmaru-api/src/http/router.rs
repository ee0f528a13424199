//! Axum router configuration with middleware.
//!
//! Routes: `POST /chat` and `GET /health`. Middleware: CORS, tracing.
//!
//! The front-end page is served from `web_dir` when the directory exists.
//! Routes take priority; unknown paths fall through to the static files.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.config.web_dir.clone();

    let mut router = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if std::path::Path::new(&web_dir).is_dir() {
        router = router.fallback_service(ServeDir::new(&web_dir));
        tracing::info!(path = %web_dir, "Static file serving enabled");
    } else {
        tracing::warn!(path = %web_dir, "Web directory not found, serving API only");
    }

    router
}

/// GET /health
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
