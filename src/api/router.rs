use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;

/// Build the Axum router with all routes and middleware.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check (outside /api prefix)
        .route("/health", get(handlers::health))
        // Board data
        .route("/api/board/default", get(handlers::default_board))
        // FEN codec
        .route("/api/fen/validate", post(handlers::validate_fen))
        .route("/api/fen/parse", post(handlers::parse_fen))
        .route("/api/fen/serialize", post(handlers::serialize_board))
        // Evaluation bar
        .route("/api/eval", post(handlers::evaluate))
        // Middleware
        .layer(DefaultBodyLimit::max(state.config.body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
