// Router assembly for the stylist API.

use super::{AppState, MAX_UPLOAD_BODY_BYTES, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

pub fn create_app(state: AppState) -> Router {
    // Static wardrobe segments (`stats`, `item`, `upload`) are registered
    // before the `{key}` capture; `/api/wardrobe/{key}` doubles as
    // list-by-owner (GET) and delete-by-id (DELETE).
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/test-generation", get(handlers::test_generation))
        .route(
            "/api/wardrobe/stats/{owner_id}",
            get(handlers::get_wardrobe_stats),
        )
        .route("/api/wardrobe/item/{id}", get(handlers::get_wardrobe_item))
        .route("/api/wardrobe/upload", post(handlers::upload_wardrobe_item))
        .route(
            "/api/wardrobe/{key}",
            get(handlers::list_wardrobe).delete(handlers::delete_wardrobe_item),
        )
        .route(
            "/api/stylist/generate-outfit",
            post(handlers::generate_outfit),
        )
        .route(
            "/api/stylist/generate-moodboard",
            post(handlers::generate_moodboard),
        )
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
        // Add CORS layer for broader client compatibility
        .layer(CorsLayer::permissive())
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        .with_state(state)
}
