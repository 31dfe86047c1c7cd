use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;
    let images_route = format!("/{}/*name", state.config.images.path_prefix);
    let static_files = ServeDir::new(&state.config.server.public_dir);

    Router::new()
        // FAQs
        .route("/api/faqs", get(handlers::list_faqs).post(handlers::create_faq))
        .route(
            "/api/faqs/:id",
            get(handlers::get_faq)
                .put(handlers::update_faq)
                .delete(handlers::delete_faq),
        )
        // Uploaded images
        .route(&images_route, get(handlers::serve_image))
        .route("/health", get(handlers::health))
        // Everything else comes from the public directory
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
