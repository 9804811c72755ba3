//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        .route(
            "/api/instruments",
            get(handlers::instruments::get_instruments),
        )
        .route(
            "/api/instruments/{instrument}/lessons",
            get(handlers::instruments::get_lessons),
        )
        .route(
            "/api/lessons/{instrument}/{lesson}",
            get(handlers::lessons::get_lesson),
        );

    // HTML pages
    let page_routes = Router::new()
        .route("/", get(handlers::pages::get_home))
        .route("/{instrument}", get(handlers::pages::get_instrument))
        .route("/{instrument}/{lesson}", get(handlers::pages::get_lesson));

    let media = ServeDir::new(state.library.store().media_root());

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .nest_service("/media", media)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
