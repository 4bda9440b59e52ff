//! Route configuration.

use crate::auth::{require_api_key, trace_middleware};
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Product CRUD
        .route("/api/v1/product", get(handlers::list_products))
        .route("/api/v1/product/", get(handlers::list_products))
        .route("/api/v1/product/create", post(handlers::create_product))
        .route("/api/v1/product/update/{id}", put(handlers::update_product))
        .route("/api/v1/product/remove/{id}", delete(handlers::remove_product))
        .route("/api/v1/product/{id}", get(handlers::get_product))
        // Access and backend diagnostics
        .route("/api/v1/views", get(handlers::secure_view))
        .route("/api/v1/views/", get(handlers::secure_view))
        .route("/api/v1/settings", get(handlers::settings))
        .route("/api/v1/settings/", get(handlers::settings))
        .route("/api/v1/database", get(handlers::database_check))
        .route("/api/v1/database/", get(handlers::database_check))
        // route_layer: the gate runs only for matched routes, before extractors
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    // Health check (intentionally unauthenticated for load balancer probes)
    let public_routes = Router::new()
        .route("/api/v1/healths", get(handlers::health_check))
        .route("/api/v1/healths/", get(handlers::health_check));

    // Order of execution: TraceLayer -> trace id span -> API key gate -> Handler
    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        // JSON error bodies for unmatched paths and methods
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(middleware::from_fn(trace_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
