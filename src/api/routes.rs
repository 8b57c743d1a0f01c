//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Method,
    middleware,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    logging_middleware, method_not_allowed, request_id_middleware, route_not_found,
    security_headers_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. CORS - answers preflight requests before anything else runs
/// 2. Request ID - generates/propagates request IDs
/// 3. Logging - logs requests with request IDs
/// 4. Security headers - added to every response, including errors
///
/// # Routes
/// - `/` - Plain-text banner
/// - `/health`, `/health/ready` - Liveness and readiness probes
/// - `/api/auth` - Registration and login
/// - `/api/doctors` - Doctor CRUD operations
/// - `/swagger-ui` - Interactive API documentation
///
/// # Example
/// ```ignore
/// let state = AppState::in_memory();
/// let router = create_router(state, settings.server.body_limit);
/// ```
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .nest("/api/auth", handlers::auth::auth_routes())
        .nest("/api/doctors", handlers::doctors::doctor_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        // Only reaches routes registered above
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(security_headers_middleware))
        // Logging runs after request_id has set the ID
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin may call the API; credentials are never involved.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
