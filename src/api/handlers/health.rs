//! Health check endpoint handlers.
//!
//! The readiness probe talks to the connection pool directly instead of
//! going through the service layer.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ErrorResponse, MessageResponse};
use crate::db;
use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "Hospital Management System Backend is running";

/// Creates health check routes.
///
/// # Routes
/// - `GET /` - Plain-text liveness banner
/// - `GET /health` - Basic health check
/// - `GET /health/ready` - Readiness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(root))
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
}

#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service banner", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// Liveness check; never touches the database.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is running", body = MessageResponse)
    )
)]
pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::new("Backend is running"))
}

/// Readiness probe endpoint.
///
/// # Responses
/// - `200 OK` - The store answers queries (always true for the memory backend)
/// - `503 Service Unavailable` - The database cannot be reached
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is ready", body = MessageResponse),
        (status = 503, description = "Service is not ready", body = ErrorResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(pool) = state.db_pool.as_ref() else {
        return Ok(Json(MessageResponse::new("Backend is ready")));
    };

    let start = std::time::Instant::now();
    match db::ping(pool).await {
        Ok(()) => {
            tracing::debug!(
                response_time_ms = start.elapsed().as_millis() as u64,
                "Database ping succeeded"
            );
            Ok(Json(MessageResponse::new("Backend is ready")))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            let body = ErrorResponse::new("Database unavailable");
            let body = match e.root_message() {
                Some(cause) => body.with_error(cause),
                None => body,
            };
            Err((StatusCode::SERVICE_UNAVAILABLE, Json(body)))
        }
    }
}
