//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError so every
//! handler failure is rendered as an [`ErrorResponse`] envelope.

use axum::{
    Json,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

const SERVER_ERROR: &str = "Server error";

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - Validation → 400 BAD_REQUEST
    /// - Unauthorized → 401 UNAUTHORIZED
    /// - NotFound → 404 NOT_FOUND
    /// - Conflict → 409 CONFLICT
    /// - Database, Configuration, Internal → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    ///
    /// Client errors carry their own message. Server errors use the fixed
    /// message "Server error" and expose the root cause in `error`.
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::Validation { message }
            | AppError::Conflict { message }
            | AppError::Unauthorized { message } => ErrorResponse::new(message.as_str()),
            AppError::NotFound { .. } => ErrorResponse::new(self.to_string()),
            AppError::Database { operation, .. } => {
                tracing::error!(error = ?self, operation = %operation, "Database operation failed");
                server_error(&self)
            }
            AppError::ConnectionPool { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => {
                tracing::error!(error = ?self, "Request failed");
                server_error(&self)
            }
        };

        (status, Json(body)).into_response()
    }
}

fn server_error(error: &AppError) -> ErrorResponse {
    let response = ErrorResponse::new(SERVER_ERROR);
    match error.root_message() {
        Some(cause) => response.with_error(cause),
        None => response,
    }
}

/// Fallback for requests that match no route.
pub async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found")),
    )
}

/// Doctor routes that take an `{id}` segment answer these methods.
const DOCTOR_ID_METHODS: [Method; 2] = [Method::PUT, Method::DELETE];

/// Fallback for a known path hit with a method it does not route.
///
/// Single-segment paths under `/api/doctors/` that matched a literal route
/// (`/latest`) are ids for PUT and DELETE, so they get the same 404 as any
/// other unknown doctor id.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    let is_doctor_id = uri
        .path()
        .strip_prefix("/api/doctors/")
        .is_some_and(|id| !id.is_empty() && !id.contains('/'));

    if is_doctor_id && DOCTOR_ID_METHODS.contains(&method) {
        return AppError::not_found("Doctor").into_response();
    }

    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_message() {
        let (status, body) = render(AppError::conflict("User already exists")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({"success": false, "message": "User already exists"}));

        let (status, body) = render(AppError::validation("All fields required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "All fields required");

        let (status, body) = render(AppError::unauthorized("Invalid email or password")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_not_found_message_names_entity() {
        let (status, body) = render(AppError::not_found("Doctor")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Doctor not found");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_server_errors_expose_root_cause() {
        let (status, body) = render(AppError::database(
            "list doctors",
            anyhow::anyhow!("connection refused"),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "message": "Server error", "error": "connection refused"})
        );
    }

    #[tokio::test]
    async fn test_pool_errors_are_unavailable() {
        let error = AppError::ConnectionPool {
            source: anyhow::anyhow!("timed out waiting for connection"),
        };
        let (status, body) = render(error).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["message"], "Server error");
    }

    async fn render_fallback(method: Method, path: &str) -> (StatusCode, Value) {
        let response = method_not_allowed(method, Uri::try_from(path).unwrap()).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_literal_doctor_segment_is_unknown_id() {
        for method in [Method::PUT, Method::DELETE] {
            let (status, body) = render_fallback(method, "/api/doctors/latest").await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"success": false, "message": "Doctor not found"}));
        }
    }

    #[tokio::test]
    async fn test_other_methods_get_json_405() {
        for (method, path) in [
            (Method::PATCH, "/api/doctors"),
            (Method::POST, "/api/doctors/latest"),
            (Method::PUT, "/api/doctors/specialty/Cardiology"),
            (Method::DELETE, "/health"),
        ] {
            let (status, body) = render_fallback(method, path).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", path);
            assert_eq!(body["message"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_route_not_found() {
        let (status, Json(body)) = route_not_found().await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Route not found");
    }
}
