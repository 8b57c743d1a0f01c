use axum::extract::rejection::JsonRejection;
use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

use crate::config::error::ConfigError;
use crate::error::DatabaseErrorConverter;

/// Application-wide error type for the request path.
///
/// Every handler returns `AppResult<T>`; the variants map one-to-one onto the
/// HTTP status codes produced by the error handler middleware.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or the request body could not be read
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// A unique field already holds the submitted value
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// No record matched the lookup
    #[error("{entity} not found")]
    NotFound { entity: String },

    /// Credentials were rejected
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: entity.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            message: message.into(),
        }
    }

    /// Wraps a storage failure, keeping the underlying message for the response body.
    pub fn database(operation: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Database {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// The message of the innermost cause, surfaced as `error` in 5xx bodies.
    pub fn root_message(&self) -> Option<String> {
        match self {
            AppError::Database { source, .. }
            | AppError::ConnectionPool { source }
            | AppError::Configuration { source, .. }
            | AppError::Internal { source } => Some(source.root_cause().to_string()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: rejection.body_text(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.keys().collect();
        fields.sort();

        let message = fields
            .into_iter()
            .filter_map(|field| field_errors.get(field))
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request body".to_string());

        AppError::Validation { message }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "configuration".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Payload {
        #[validate(required(message = "Email and password required"))]
        email: Option<String>,
        #[validate(required(message = "Email and password required"))]
        password: Option<String>,
    }

    #[test]
    fn test_validation_errors_use_field_message() {
        let payload = Payload {
            email: None,
            password: None,
        };
        let error = AppError::from(payload.validate().unwrap_err());

        match error {
            AppError::Validation { message } => assert_eq!(message, "Email and password required"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_root_message_surfaces_source() {
        let error = AppError::database("find doctors", anyhow::anyhow!("connection reset"));
        assert_eq!(error.root_message().as_deref(), Some("connection reset"));
        assert!(AppError::not_found("Doctor").root_message().is_none());
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(AppError::not_found("Doctor").to_string(), "Doctor not found");
    }

    #[test]
    fn test_config_error_keeps_field() {
        let error = AppError::from(ConfigError::validation("server.port", "Port must be set"));
        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }
}
