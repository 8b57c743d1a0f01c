use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Lookups that find nothing are reported through `Option`/row counts by the
/// repositories, so `NotFound` only reaches this converter from `get_result`
/// calls and is still mapped to a 404.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.message(), operation)
            }
            DieselError::NotFound => AppError::not_found("Record"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(kind: DatabaseErrorKind, message: &str, operation: &str) -> AppError {
        match kind {
            DatabaseErrorKind::UniqueViolation => AppError::Conflict {
                message: "Record already exists".to_string(),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(message.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            None
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find doctor");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_unique_violation() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert user");
        assert!(matches!(result, AppError::Conflict { .. }));
    }

    #[test]
    fn test_convert_other_database_error_keeps_message() {
        let info = MockDatabaseErrorInfo {
            message: "relation \"doctors\" does not exist".to_string(),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::Unknown, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "list doctors");
        match &result {
            AppError::Database { operation, .. } => assert_eq!(operation, "list doctors"),
            other => panic!("Expected Database error, got {:?}", other),
        }
        assert_eq!(
            result.root_message().as_deref(),
            Some("relation \"doctors\" does not exist")
        );
    }
}
