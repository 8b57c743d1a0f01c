//! Embedded bootstrap migrations for the `users` and `doctors` tables.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies every pending migration and returns the applied versions.
///
/// Migrations run on a blocking `PgConnection` since the harness is synchronous.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    let database_url = database_url.to_string();

    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|e| {
            AppError::database(
                "establish connection for migrations",
                anyhow::anyhow!("Connection error: {}", e),
            )
        })?;

        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            AppError::database(
                "run pending migrations",
                anyhow::anyhow!("Migration error: {}", e),
            )
        })?;

        Ok::<_, AppError>(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

#[cfg(test)]
mod tests {
    const CREATE_TABLES: &str =
        include_str!("../../migrations/2025-01-01-000000_create_users_and_doctors/up.sql");

    #[test]
    fn test_text_columns_have_no_length_limit() {
        let sql = CREATE_TABLES.to_uppercase();
        assert!(!sql.contains("VARCHAR"));
        assert!(!sql.contains("CHARACTER VARYING"));
    }

    #[test]
    fn test_experience_column_is_bigint() {
        assert!(CREATE_TABLES.contains("experience BIGINT,"));
    }
}
