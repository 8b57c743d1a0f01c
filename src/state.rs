//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct pool access for the readiness probe; `None` with the memory backend
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Creates state backed by PostgreSQL.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            services: Services::new(Repositories::postgres(pool.clone())),
            db_pool: Some(pool),
        }
    }

    /// Creates state backed by process-local stores.
    pub fn in_memory() -> Self {
        Self {
            services: Services::new(Repositories::in_memory()),
            db_pool: None,
        }
    }
}
