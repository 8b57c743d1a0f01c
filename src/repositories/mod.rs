//! Repository layer for data access operations.
//!
//! Services talk to the `users` and `doctors` collections through the
//! [`UserStore`] and [`DoctorStore`] traits. Two backends implement them:
//! PostgreSQL via diesel_async, and process-local maps for development and
//! tests.

mod doctor_repo;
mod memory;
mod user_repo;

pub use doctor_repo::DoctorRepository;
pub use memory::{MemoryDoctorStore, MemoryUserStore};
pub use user_repo::UserRepository;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Doctor, NewDoctor, NewUser, UpdateDoctor, User};

/// Access to the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user; the store assigns the id.
    async fn insert(&self, new_user: NewUser) -> AppResult<User>;
}

/// Access to the `doctors` collection.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    /// Every doctor in insertion order.
    async fn find_all(&self) -> AppResult<Vec<Doctor>>;

    /// At most `limit` doctors, newest `created_at` first.
    async fn find_latest(&self, limit: usize) -> AppResult<Vec<Doctor>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Doctor>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Doctor>>;

    /// Case-sensitive exact match on `specialty`.
    async fn find_by_specialty(&self, specialty: &str) -> AppResult<Vec<Doctor>>;

    async fn insert(&self, new_doctor: NewDoctor) -> AppResult<Doctor>;

    /// Returns the number of matched records (0 or 1).
    async fn update(&self, id: Uuid, changes: UpdateDoctor) -> AppResult<usize>;

    /// Returns the number of deleted records (0 or 1).
    async fn delete(&self, id: Uuid) -> AppResult<usize>;
}

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps the reference counts of the shared stores.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserStore>,
    pub doctors: Arc<dyn DoctorStore>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            doctors: Arc::new(DoctorRepository::new(pool)),
        }
    }

    /// Repositories backed by process-local maps.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            doctors: Arc::new(MemoryDoctorStore::default()),
        }
    }
}
