//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod auth_service;
mod doctor_service;

pub use auth_service::{AuthService, Registration, issue_token};
pub use doctor_service::{DoctorChanges, DoctorDraft, DoctorService, LATEST_LIMIT, coerce_experience};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the stores are shared behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub doctors: DoctorService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            auth: AuthService::new(repos.users),
            doctors: DoctorService::new(repos.doctors),
        }
    }
}
