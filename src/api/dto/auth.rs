//! Authentication-related Data Transfer Objects
//!
//! Request fields are optional at the serde level so that a missing field
//! surfaces as a validation message instead of a deserialization error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::services::Registration;

const REGISTER_FIELDS_REQUIRED: &str = "Name, email, and password required";
const LOGIN_FIELDS_REQUIRED: &str = "Email and password required";

/// Register request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "Name, email, and password required"),
        length(min = 1, message = "Name, email, and password required")
    )]
    #[schema(example = "Front Desk")]
    pub name: Option<String>,
    /// Must not belong to an existing user
    #[validate(
        required(message = "Name, email, and password required"),
        length(min = 1, message = "Name, email, and password required")
    )]
    #[schema(example = "desk@hospital.example", format = "email")]
    pub email: Option<String>,
    /// Stored as submitted
    #[validate(
        required(message = "Name, email, and password required"),
        length(min = 1, message = "Name, email, and password required")
    )]
    #[schema(example = "password123", format = "password")]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Converts a validated request; only fails if validation was skipped.
    pub fn into_registration(self) -> AppResult<Registration> {
        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password)) => Ok(Registration {
                name,
                email,
                password,
            }),
            _ => Err(AppError::validation(REGISTER_FIELDS_REQUIRED)),
        }
    }
}

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Email and password required"),
        length(min = 1, message = "Email and password required")
    )]
    #[schema(example = "desk@hospital.example", format = "email")]
    pub email: Option<String>,
    #[validate(
        required(message = "Email and password required"),
        length(min = 1, message = "Email and password required")
    )]
    #[schema(example = "password123", format = "password")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(email, password)`.
    pub fn into_credentials(self) -> AppResult<(String, String)> {
        match (self.email, self.password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::validation(LOGIN_FIELDS_REQUIRED)),
        }
    }
}

/// Public view of a user; the password never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
