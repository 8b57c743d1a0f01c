//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `auth` - register/login payloads and the public user view
//! - `doctor` - doctor payloads and the wire representation
//! - `response` - success envelopes
//! - `error` - the error envelope

mod auth;
mod doctor;
mod error;
mod response;

pub use auth::{LoginRequest, RegisterRequest, UserResponse};
pub use doctor::{CreateDoctorRequest, DoctorResponse, UpdateDoctorRequest};
pub use error::ErrorResponse;
pub use response::{ApiResponse, MessageResponse};
