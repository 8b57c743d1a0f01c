//! Doctor-related Data Transfer Objects

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::Doctor;
use crate::services::{DoctorChanges, DoctorDraft};

const FIELDS_REQUIRED: &str = "All fields required";

/// Maps an explicit `null` to `Some(null)` so presence can be told apart
/// from absence. Use together with `#[serde(default)]`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Create doctor request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Dr. Amina Rahman")]
    pub name: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Cardiology")]
    pub specialty: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "amina@hospital.example", format = "email")]
    pub email: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "+1-555-0100")]
    pub phone: Option<String>,
    /// Years of practice; strings are read up to the first non-digit and any
    /// other value is stored as null. Only presence is required.
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(required(message = "All fields required"))]
    #[schema(value_type = Object, example = 12)]
    pub experience: Option<Value>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Interventional cardiologist")]
    pub bio: Option<String>,
    #[schema(example = "https://img.example.com/amina.png")]
    pub image_url: Option<String>,
}

impl CreateDoctorRequest {
    /// Converts a validated request; only fails if validation was skipped.
    pub fn into_draft(self) -> AppResult<DoctorDraft> {
        match (
            self.name,
            self.specialty,
            self.email,
            self.phone,
            self.experience,
            self.bio,
        ) {
            (Some(name), Some(specialty), Some(email), Some(phone), Some(experience), Some(bio)) => {
                Ok(DoctorDraft {
                    name,
                    specialty,
                    email,
                    phone,
                    experience,
                    bio,
                    image_url: self.image_url,
                })
            }
            _ => Err(AppError::validation(FIELDS_REQUIRED)),
        }
    }
}

/// Update doctor request payload; every field is optional.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Object, example = 15)]
    pub experience: Option<Value>,
    pub bio: Option<String>,
    /// `null` removes the image
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
}

impl From<UpdateDoctorRequest> for DoctorChanges {
    fn from(request: UpdateDoctorRequest) -> Self {
        Self {
            name: request.name,
            specialty: request.specialty,
            email: request.email,
            phone: request.phone,
            experience: request.experience,
            bio: request.bio,
            image_url: request.image_url,
        }
    }
}

/// Doctor as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    pub experience: Option<i64>,
    pub bio: String,
    pub image_url: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            specialty: doctor.specialty,
            email: doctor.email,
            phone: doctor.phone,
            experience: doctor.experience,
            bio: doctor.bio,
            image_url: doctor.image_url,
            created_at: doctor.created_at.to_jiff(),
            updated_at: doctor.updated_at.to_jiff(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_experience_counts_as_present() {
        let request: CreateDoctorRequest = serde_json::from_value(json!({
            "name": "A", "specialty": "B", "email": "c@d.e", "phone": "1",
            "experience": null, "bio": "F"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.experience, Some(Value::Null));
    }

    #[test]
    fn test_missing_experience_fails_validation() {
        let request: CreateDoctorRequest = serde_json::from_value(json!({
            "name": "A", "specialty": "B", "email": "c@d.e", "phone": "1", "bio": "F"
        }))
        .unwrap();
        let err = AppError::from(request.validate().unwrap_err());
        assert!(matches!(err, AppError::Validation { ref message } if message == FIELDS_REQUIRED));
    }

    #[test]
    fn test_empty_string_fails_validation() {
        let request: CreateDoctorRequest = serde_json::from_value(json!({
            "name": "", "specialty": "B", "email": "c@d.e", "phone": "1",
            "experience": 0, "bio": "F"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent_image() {
        let cleared: UpdateDoctorRequest =
            serde_json::from_value(json!({"imageUrl": null})).unwrap();
        assert_eq!(cleared.image_url, Some(None));

        let untouched: UpdateDoctorRequest = serde_json::from_value(json!({"bio": "x"})).unwrap();
        assert_eq!(untouched.image_url, None);
        assert_eq!(untouched.bio.as_deref(), Some("x"));
    }
}
