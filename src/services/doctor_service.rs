//! Doctor service for business logic operations.
//!
//! Path ids arrive as raw strings; anything that is not a UUID is treated as
//! an id that matches no record.

use std::sync::Arc;

use jiff_diesel::{Timestamp, ToDiesel};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Doctor, NewDoctor, UpdateDoctor};
use crate::repositories::DoctorStore;

/// Size of the "latest doctors" listing
pub const LATEST_LIMIT: usize = 6;

const DOCTOR: &str = "Doctor";
const DUPLICATE_EMAIL: &str = "Doctor with this email already exists";

/// Validated fields for a new doctor.
#[derive(Debug, Clone)]
pub struct DoctorDraft {
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    /// Raw submitted value, coerced with [`coerce_experience`]
    pub experience: Value,
    pub bio: String,
    pub image_url: Option<String>,
}

/// Partial update; `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct DoctorChanges {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Option<Value>,
    pub bio: Option<String>,
    /// `Some(None)` clears the image
    pub image_url: Option<Option<String>>,
}

/// Reads the leading integer of a submitted experience value.
///
/// Numbers are truncated toward zero. Strings may carry leading whitespace,
/// a sign and a `0x` prefix; parsing stops at the first non-digit. Any other
/// value, or a string without leading digits, yields `None`. Results outside
/// the `i64` range saturate.
pub fn coerce_experience(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                return Some(saturate(i128::from(n)));
            }
            if let Some(n) = number.as_u64() {
                return Some(saturate(i128::from(n)));
            }
            number
                .as_f64()
                .filter(|f| f.is_finite())
                // `as` saturates float-to-int casts
                .map(|f| f.trunc() as i64)
        }
        Value::String(text) => parse_leading_int(text),
        _ => None,
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i128 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        value = (value * i128::from(radix) + i128::from(digit)).min(i128::from(u64::MAX));
    }

    if !seen_digit {
        return None;
    }
    Some(saturate(if negative { -value } else { value }))
}

fn saturate(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn now() -> Timestamp {
    jiff::Timestamp::now().to_diesel()
}

/// Unparseable ids can never match a stored record.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

#[derive(Clone)]
pub struct DoctorService {
    doctors: Arc<dyn DoctorStore>,
}

impl DoctorService {
    pub fn new(doctors: Arc<dyn DoctorStore>) -> Self {
        Self { doctors }
    }

    pub async fn list_doctors(&self) -> AppResult<Vec<Doctor>> {
        self.doctors.find_all().await
    }

    /// The [`LATEST_LIMIT`] most recently created doctors, newest first.
    pub async fn latest_doctors(&self) -> AppResult<Vec<Doctor>> {
        self.doctors.find_latest(LATEST_LIMIT).await
    }

    /// Gets a doctor by id.
    ///
    /// # Returns
    /// The doctor if found, or `NotFound` error
    pub async fn get_doctor(&self, raw_id: &str) -> AppResult<Doctor> {
        let Some(id) = parse_id(raw_id) else {
            return Err(AppError::not_found(DOCTOR));
        };

        self.doctors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(DOCTOR))
    }

    pub async fn doctors_by_specialty(&self, specialty: &str) -> AppResult<Vec<Doctor>> {
        self.doctors.find_by_specialty(specialty).await
    }

    /// Creates a doctor after checking that the email is unused.
    ///
    /// An empty `image_url` is stored as NULL.
    pub async fn create_doctor(&self, draft: DoctorDraft) -> AppResult<Doctor> {
        if self.doctors.find_by_email(&draft.email).await?.is_some() {
            return Err(AppError::conflict(DUPLICATE_EMAIL));
        }

        let stamp = now();
        let doctor = self
            .doctors
            .insert(NewDoctor {
                experience: coerce_experience(&draft.experience),
                name: draft.name,
                specialty: draft.specialty,
                email: draft.email,
                phone: draft.phone,
                bio: draft.bio,
                image_url: draft.image_url.filter(|url| !url.is_empty()),
                created_at: stamp,
                updated_at: stamp,
            })
            .await?;

        tracing::info!(doctor_id = %doctor.id, "Doctor created");
        Ok(doctor)
    }

    /// Overwrites the supplied fields and refreshes `updated_at`.
    ///
    /// Neither presence nor email uniqueness is checked here.
    pub async fn update_doctor(&self, raw_id: &str, changes: DoctorChanges) -> AppResult<()> {
        let Some(id) = parse_id(raw_id) else {
            return Err(AppError::not_found(DOCTOR));
        };

        let matched = self
            .doctors
            .update(
                id,
                UpdateDoctor {
                    experience: changes.experience.as_ref().map(coerce_experience),
                    name: changes.name,
                    specialty: changes.specialty,
                    email: changes.email,
                    phone: changes.phone,
                    bio: changes.bio,
                    image_url: changes.image_url,
                    updated_at: now(),
                },
            )
            .await?;

        if matched == 0 {
            return Err(AppError::not_found(DOCTOR));
        }

        tracing::info!(doctor_id = %id, "Doctor updated");
        Ok(())
    }

    pub async fn delete_doctor(&self, raw_id: &str) -> AppResult<()> {
        let Some(id) = parse_id(raw_id) else {
            return Err(AppError::not_found(DOCTOR));
        };

        if self.doctors.delete(id).await? == 0 {
            return Err(AppError::not_found(DOCTOR));
        }

        tracing::info!(doctor_id = %id, "Doctor deleted");
        Ok(())
    }
}
