//! Doctor CRUD request handlers.
//!
//! Ids are taken from the path as plain strings; the service decides whether
//! they can match a record.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::DOCTOR_TAG;
use crate::api::dto::{
    ApiResponse, CreateDoctorRequest, DoctorResponse, ErrorResponse, MessageResponse,
    UpdateDoctorRequest,
};
use crate::error::AppResult;
use crate::models::Doctor;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates doctor-related routes.
///
/// Routes:
/// - GET /                       - List all doctors
/// - POST /                      - Create a new doctor
/// - GET /latest                 - Six most recently added doctors
/// - GET /specialty/{specialty}  - Doctors with an exact specialty
/// - GET /{id}                   - Get doctor by id
/// - PUT /{id}                   - Update doctor by id
/// - DELETE /{id}                - Delete doctor by id
pub fn doctor_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_doctors, create_doctor))
        .routes(routes!(latest_doctors))
        .routes(routes!(doctors_by_specialty))
        .routes(routes!(get_doctor, update_doctor, delete_doctor))
}

fn to_responses(doctors: Vec<Doctor>) -> Vec<DoctorResponse> {
    doctors.into_iter().map(DoctorResponse::from).collect()
}

/// GET /api/doctors - List all doctors
#[utoipa::path(
    get,
    path = "/",
    tag = DOCTOR_TAG,
    responses(
        (status = 200, description = "All doctors", body = ApiResponse<Vec<DoctorResponse>>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
async fn list_doctors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<DoctorResponse>>>> {
    let doctors = state.services.doctors.list_doctors().await?;
    Ok(Json(ApiResponse::new(to_responses(doctors))))
}

/// GET /api/doctors/latest - Newest doctors first
#[utoipa::path(
    get,
    path = "/latest",
    tag = DOCTOR_TAG,
    responses(
        (status = 200, description = "Up to six doctors, newest first", body = ApiResponse<Vec<DoctorResponse>>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
async fn latest_doctors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<DoctorResponse>>>> {
    let doctors = state.services.doctors.latest_doctors().await?;
    Ok(Json(ApiResponse::new(to_responses(doctors))))
}

/// GET /api/doctors/specialty/{specialty} - Case-sensitive specialty match
#[utoipa::path(
    get,
    path = "/specialty/{specialty}",
    tag = DOCTOR_TAG,
    params(("specialty" = String, Path, description = "Exact specialty, e.g. Cardiology")),
    responses(
        (status = 200, description = "Matching doctors, possibly none", body = ApiResponse<Vec<DoctorResponse>>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
async fn doctors_by_specialty(
    State(state): State<AppState>,
    Path(specialty): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<DoctorResponse>>>> {
    let doctors = state
        .services
        .doctors
        .doctors_by_specialty(&specialty)
        .await?;
    Ok(Json(ApiResponse::new(to_responses(doctors))))
}

/// GET /api/doctors/{id} - Get doctor by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = DOCTOR_TAG,
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "The doctor", body = ApiResponse<DoctorResponse>),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    )
)]
async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DoctorResponse>>> {
    let doctor = state.services.doctors.get_doctor(&id).await?;
    Ok(Json(ApiResponse::new(DoctorResponse::from(doctor))))
}

/// POST /api/doctors - Create new doctor
///
/// Returns 201 Created with the stored record.
#[utoipa::path(
    post,
    path = "/",
    tag = DOCTOR_TAG,
    request_body = CreateDoctorRequest,
    responses(
        (status = 201, description = "Doctor added successfully", body = ApiResponse<DoctorResponse>),
        (status = 400, description = "All fields required", body = ErrorResponse),
        (status = 409, description = "Doctor with this email already exists", body = ErrorResponse)
    )
)]
async fn create_doctor(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDoctorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DoctorResponse>>)> {
    let doctor = state
        .services
        .doctors
        .create_doctor(payload.into_draft()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(DoctorResponse::from(doctor)).with_message("Doctor added successfully")),
    ))
}

/// PUT /api/doctors/{id} - Update doctor
///
/// Only the supplied fields change; the record is not echoed back.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = DOCTOR_TAG,
    params(("id" = String, Path, description = "Doctor id")),
    request_body = UpdateDoctorRequest,
    responses(
        (status = 200, description = "Doctor updated successfully", body = MessageResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    )
)]
async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateDoctorRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .doctors
        .update_doctor(&id, payload.into())
        .await?;
    Ok(Json(MessageResponse::new("Doctor updated successfully")))
}

/// DELETE /api/doctors/{id} - Delete doctor
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = DOCTOR_TAG,
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor deleted successfully", body = MessageResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    )
)]
async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.doctors.delete_doctor(&id).await?;
    Ok(Json(MessageResponse::new("Doctor deleted successfully")))
}
