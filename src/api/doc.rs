use utoipa::OpenApi;

pub const AUTH_TAG: &str = "Auth";
pub const DOCTOR_TAG: &str = "Doctors";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hospital Management System",
        description = "Backend API for hospital staff accounts and the doctor directory",
    ),
    components(schemas(crate::api::dto::ErrorResponse)),
    tags(
        (name = AUTH_TAG, description = "Staff registration and login"),
        (name = DOCTOR_TAG, description = "Doctor directory endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
