//! Authentication handlers for registration and login.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ApiResponse, ErrorResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::error::AppResult;
use crate::services::issue_token;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /register` - Create an admin account
/// - `POST /login` - Check credentials
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
}

/// POST /api/auth/register - Register new user
///
/// Every self-registered account receives the `admin` role.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Name, email, and password required", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state
        .services
        .auth
        .register(payload.into_registration()?)
        .await?;
    let token = issue_token(&user);

    let response = ApiResponse::new(UserResponse::from(user))
        .with_message("User registered successfully")
        .with_token(token);

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login - Authenticate user
///
/// Unknown emails and wrong passwords produce the same 401 response.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<UserResponse>),
        (status = 400, description = "Email and password required", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let (email, password) = payload.into_credentials()?;
    let user = state.services.auth.login(&email, &password).await?;
    let token = issue_token(&user);

    Ok(Json(
        ApiResponse::new(UserResponse::from(user))
            .with_message("Login successful")
            .with_token(token),
    ))
}
