use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `validator` rules before the handler sees
/// the payload. Both malformed bodies and rule violations become
/// `AppError::Validation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(
            required(message = "Email and password required"),
            length(min = 1, message = "Email and password required")
        )]
        email: Option<String>,
        #[validate(
            required(message = "Email and password required"),
            length(min = 1, message = "Email and password required")
        )]
        password: Option<String>,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = json_request(r#"{"email":"a@b.c","password":"pw"}"#);

        let ValidatedJson(body) = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(body.email.as_deref(), Some("a@b.c"));
        assert_eq!(body.password.as_deref(), Some("pw"));
    }

    #[tokio::test]
    async fn test_missing_field_uses_rule_message() {
        let request = json_request(r#"{"email":"a@b.c"}"#);

        match ValidatedJson::<TestBody>::from_request(request, &()).await {
            Err(AppError::Validation { message }) => {
                assert_eq!(message, "Email and password required")
            }
            other => panic!("Expected Validation error, got {:?}", other.map(|v| v.0)),
        }
    }

    #[tokio::test]
    async fn test_empty_string_uses_rule_message() {
        let request = json_request(r#"{"email":"","password":"pw"}"#);

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_validation_error() {
        let request = json_request(r#"{"email": "#);

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;
        match result {
            Err(AppError::Validation { message }) => assert!(!message.is_empty()),
            other => panic!("Expected Validation error, got {:?}", other.map(|v| v.0)),
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"email":"a@b.c","password":"pw"}"#))
            .unwrap();

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
