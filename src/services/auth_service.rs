//! Registration and login against the `users` collection.

use std::sync::Arc;

use jiff_diesel::ToDiesel;

use crate::error::{AppError, AppResult};
use crate::models::{DEFAULT_ROLE, NewUser, User};
use crate::repositories::UserStore;

const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Fields accepted by [`AuthService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Placeholder bearer token handed out on register and login.
///
/// Nothing verifies it; it only echoes the user id.
pub fn issue_token(user: &User) -> String {
    format!("token-{}", user.id)
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Creates an admin account.
    ///
    /// # Errors
    /// `Conflict` when a user with the same email already exists.
    pub async fn register(&self, registration: Registration) -> AppResult<User> {
        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(AppError::conflict(USER_EXISTS));
        }

        let user = self
            .users
            .insert(NewUser {
                name: registration.name,
                email: registration.email,
                password: registration.password,
                role: DEFAULT_ROLE.to_string(),
                created_at: jiff::Timestamp::now().to_diesel(),
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Checks credentials. Unknown emails and wrong passwords fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        match self.users.find_by_email(email).await? {
            Some(user) if user.password == password => {
                tracing::debug!(user_id = %user.id, "User logged in");
                Ok(user)
            }
            _ => Err(AppError::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryUserStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryUserStore::default()))
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Front Desk".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_assigns_admin_role() {
        let user = service().register(registration("desk@example.com")).await.unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(issue_token(&user), format!("token-{}", user.id));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = service();
        service.register(registration("desk@example.com")).await.unwrap();

        match service.register(registration("desk@example.com")).await {
            Err(AppError::Conflict { message }) => assert_eq!(message, "User already exists"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service();
        service.register(registration("desk@example.com")).await.unwrap();

        let wrong_password = service.login("desk@example.com", "nope").await.unwrap_err();
        let unknown_email = service.login("ghost@example.com", "hunter2").await.unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AppError::Unauthorized { .. }));

        let user = service.login("desk@example.com", "hunter2").await.unwrap();
        assert_eq!(user.email, "desk@example.com");
    }
}
