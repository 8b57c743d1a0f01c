use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// Role assigned to every self-registered account
pub const DEFAULT_ROLE: &str = "admin";

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Stored exactly as submitted
    pub password: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// NewUser model for inserting new records; the id is generated by the store
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl NewUser {
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            role: self.role,
            created_at: self.created_at,
        }
    }
}
