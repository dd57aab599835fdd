// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Role for student accounts, assigned on signup.
pub const ROLE_MURID: &str = "murid";
/// Role for teacher accounts. Grants access to the /api/guru routes.
pub const ROLE_GURU: &str = "guru";

/// Represents the 'users' table in the database.
///
/// Usernames are stored trimmed and lowercased, so the UNIQUE constraint on
/// the column behaves case-insensitively.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique, normalized username.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// User role: 'murid' or 'guru'.
    pub role: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for signup and login.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Username length must be between 2 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// Normalizes a raw username: trim surrounding whitespace, lowercase.
/// The normalized form is the identity key everywhere below the HTTP layer.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}
