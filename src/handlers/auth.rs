// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{CredentialsRequest, ROLE_MURID, normalize_username},
    store,
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

/// Registers a new student account.
///
/// Usernames are normalized (trimmed, lowercased) before storage, which is
/// also what makes uniqueness case-insensitive. Hashes the password using
/// Argon2 before storing it. Returns 201 Created with a fresh session token,
/// so signup doubles as the first login.
pub async fn signup(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let username = normalize_username(&payload.username);
    if username.len() < 2 {
        return Err(AppError::BadRequest("Invalid username".to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = store::users::insert(&pool, &username, &hashed_password, ROLE_MURID).await?;

    let token = sign_jwt(
        user.id,
        &user.username,
        &user.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "type": "Bearer",
            "username": user.username,
            "role": user.role,
        })),
    ))
}

/// Authenticates a user and returns a session token.
///
/// An unknown username and a wrong password produce the exact same response,
/// so the endpoint cannot be used to enumerate accounts.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let username = normalize_username(&payload.username);
    if username.len() < 2 {
        return Err(AppError::BadRequest("Invalid username".to_string()));
    }

    let user = store::users::find_by_username(&pool, &username).await?;

    let user = match user {
        Some(user) if verify_password(&payload.password, &user.password) => user,
        _ => {
            return Err(AppError::AuthError(
                "Invalid username or password".to_string(),
            ));
        }
    };

    let token = sign_jwt(
        user.id,
        &user.username,
        &user.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "username": user.username,
        "role": user.role,
    })))
}

/// Ends the session from the client's point of view.
///
/// Tokens are stateless and cannot be revoked server-side; the client drops
/// its copy and the session is over.
pub async fn logout() -> impl IntoResponse {
    Json(json!({ "message": "Logged out" }))
}
