// src/store/users.rs

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::user::{ROLE_GURU, User, normalize_username},
    utils::hash::hash_password,
};

const USER_COLUMNS: &str = "id, username, password, role, created_at";

/// Inserts a new user. The username must already be normalized.
/// A duplicate username maps to 409 Conflict.
pub async fn insert(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: &str,
) -> Result<User, AppError> {
    let sql = format!(
        "INSERT INTO users (username, password, role) VALUES (?, ?, ?) RETURNING {USER_COLUMNS}"
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::Conflict(format!("Username '{}' already exists", username))
            } else {
                tracing::error!("Failed to insert user: {:?}", e);
                AppError::from(e)
            }
        })
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Lists all users with the given role, newest account first.
pub async fn list_by_role(pool: &SqlitePool, role: &str) -> Result<Vec<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE role = ? ORDER BY id DESC");

    let users = sqlx::query_as::<_, User>(&sql)
        .bind(role)
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Creates the configured guru account if it does not exist yet.
/// Called from `main` at startup and from the test harness.
pub async fn seed_guru(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<(), AppError> {
    let username = normalize_username(username);

    if find_by_username(pool, &username).await?.is_some() {
        return Ok(());
    }

    tracing::info!("Seeding guru user: {}", username);
    let password_hash = hash_password(password)?;
    insert(pool, &username, &password_hash, ROLE_GURU).await?;

    Ok(())
}
