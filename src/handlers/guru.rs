// src/handlers/guru.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        score::ProfileResponse,
        user::{ROLE_MURID, normalize_username},
    },
    store,
};

/// Lists all student accounts.
/// Guru only. Password hashes never serialize (see the User model).
pub async fn list_students(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let students = store::users::list_by_role(&pool, ROLE_MURID).await?;

    Ok(Json(students))
}

/// Shows one student's scores and aggregates.
/// Guru only. The lookup accepts any casing of the username.
pub async fn get_student_scores(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let username = normalize_username(&username);

    let student = store::users::find_by_username(&pool, &username)
        .await?
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    let scores = store::scores::list_by_user(&pool, student.id).await?;

    Ok(Json(ProfileResponse::from_scores(student.username, scores)))
}
