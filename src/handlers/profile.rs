// src/handlers/profile.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    error::AppError, models::score::ProfileResponse, store, utils::jwt::Claims,
};

/// Get the current user's scores and aggregate statistics.
pub async fn get_profile(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let scores = store::scores::list_by_user(&pool, user_id).await?;

    Ok(Json(ProfileResponse::from_scores(claims.username, scores)))
}
