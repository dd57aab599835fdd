// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::score::{GradeRequest, SubmitScoreRequest},
    quiz_bank::QuizBank,
    store,
    utils::jwt::Claims,
};

/// Grades a submitted answer server-side and records the score.
///
/// * Looks up the canonical answer in the quiz bank; unknown quiz -> 400.
/// * Exact match earns the quiz's maximum score, anything else earns 0.
/// * Saves or updates the result (Upsert), so retaking a quiz replaces the
///   previous score instead of adding leaderboard rows.
pub async fn grade_quiz(
    State(pool): State<SqlitePool>,
    State(bank): State<Arc<QuizBank>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<GradeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let score = bank.grade(&req.quiz_name, req.answer)?;

    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    store::scores::upsert(&pool, user_id, &req.quiz_name, score, Utc::now()).await?;

    Ok(Json(json!({ "score": score })))
}

/// Legacy path: records a score computed by the client.
///
/// The value is untrusted input. Negative scores and scores above the quiz's
/// maximum are rejected outright rather than clamped, so a misbehaving
/// client fails loudly instead of silently farming the leaderboard.
pub async fn submit_score(
    State(pool): State<SqlitePool>,
    State(bank): State<Arc<QuizBank>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz_name = req.quiz_name.trim();
    if quiz_name.is_empty() {
        return Err(AppError::BadRequest("Invalid quiz name".to_string()));
    }

    if req.score < 0 {
        return Err(AppError::BadRequest(
            "Score cannot be negative".to_string(),
        ));
    }

    let max_score = bank.max_score(quiz_name);
    if req.score > max_score {
        return Err(AppError::BadRequest(format!(
            "Score cannot exceed {}",
            max_score
        )));
    }

    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    store::scores::upsert(&pool, user_id, quiz_name, req.score, Utc::now()).await?;

    Ok(Json(json!({ "score": req.score })))
}

/// Retrieves the top 10 users ranked by total score. Public.
pub async fn get_leaderboard(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let leaderboard = store::scores::top_n(&pool, 10).await?;

    Ok(Json(json!({ "leaderboard": leaderboard })))
}
