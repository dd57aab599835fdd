// src/store/scores.rs

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    error::AppError,
    models::score::{LeaderboardEntry, Score, round2},
};

/// Records a score for (user, quiz), replacing any previous one.
///
/// The UNIQUE(user_id, quiz_name) constraint plus ON CONFLICT makes this a
/// single atomic statement; two concurrent submissions can never both insert.
pub async fn upsert(
    pool: &SqlitePool,
    user_id: i64,
    quiz_name: &str,
    score: i64,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO scores (user_id, quiz_name, score, submitted_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, quiz_name) DO UPDATE SET
            score = excluded.score,
            submitted_at = excluded.submitted_at
        "#,
    )
    .bind(user_id)
    .bind(quiz_name)
    .bind(score)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert score: {:?}", e);
        AppError::from(e)
    })?;

    Ok(())
}

/// All scores of one user, newest first.
pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Score>, AppError> {
    let scores = sqlx::query_as::<_, Score>(
        r#"
        SELECT id, user_id, quiz_name, score, submitted_at
        FROM scores
        WHERE user_id = ?
        ORDER BY submitted_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(scores)
}

/// Raw aggregation row; rank is assigned after the query.
#[derive(Debug, FromRow)]
struct LeaderboardRow {
    username: String,
    total_score: i64,
    average_score: f64,
    quiz_count: i64,
}

/// Computes the ranked top-N leaderboard over all score rows.
///
/// Ordered by total score descending; equal totals are broken by username
/// ascending so the ranking is deterministic. Users without scores never
/// appear, so every aggregate is over at least one row.
pub async fn top_n(pool: &SqlitePool, n: i64) -> Result<Vec<LeaderboardEntry>, AppError> {
    let rows = sqlx::query_as::<_, LeaderboardRow>(
        r#"
        SELECT
            u.username,
            CAST(SUM(s.score) AS INTEGER) AS total_score,
            CAST(AVG(s.score) AS REAL) AS average_score,
            COUNT(s.id) AS quiz_count
        FROM scores s
        JOIN users u ON s.user_id = u.id
        GROUP BY s.user_id
        ORDER BY total_score DESC, u.username ASC
        LIMIT ?
        "#,
    )
    .bind(n)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to aggregate leaderboard: {:?}", e);
        AppError::from(e)
    })?;

    let leaderboard = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            rank: i as i64 + 1,
            username: row.username,
            total_score: row.total_score,
            average_score: round2(row.average_score),
            quiz_count: row.quiz_count,
        })
        .collect();

    Ok(leaderboard)
}

/// Wipes all score rows. Only reachable from the opt-in maintenance job.
pub async fn reset_all(pool: &SqlitePool) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM scores").execute(pool).await?;

    Ok(result.rows_affected())
}
