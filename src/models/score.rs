// src/models/score.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'scores' table in the database.
/// At most one row exists per (user_id, quiz_name); resubmissions replace
/// the score and timestamp in place.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub user_id: i64,
    pub quiz_name: String,
    pub score: i64,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Aggregated row for the leaderboard, one per user with at least one score.
/// `rank` is assigned after the query, 1-based, over the truncated top-N.
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub username: String,
    pub total_score: i64,
    pub average_score: f64,
    pub quiz_count: i64,
}

/// DTO for the server-graded submission path.
#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub quiz_name: String,
    pub answer: i64,
}

/// DTO for the legacy raw-score submission path.
/// The score is untrusted client input and gets bounds-checked server-side.
#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub quiz_name: String,
    pub score: i64,
}

/// A single score as shown in profile and guru views.
#[derive(Debug, Serialize)]
pub struct ScoreItem {
    pub quiz_name: String,
    pub score: i64,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Per-user aggregate view: own profile, or a student seen by a guru.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub total_quizzes: i64,
    pub total_score: i64,
    pub average_score: f64,
    pub scores: Vec<ScoreItem>,
}

impl ProfileResponse {
    /// Builds the aggregate view from a user's score rows (newest first).
    pub fn from_scores(username: String, rows: Vec<Score>) -> Self {
        let total_score: i64 = rows.iter().map(|r| r.score).sum();
        let total_quizzes = rows.len() as i64;
        let average_score = if rows.is_empty() {
            0.0
        } else {
            round2(total_score as f64 / total_quizzes as f64)
        };

        Self {
            username,
            total_quizzes,
            total_score,
            average_score,
            scores: rows
                .into_iter()
                .map(|r| ScoreItem {
                    quiz_name: r.quiz_name,
                    score: r.score,
                    submitted_at: r.submitted_at,
                })
                .collect(),
        }
    }
}

/// Rounds to two decimal places, the precision used for average scores.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
