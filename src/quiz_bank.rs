// src/quiz_bank.rs

use std::collections::HashMap;

use crate::error::AppError;

/// Highest score a quiz can award. Grading is binary: full marks or zero.
pub const MAX_SCORE: i64 = 100;

/// A single-question quiz with a canonical integer answer.
#[derive(Debug, Clone)]
pub struct Quiz {
    pub question: String,
    pub answer: i64,
    pub max_score: i64,
}

/// Fixed quiz content bank, keyed by quiz name.
///
/// Quiz content management is out of scope, so the bank is built once at
/// startup and shared read-only through `AppState`.
#[derive(Debug)]
pub struct QuizBank {
    quizzes: HashMap<String, Quiz>,
}

impl QuizBank {
    pub fn new(quizzes: HashMap<String, Quiz>) -> Self {
        Self { quizzes }
    }

    /// The built-in quiz set served by this process.
    pub fn builtin() -> Self {
        let mut quizzes = HashMap::new();
        quizzes.insert(
            "Matematika Dasar".to_string(),
            Quiz {
                question: "Berapakah hasil dari 15 + 20?".to_string(),
                answer: 35,
                max_score: MAX_SCORE,
            },
        );
        quizzes.insert(
            "Matematika Bab 2".to_string(),
            Quiz {
                question: "Berapakah hasil dari 7 x 8?".to_string(),
                answer: 56,
                max_score: MAX_SCORE,
            },
        );
        Self::new(quizzes)
    }

    pub fn get(&self, quiz_name: &str) -> Option<&Quiz> {
        self.quizzes.get(quiz_name)
    }

    /// Upper bound for a quiz's score. Used to validate raw client-submitted
    /// scores; quizzes outside the bank fall back to the global maximum.
    pub fn max_score(&self, quiz_name: &str) -> i64 {
        self.get(quiz_name).map(|q| q.max_score).unwrap_or(MAX_SCORE)
    }

    /// Grades a submitted answer against the canonical one.
    ///
    /// Exact match earns the quiz's maximum score, anything else earns 0.
    /// Unknown quiz names are a client error, not a server one.
    pub fn grade(&self, quiz_name: &str, answer: i64) -> Result<i64, AppError> {
        let quiz = self
            .quizzes
            .get(quiz_name)
            .ok_or_else(|| AppError::BadRequest("Quiz not found".to_string()))?;

        if answer == quiz.answer {
            Ok(quiz.max_score)
        } else {
            Ok(0)
        }
    }
}
