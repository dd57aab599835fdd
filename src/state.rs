use std::sync::Arc;

use crate::config::Config;
use crate::quiz_bank::QuizBank;
use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub quiz_bank: Arc<QuizBank>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<QuizBank> {
    fn from_ref(state: &AppState) -> Self {
        state.quiz_bank.clone()
    }
}
