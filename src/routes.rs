// src/routes.rs

use axum::{
    Json, Router,
    http::Method,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, guru, profile, quiz},
    state::AppState,
    utils::jwt::{auth_middleware, guru_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, quiz, profile, guru).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config, Quiz Bank).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout));

    let quiz_routes = Router::new()
        .route("/leaderboard", get(quiz::get_leaderboard))
        // Protected quiz routes
        .merge(
            Router::new()
                .route("/grade", post(quiz::grade_quiz))
                .route("/submit", post(quiz::submit_score))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let profile_routes = Router::new()
        .route("/", get(profile::get_profile))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let guru_routes = Router::new()
        .route("/students", get(guru::list_students))
        .route("/students/{username}", get(guru::get_student_scores))
        // Double middleware protection: Auth first, then Guru check.
        // Layer order guarantees a missing token is 401, never 403.
        .layer(middleware::from_fn(guru_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/profile", profile_routes)
        .nest("/api/guru", guru_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
