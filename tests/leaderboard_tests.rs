// tests/leaderboard_tests.rs

use std::sync::Arc;

use kuis_backend::{config::Config, quiz_bank::QuizBank, routes, state::AppState, store};
use sqlx::sqlite::SqlitePoolOptions;

async fn spawn_app() -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite for testing");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "leaderboard_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        guru_username: Some("guru1".to_string()),
        guru_password: Some("gurupass".to_string()),
        reset_interval: None,
    };

    store::users::seed_guru(&pool, "guru1", "gurupass")
        .await
        .expect("Failed to seed guru user");

    let state = AppState {
        pool,
        config,
        quiz_bank: Arc::new(QuizBank::builtin()),
    };
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

/// Signs up a user and returns their bearer token.
async fn signup_token(client: &reqwest::Client, address: &str, username: &str) -> String {
    let body: serde_json::Value = client
        .post(format!("{}/api/auth/signup", address))
        .json(&serde_json::json!({"username": username, "password": "password123"}))
        .send()
        .await
        .expect("Signup request failed")
        .json()
        .await
        .expect("Failed to parse signup json");

    body["token"].as_str().expect("Token not found").to_string()
}

/// Submits a raw score for an arbitrary quiz name.
async fn submit_score(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    quiz_name: &str,
    score: i64,
) {
    let response = client
        .post(format!("{}/api/quiz/submit", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"quiz_name": quiz_name, "score": score}))
        .send()
        .await
        .expect("Submit request failed");
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn leaderboard_ranks_totals_and_rounds_averages() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let budi = unique_name("budi");
    let siti = unique_name("siti");
    let andi = unique_name("andi");

    let budi_token = signup_token(&client, &address, &budi).await;
    let siti_token = signup_token(&client, &address, &siti).await;
    let andi_token = signup_token(&client, &address, &andi).await;

    // budi: [100, 0, 50] -> total 150, average 50.0, count 3
    submit_score(&client, &address, &budi_token, "Kuis A", 100).await;
    submit_score(&client, &address, &budi_token, "Kuis B", 0).await;
    submit_score(&client, &address, &budi_token, "Kuis C", 50).await;

    // siti: [100, 100] -> total 200
    submit_score(&client, &address, &siti_token, "Kuis A", 100).await;
    submit_score(&client, &address, &siti_token, "Kuis B", 100).await;

    // andi: [30] -> total 30; resubmission must replace, not add
    submit_score(&client, &address, &andi_token, "Kuis A", 90).await;
    submit_score(&client, &address, &andi_token, "Kuis A", 30).await;

    let body: serde_json::Value = client
        .get(format!("{}/api/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let board = body["leaderboard"].as_array().unwrap();
    assert_eq!(board.len(), 3);

    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[0]["username"], siti);
    assert_eq!(board[0]["total_score"], 200);
    assert_eq!(board[0]["average_score"], 100.0);
    assert_eq!(board[0]["quiz_count"], 2);

    assert_eq!(board[1]["rank"], 2);
    assert_eq!(board[1]["username"], budi);
    assert_eq!(board[1]["total_score"], 150);
    assert_eq!(board[1]["average_score"], 50.0);
    assert_eq!(board[1]["quiz_count"], 3);

    assert_eq!(board[2]["rank"], 3);
    assert_eq!(board[2]["username"], andi);
    assert_eq!(board[2]["total_score"], 30);
    assert_eq!(board[2]["quiz_count"], 1);
}

#[tokio::test]
async fn leaderboard_shows_at_most_ten_entries() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for i in 0..12 {
        let name = unique_name(&format!("m{:02}", i));
        let token = signup_token(&client, &address, &name).await;
        submit_score(&client, &address, &token, "Kuis A", (i % 101) as i64).await;
    }

    let body: serde_json::Value = client
        .get(format!("{}/api/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let board = body["leaderboard"].as_array().unwrap();
    assert_eq!(board.len(), 10);

    // Strictly ranked 1..=10, totals never increasing
    for (i, entry) in board.iter().enumerate() {
        assert_eq!(entry["rank"], (i + 1) as i64);
        if i > 0 {
            assert!(entry["total_score"].as_i64() <= board[i - 1]["total_score"].as_i64());
        }
    }
}

#[tokio::test]
async fn guru_routes_require_auth_then_role() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // No token at all: 401, never 403
    let response = client
        .get(format!("{}/api/guru/students", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // Authenticated murid: 403
    let murid = unique_name("murid");
    let murid_token = signup_token(&client, &address, &murid).await;
    let response = client
        .get(format!("{}/api/guru/students", address))
        .header("Authorization", format!("Bearer {}", murid_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    // Guru: allowed
    let login: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"username": "guru1", "password": "gurupass"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(login["role"], "guru");
    let guru_token = login["token"].as_str().unwrap();

    let response = client
        .get(format!("{}/api/guru/students", address))
        .header("Authorization", format!("Bearer {}", guru_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let students: serde_json::Value = response.json().await.unwrap();
    let students = students.as_array().unwrap();
    assert!(students.iter().any(|s| s["username"] == murid));
    // The guru account itself is not a student
    assert!(students.iter().all(|s| s["username"] != "guru1"));
    // Password hashes never serialize
    assert!(students.iter().all(|s| s.get("password").is_none()));
}

#[tokio::test]
async fn guru_can_inspect_a_single_student() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let murid = unique_name("murid");
    let murid_token = signup_token(&client, &address, &murid).await;
    submit_score(&client, &address, &murid_token, "Kuis A", 100).await;
    submit_score(&client, &address, &murid_token, "Kuis B", 50).await;

    let login: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"username": "guru1", "password": "gurupass"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let guru_token = login["token"].as_str().unwrap();

    let detail: serde_json::Value = client
        .get(format!("{}/api/guru/students/{}", address, murid))
        .header("Authorization", format!("Bearer {}", guru_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(detail["username"], murid);
    assert_eq!(detail["total_quizzes"], 2);
    assert_eq!(detail["total_score"], 150);
    assert_eq!(detail["average_score"], 75.0);

    // Unknown student: 404
    let response = client
        .get(format!("{}/api/guru/students/no_such_student", address))
        .header("Authorization", format!("Bearer {}", guru_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
