// src/main.rs

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use kuis_backend::config::Config;
use kuis_backend::quiz_bank::QuizBank;
use kuis_backend::routes;
use kuis_backend::state::AppState;
use kuis_backend::store;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("DATABASE_URL is not a valid SQLite URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(connect_options)
        .await
        .expect("Failed to open database");

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    // Seed Guru User
    if let (Some(username), Some(password)) = (&config.guru_username, &config.guru_password) {
        if let Err(e) = store::users::seed_guru(&pool, username, password).await {
            tracing::error!("Failed to seed guru user: {:?}", e);
        }
    }

    // Opt-in maintenance job: periodically wipe all scores.
    if let Some(interval_secs) = config.reset_interval {
        spawn_reset_job(pool.clone(), interval_secs);
    }

    // Create AppState
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        quiz_bank: Arc::new(QuizBank::builtin()),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

/// Clears the scores table every `interval_secs`. Accounts survive the wipe.
/// Only runs when RESET_INTERVAL is set; every run is logged.
fn spawn_reset_job(pool: SqlitePool, interval_secs: u64) {
    tracing::info!("Score reset job enabled, every {}s", interval_secs);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; skip it so startup is not a wipe.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match store::scores::reset_all(&pool).await {
                Ok(wiped) => tracing::info!("Score reset job wiped {} rows", wiped),
                Err(e) => tracing::error!("Score reset job failed: {:?}", e),
            }
        }
    });
}
