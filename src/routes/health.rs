use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use crate::db;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    timestamp: i64,
}

// GET /health - Liveness plus a round trip to the database
pub async fn health_check(State(pool): State<SqlitePool>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database, code) = match db::ping(&pool).await {
        Ok(()) => ("ok", "reachable", StatusCode::OK),
        Err(e) => {
            tracing::warn!("Health check could not reach database: {}", e);
            ("degraded", "unreachable", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    let response = HealthResponse {
        status,
        database,
        timestamp: chrono::Utc::now().timestamp(),
    };

    (code, Json(response))
}
