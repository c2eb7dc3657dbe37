//! Distinct column values used to fill the filter dropdowns.

use axum::{extract::State, response::Json};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;

// GET /api/positions
pub async fn get_positions(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(db::get_positions(&pool).await?))
}

// GET /api/teams
pub async fn get_teams(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(db::get_teams(&pool).await?))
}

// GET /api/sports
pub async fn get_sports(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(db::get_sports(&pool).await?))
}
