use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Player not found")]
    PlayerNotFound,

    #[error("Player {0} already exists")]
    DuplicatePlayer(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// Sort a write failure into a duplicate key or a plain storage fault
    pub fn from_insert(err: sqlx::Error, player_id: &str) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                ApiError::DuplicatePlayer(player_id.to_string())
            }
            err => ApiError::Database(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PlayerNotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicatePlayer(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Failures that stop the server before it starts serving
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("failed to open database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
