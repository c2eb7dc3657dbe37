use axum::extract::FromRequest;
use crate::error::ApiError;

/// `axum::Json` whose rejections answer with the `{"error": ...}` body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
