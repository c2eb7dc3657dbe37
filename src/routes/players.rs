use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::models::{
    CreatePlayer, FilterRequest, MessageResponse, Player, PlayerFilter, UpdatePlayer,
};

/// Id that collides with the static `/api/players/filter` route
pub const FILTER_SEGMENT: &str = "filter";

// GET /api/players - List all players
pub async fn get_players(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = db::get_all_players(&pool).await?;

    Ok(Json(players))
}

/// POST /api/players/filter - Players matching the dropdown selections
///
/// The body is optional: an empty body behaves like `{}` and returns every player.
pub async fn filter_players(
    State(pool): State<SqlitePool>,
    body: Bytes,
) -> Result<Json<Vec<Player>>, ApiError> {
    let request = parse_filter_body(&body)?;
    let filter = PlayerFilter::from_request(request);

    let players = if filter.is_empty() {
        db::get_all_players(&pool).await?
    } else {
        db::filter_players(&pool, &filter).await?
    };

    Ok(Json(players))
}

fn parse_filter_body(body: &[u8]) -> Result<FilterRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FilterRequest::default());
    }

    // `null` is treated like an empty body
    serde_json::from_slice::<Option<FilterRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::BadRequest(format!("Invalid filter body: {}", e)))
}

// POST /api/players - Create a player
pub async fn create_player(
    State(pool): State<SqlitePool>,
    JsonBody(player): JsonBody<CreatePlayer>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    db::insert_player(&pool, &player)
        .await
        .map_err(|e| ApiError::from_insert(e, &player.id))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Player created successfully")),
    ))
}

// PUT /api/players/{player_id} - Replace a player's fields; missing fields become null
pub async fn update_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
    JsonBody(fields): JsonBody<UpdatePlayer>,
) -> Result<Json<MessageResponse>, ApiError> {
    replace_player(&pool, &player_id, &fields).await
}

// PUT /api/players/filter - Same as above for the player whose id is "filter"
pub async fn update_filter_player(
    State(pool): State<SqlitePool>,
    JsonBody(fields): JsonBody<UpdatePlayer>,
) -> Result<Json<MessageResponse>, ApiError> {
    replace_player(&pool, FILTER_SEGMENT, &fields).await
}

async fn replace_player(
    pool: &SqlitePool,
    player_id: &str,
    fields: &UpdatePlayer,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = db::update_player(pool, player_id, fields).await?;

    if updated == 0 {
        return Err(ApiError::PlayerNotFound);
    }

    Ok(Json(MessageResponse::new("Player updated successfully")))
}

// DELETE /api/players/{player_id} - Remove a player
pub async fn delete_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_player(&pool, &player_id).await
}

// DELETE /api/players/filter - Remove the player whose id is "filter"
pub async fn delete_filter_player(
    State(pool): State<SqlitePool>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_player(&pool, FILTER_SEGMENT).await
}

async fn remove_player(
    pool: &SqlitePool,
    player_id: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = db::delete_player(pool, player_id).await?;

    if deleted == 0 {
        return Err(ApiError::PlayerNotFound);
    }

    Ok(Json(MessageResponse::new("Player deleted successfully")))
}
