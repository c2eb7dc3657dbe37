//! HTTP API over the `players` table: list, filter, create, update and delete
//! player records, plus distinct-value lookups for the front end's dropdowns.

use axum::{routing::{get, post, put}, Router};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;

/// Build the application router around a connection pool
pub fn app(pool: SqlitePool) -> Router {
    // The React front end is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Player Records API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route(
            "/api/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )
        // A player may be named "filter", so the static segment also takes PUT and DELETE
        .route(
            "/api/players/filter",
            post(routes::players::filter_players)
                .put(routes::players::update_filter_player)
                .delete(routes::players::delete_filter_player),
        )
        .route(
            "/api/players/{player_id}",
            put(routes::players::update_player).delete(routes::players::delete_player),
        )

        // Dropdown lookups
        .route("/api/positions", get(routes::lookups::get_positions))
        .route("/api/teams", get(routes::lookups::get_teams))
        .route("/api/sports", get(routes::lookups::get_sports))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}
