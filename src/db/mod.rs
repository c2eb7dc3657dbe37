use std::str::FromStr;

use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;
use crate::models::*;

const SELECT_PLAYERS: &str = "SELECT id, first_name, last_name, team_id, position_id, \
     position_display_name, sport_id FROM players";

const CREATE_PLAYERS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS players (
    id TEXT PRIMARY KEY NOT NULL,
    first_name TEXT,
    last_name TEXT,
    team_id TEXT,
    position_id TEXT,
    position_display_name TEXT,
    sport_id TEXT
)"#;

// Connection setup
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Pool over a private in-memory database.
///
/// Every SQLite connection to `:memory:` opens its own database, so the pool
/// is pinned to one connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

/// Create the players table when the database is fresh. Existing tables are left alone.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PLAYERS_TABLE)
        .execute(pool)
        .await?;

    tracing::debug!("players table ready");
    Ok(())
}

pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// Player queries
pub async fn get_all_players(pool: &SqlitePool) -> Result<Vec<Player>, sqlx::Error> {
    let players = sqlx::query_as::<_, Player>(SELECT_PLAYERS)
        .fetch_all(pool)
        .await?;

    tracing::debug!(sql = SELECT_PLAYERS, "executed");
    tracing::info!("Retrieved {} players", players.len());
    Ok(players)
}

/// Build the SELECT for a filter, one bound equality predicate per constrained column
pub fn filter_query(filter: &PlayerFilter) -> QueryBuilder<'static, Sqlite> {
    let mut query = QueryBuilder::<Sqlite>::new(SELECT_PLAYERS);
    let predicates = [
        ("position_display_name", &filter.position_display_name),
        ("team_id", &filter.team_id),
        ("sport_id", &filter.sport_id),
    ];

    let mut separator = " WHERE ";
    for (column, value) in predicates {
        if let Some(value) = value {
            query
                .push(separator)
                .push(column)
                .push(" = ")
                .push_bind(value.clone());
            separator = " AND ";
        }
    }

    query
}

pub async fn filter_players(
    pool: &SqlitePool,
    filter: &PlayerFilter,
) -> Result<Vec<Player>, sqlx::Error> {
    let mut query = filter_query(filter);
    tracing::debug!(sql = query.sql(), params = ?filter, "executing");

    let players = query
        .build_query_as::<Player>()
        .fetch_all(pool)
        .await?;

    tracing::info!("Retrieved {} filtered players", players.len());
    Ok(players)
}

pub async fn insert_player(pool: &SqlitePool, player: &CreatePlayer) -> Result<(), sqlx::Error> {
    let sql = r#"INSERT INTO players (id, first_name, last_name, team_id,
                                      position_id, position_display_name, sport_id)
                 VALUES (?, ?, ?, ?, ?, ?, ?)"#;

    sqlx::query(sql)
        .bind(&player.id)
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.team_id)
        .bind(&player.position_id)
        .bind(&player.position_display_name)
        .bind(&player.sport_id)
        .execute(pool)
        .await?;

    tracing::debug!(sql, params = ?player, "executed");
    tracing::info!("Player {} created", player.id);
    Ok(())
}

/// Overwrite every non-key column of a player. Returns the number of rows touched.
pub async fn update_player(
    pool: &SqlitePool,
    player_id: &str,
    fields: &UpdatePlayer,
) -> Result<u64, sqlx::Error> {
    let sql = r#"UPDATE players
                 SET first_name = ?,
                     last_name = ?,
                     team_id = ?,
                     position_id = ?,
                     position_display_name = ?,
                     sport_id = ?
                 WHERE id = ?"#;

    let affected = sqlx::query(sql)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.team_id)
        .bind(&fields.position_id)
        .bind(&fields.position_display_name)
        .bind(&fields.sport_id)
        .bind(player_id)
        .execute(pool)
        .await?
        .rows_affected();

    tracing::debug!(sql, player_id, params = ?fields, "executed");
    tracing::info!("Updated {} row(s)", affected);
    Ok(affected)
}

pub async fn delete_player(pool: &SqlitePool, player_id: &str) -> Result<u64, sqlx::Error> {
    let sql = "DELETE FROM players WHERE id = ?";

    let affected = sqlx::query(sql)
        .bind(player_id)
        .execute(pool)
        .await?
        .rows_affected();

    tracing::debug!(sql, player_id, "executed");
    tracing::info!("Deleted {} row(s)", affected);
    Ok(affected)
}

// Dropdown lookups - distinct non-null values of one column
pub async fn get_positions(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    distinct_values(
        pool,
        r#"SELECT DISTINCT position_display_name FROM players
           WHERE position_display_name IS NOT NULL"#,
    )
    .await
}

pub async fn get_teams(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    distinct_values(pool, "SELECT DISTINCT team_id FROM players WHERE team_id IS NOT NULL").await
}

pub async fn get_sports(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    distinct_values(pool, "SELECT DISTINCT sport_id FROM players WHERE sport_id IS NOT NULL").await
}

async fn distinct_values(pool: &SqlitePool, sql: &'static str) -> Result<Vec<String>, sqlx::Error> {
    let values = sqlx::query_scalar::<_, String>(sql)
        .fetch_all(pool)
        .await?;

    tracing::debug!(sql, "executed");
    tracing::info!("Retrieved {} distinct values", values.len());
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(position: Option<&str>, team: Option<&str>, sport: Option<&str>) -> PlayerFilter {
        PlayerFilter {
            position_display_name: position.map(String::from),
            team_id: team.map(String::from),
            sport_id: sport.map(String::from),
        }
    }

    fn sample(id: &str, position: Option<&str>, team: Option<&str>) -> CreatePlayer {
        CreatePlayer {
            id: id.into(),
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            team_id: team.map(String::from),
            position_id: None,
            position_display_name: position.map(String::from),
            sport_id: Some("NFL".into()),
        }
    }

    async fn seeded_pool() -> SqlitePool {
        let pool = connect_in_memory().await.unwrap();
        ensure_schema(&pool).await.unwrap();
        insert_player(&pool, &sample("1", Some("QB"), Some("KC"))).await.unwrap();
        insert_player(&pool, &sample("2", Some("QB"), Some("BUF"))).await.unwrap();
        insert_player(&pool, &sample("3", Some("WR"), Some("KC"))).await.unwrap();
        insert_player(&pool, &sample("4", None, None)).await.unwrap();
        pool
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let query = filter_query(&PlayerFilter::default());
        assert_eq!(query.sql(), SELECT_PLAYERS);
    }

    #[test]
    fn predicates_are_bound_and_joined_with_and() {
        let query = filter_query(&filter(Some("QB"), None, Some("NFL")));
        assert_eq!(
            query.sql(),
            format!("{} WHERE position_display_name = ? AND sport_id = ?", SELECT_PLAYERS)
        );
    }

    #[test]
    fn filter_values_never_reach_sql_text() {
        let query = filter_query(&filter(None, Some("KC' OR '1'='1"), None));
        assert!(!query.sql().contains("KC"));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let pool = seeded_pool().await;
        ensure_schema(&pool).await.unwrap();
        assert_eq!(get_all_players(&pool).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn filter_intersects_predicates() {
        let pool = seeded_pool().await;

        let qbs = filter_players(&pool, &filter(Some("QB"), None, None)).await.unwrap();
        assert_eq!(qbs.len(), 2);

        let kc_qbs = filter_players(&pool, &filter(Some("QB"), Some("KC"), None)).await.unwrap();
        assert_eq!(kc_qbs.len(), 1);
        assert_eq!(kc_qbs[0].id, "1");
    }

    #[tokio::test]
    async fn lookups_skip_nulls_and_duplicates() {
        let pool = seeded_pool().await;

        let mut positions = get_positions(&pool).await.unwrap();
        positions.sort();
        assert_eq!(positions, vec!["QB", "WR"]);

        let mut teams = get_teams(&pool).await.unwrap();
        teams.sort();
        assert_eq!(teams, vec!["BUF", "KC"]);

        assert_eq!(get_sports(&pool).await.unwrap(), vec!["NFL"]);
    }

    #[tokio::test]
    async fn duplicate_insert_is_unique_violation() {
        let pool = seeded_pool().await;
        let err = insert_player(&pool, &sample("1", None, None)).await.unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_and_delete_report_affected_rows() {
        let pool = seeded_pool().await;

        assert_eq!(update_player(&pool, "1", &UpdatePlayer::default()).await.unwrap(), 1);
        assert_eq!(update_player(&pool, "missing", &UpdatePlayer::default()).await.unwrap(), 0);

        assert_eq!(delete_player(&pool, "2").await.unwrap(), 1);
        assert_eq!(delete_player(&pool, "2").await.unwrap(), 0);
    }
}
