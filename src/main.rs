use player_records_api::{app, config::Config, db, error::StartupError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting player records api...");

    let config = Config::from_env().inspect_err(|e| tracing::error!("{}", e))?;

    let pool = db::connect(&config.database_url)
        .await
        .inspect_err(|e| tracing::error!("Failed to connect to database: {}", e))?;
    db::ensure_schema(&pool).await?;

    tracing::info!("Database connection established at {}", config.database_url);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(pool)).await?;

    Ok(())
}
