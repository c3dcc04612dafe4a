use breed_service::database::{run_migrations, seed_from_csv};
use breed_service::{AppState, Config, create_router};
use dotenv::dotenv;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG may come from .env
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = Config::from_env()?;
    config.print_info();

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect(&config.database_url)
        .await?;
    info!("Database connected");

    let outcome = run_migrations(
        &pool,
        config.migration_direction,
        config.migration_steps,
    )
    .await?;
    info!("{}", outcome);

    // seed failures are logged, never fatal
    match seed_from_csv(&pool, &config.breeds_csv_path).await {
        Ok(report) => info!(
            "CSV data inserted: {} new, {} already present, {} failed",
            report.inserted, report.skipped, report.failed
        ),
        Err(e) => error!("Failed to insert CSV data: {}", e),
    }

    let state = Arc::new(AppState::new(pool));
    let app = create_router(state);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Service started and listening on http://{}", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
