use anyhow::Context;
use buildpro_api::common::db;
use buildpro_api::config::Config;
use buildpro_api::routes;
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up tracing/logging
    tracing_subscriber::fmt::init();
    tracing::info!("Starting server...");

    // Load configuration and environment variables to pass to the application
    let config: Config = Config::from_env();

    let db = db::connection(&config)
        .await
        .context("Could not connect to the database")?;

    Migrator::up(db, None)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("DB migrations complete");

    tracing::info!(
        "Starting server {} ({} deployment) ...",
        config.app_name,
        config.deployment.to_uppercase()
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Could not bind to {}", config.bind_address))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let router = routes::build_router(db);

    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
