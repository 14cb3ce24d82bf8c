//! Seed the database with the default admin account and demo content

use sqlx::postgres::PgPoolOptions;
use std::process::ExitCode;

use vistalanka_server::{
    config::AppConfig,
    repository::Repository,
    services::seed::{run_seed, SeedTargets},
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vistalanka_server=info,seed=info".into()),
        )
        .init();

    match seed().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error seeding database: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn seed() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    if config.database.url.is_empty() {
        anyhow::bail!("Please set the DATABASE_URL environment variable");
    }

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let repository = Repository::new(pool.clone());
    let report = run_seed(SeedTargets {
        admin_users: &repository.admin_users,
        destinations: &repository.destinations,
        tours: &repository.tours,
        testimonials: &repository.testimonials,
    })
    .await;

    pool.close().await;
    tracing::info!("Disconnected from database");

    let report = report?;
    tracing::info!(
        admin_created = report.admin_created,
        destinations = report.destinations,
        tours = report.tours,
        testimonials = report.testimonials,
        "Seeding complete"
    );
    Ok(())
}
