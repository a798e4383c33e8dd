//! BuildPro Database Seeder
//!
//! Fills a fresh database with demonstration projects and milestones.
//!
//! Usage:
//!   `cargo run --bin seed_database -- --db-url sqlite://data/buildpro.db?mode=rwc`
//!
//! Without `--db-url` the server configuration (`DB_URL`, `.env`, or the
//! default SQLite file) is used. The connection is closed when the run ends,
//! whether seeding succeeded or not.

use anyhow::Context;
use buildpro_api::common::db;
use buildpro_api::config::Config;
use buildpro_api::seed::{SeedSummary, seed_database};
use clap::{Arg, Command};
use console::style;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

async fn run(db: &DatabaseConnection) -> anyhow::Result<SeedSummary> {
    Migrator::up(db, None)
        .await
        .context("Failed to run migrations")?;

    let summary = seed_database(db)
        .await
        .context("Failed to insert seed data")?;

    Ok(summary)
}

/// Hide everything between the scheme and the host in server URLs.
fn redact_credentials(url: &str) -> String {
    match (url.split_once("://"), url.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, host))) => format!("{scheme}://***@{host}"),
        _ => url.to_string(),
    }
}

fn display_summary(summary: &SeedSummary) {
    println!();
    println!("{}", style("Sample data created successfully!").green().bold());
    for project in &summary.projects {
        println!(
            "  {} {} {}",
            style("•").dim(),
            style(&project.title).cyan(),
            style(format!("(#{}, {})", project.id, project.status)).dim()
        );
    }
    println!(
        "  {} {} milestones",
        style("•").dim(),
        style(summary.milestones).cyan()
    );
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = Command::new("BuildPro Database Seeder")
        .version("1.0")
        .about("Seeds the BuildPro database with demonstration projects and milestones")
        .arg(
            Arg::new("db-url")
                .short('d')
                .long("db-url")
                .value_name("URL")
                .help("Database URL, defaults to the server configuration"),
        )
        .get_matches();

    let db_url = match matches.get_one::<String>("db-url") {
        Some(url) => url.clone(),
        None => Config::from_env().db_url,
    };

    println!("{}", style("BuildPro Database Seeder v1.0").bold());
    println!("{}", style("━".repeat(40)).dim());
    println!("Database: {}", style(redact_credentials(&db_url)).cyan());

    let db = db::connect(&db_url)
        .await
        .context("Could not connect to the database")?;

    let result = run(&db).await;
    db.close()
        .await
        .context("Failed to close the database connection")?;

    let summary = result?;
    display_summary(&summary);

    Ok(())
}
