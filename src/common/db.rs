use crate::config::Config;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::path::Path;
use tokio::sync::OnceCell;

static CONNECTION: OnceCell<DatabaseConnection> = OnceCell::const_new();

/// The process-wide connection. The first caller connects, every later (or
/// concurrent) caller gets the same handle back.
pub async fn connection(config: &Config) -> Result<&'static DatabaseConnection, DbErr> {
    CONNECTION
        .get_or_try_init(|| async { connect(&config.db_url).await })
        .await
}

/// Open a new connection that the caller owns. Prefer [`connection`] inside
/// the server; this is for one-shot jobs that close their handle when done.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    if let Some(path) = sqlite_file_path(url) {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DbErr::Custom(format!(
                        "Could not create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
    }

    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    tracing::info!(backend = ?db.get_database_backend(), "Connected to the database");
    Ok(db)
}

/// File path part of a `sqlite://` URL, `None` for in-memory or other backends.
fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}
