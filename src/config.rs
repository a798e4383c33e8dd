use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

/// Where the SQLite file lives when no database is configured, relative to
/// the working directory.
pub const DEFAULT_SQLITE_PATH: &str = "data/buildpro.db";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub app_name: String,
    pub deployment: String,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load from .env file if available

        Config {
            db_url: database_url_from_env(),
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "buildpro-api".to_string()),
            deployment: env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            db_url: "sqlite::memory:".to_string(),
            app_name: "buildpro-api-test".to_string(),
            deployment: "test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
        }
    }
}

/// `DB_URL` wins; otherwise a server URL is assembled from its parts when
/// `DB_HOST` is present, and failing both we fall back to a SQLite file
/// under the working directory.
fn database_url_from_env() -> String {
    if let Ok(url) = env::var("DB_URL") {
        return url;
    }

    if let Ok(host) = env::var("DB_HOST") {
        return format!(
            "{}://{}:{}@{}:{}/{}",
            env::var("DB_PREFIX").unwrap_or_else(|_| "postgresql".to_string()),
            env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            env::var("DB_PASSWORD").unwrap_or_default(),
            host,
            env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string()),
            env::var("DB_NAME").unwrap_or_else(|_| "buildpro".to_string()),
        );
    }

    let path = env::current_dir()
        .map(|cwd| cwd.join(DEFAULT_SQLITE_PATH))
        .unwrap_or_else(|_| DEFAULT_SQLITE_PATH.into());
    format!("sqlite://{}?mode=rwc", path.display())
}
