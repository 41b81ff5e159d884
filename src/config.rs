use anyhow::Context;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_pass: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Loaded once at startup and passed down explicitly, never stored as a global.
    pub fn from_env() -> anyhow::Result<Self> {
        let db_host = env::var("DB_HOST").context("DB_HOST is not set")?;
        let db_port = env::var("DB_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("DB_PORT must be a port number")?
            .unwrap_or(5432);
        let db_name = env::var("DB_NAME").context("DB_NAME is not set")?;
        let db_user = env::var("DB_USER").context("DB_USER is not set")?;
        let db_pass = env::var("DB_PASS").context("DB_PASS is not set")?;

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        Ok(Self {
            db_host,
            db_port,
            db_name,
            db_user,
            db_pass,
            host,
            port,
        })
    }
}
