use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::AppConfig;

pub type DbPool = PgPool;

/// Build the Postgres pool. Connect options are assembled from the discrete
/// DB_* settings rather than a URL so passwords need no escaping.
pub async fn create_pool(config: &AppConfig) -> Result<DbPool> {
    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .database(&config.db_name)
        .username(&config.db_user)
        .password(&config.db_pass);

    // The acquire timeout doubles as a conservative per-request deadline on
    // the data store; queries themselves are small single-row lookups.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    Ok(pool)
}
