use std::time::Duration;

use anyhow::Context;
use base64::Engine as _;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlSslMode};
use sqlx::{MySql, Pool};

use crate::bootstrap::config::DatabaseConfig;

pub type DbPool = Pool<MySql>;

pub fn connect_options(cfg: &DatabaseConfig) -> anyhow::Result<MySqlConnectOptions> {
    let mut opts = MySqlConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .database(&cfg.database);
    if let Some(password) = &cfg.password {
        opts = opts.password(password);
    }
    if let Some(ca_b64) = &cfg.ssl_ca_base64 {
        let pem = base64::engine::general_purpose::STANDARD
            .decode(ca_b64.trim())
            .context("DB_SSL_CA_BASE64 is not valid base64")?;
        opts = opts.ssl_mode(MySqlSslMode::VerifyCa).ssl_ca_from_pem(pem);
    }
    Ok(opts)
}

pub async fn connect_pool(cfg: &DatabaseConfig) -> anyhow::Result<DbPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .connect_with(connect_options(cfg)?)
        .await
        .with_context(|| format!("failed to connect to MySQL at {}:{}", cfg.host, cfg.port))?;

    let ping: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
    tracing::info!(host = %cfg.host, database = %cfg.database, ping, "mysql_connected");
    Ok(pool)
}

pub async fn migrate(pool: &DbPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub mod repositories;
