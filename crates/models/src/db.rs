//! Connection pool setup and one-off maintenance operations.

use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::errors::ModelError;

/// Database the server-level statements (CREATE DATABASE) run against.
pub const MAINTENANCE_DB: &str = "postgres";

const DROP_ALL_TABLES_SQL: &str = r#"
DO $$ DECLARE
    r RECORD;
BEGIN
    FOR r IN (SELECT tablename FROM pg_tables WHERE schemaname = 'public') LOOP
        EXECUTE 'DROP TABLE IF EXISTS ' || quote_ident(r.tablename) || ' CASCADE';
    END LOOP;
END $$;
"#;

pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    Database::connect(opt).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Connect using `DATABASE_URL` and default pool settings.
pub async fn connect() -> Result<DatabaseConnection, ModelError> {
    let cfg = DatabaseConfig::from_env();
    if cfg.url.trim().is_empty() {
        return Err(ModelError::Db("DATABASE_URL is not set".into()));
    }
    connect_with_config(&cfg).await
}

/// Split a postgres URL into the URL of the maintenance database on the
/// same server and the name of the target database. Query parameters
/// (e.g. `sslmode`) are carried over.
pub fn split_database_url(url: &str) -> Result<(String, String), ModelError> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| ModelError::validation("database url has no scheme"))?;
    let (location, query) = match rest.split_once('?') {
        Some((l, q)) => (l, Some(q)),
        None => (rest, None),
    };
    let (authority, path) = location
        .split_once('/')
        .ok_or_else(|| ModelError::validation("database url has no database name"))?;
    let name = path.trim_matches('/');
    if name.is_empty() || name.contains('/') {
        return Err(ModelError::validation(format!("invalid database name in url: {path:?}")));
    }
    let mut maintenance = format!("{scheme}://{authority}/{MAINTENANCE_DB}");
    if let Some(q) = query {
        maintenance.push('?');
        maintenance.push_str(q);
    }
    Ok((maintenance, name.to_string()))
}

fn validate_database_name(name: &str) -> Result<(), ModelError> {
    let ok = name.len() <= 63
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(ModelError::validation(format!("unsupported database name: {name}")))
    }
}

/// Create the database named in `cfg.url`. Returns the database name.
/// Fails with [`ModelError::Db`] if it already exists.
pub async fn create_database(cfg: &DatabaseConfig) -> Result<String, ModelError> {
    let (maintenance_url, name) = split_database_url(&cfg.url)?;
    validate_database_name(&name)?;

    let admin_cfg = DatabaseConfig { url: maintenance_url, min_connections: 1, max_connections: 1, ..cfg.clone() };
    let admin = connect_with_config(&admin_cfg).await?;
    admin
        .execute_unprepared(&format!("CREATE DATABASE \"{name}\""))
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    info!(database = %name, "database created");
    Ok(name)
}

/// Drop every table in the `public` schema, cascading to dependents.
pub async fn drop_all_tables(db: &DatabaseConnection) -> Result<(), ModelError> {
    db.execute_unprepared(DROP_ALL_TABLES_SQL)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    info!("all tables in schema public dropped");
    Ok(())
}
