//! Create the database named in `database.url` / `DATABASE_URL`.
//!
//! Connects to the `postgres` maintenance database on the same server and
//! issues `CREATE DATABASE`. Run once per environment.

use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let config = match configs::AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    match models::db::create_database(&config.database).await {
        Ok(name) => {
            info!(event = "create_db", database = %name, "database created successfully");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "create_db_failed", error = %e, "error creating database");
            std::process::ExitCode::FAILURE
        }
    }
}
