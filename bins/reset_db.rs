//! Drop every table in the `public` schema of the configured database.
//!
//! Destructive and unconditional; schema is rebuilt by running migrations
//! afterwards (e.g. start the server with `database.auto_migrate = true`).

use dotenvy::dotenv;
use tracing::{error, info};

async fn reset(config: &configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&config.database).await?;
    models::db::drop_all_tables(&db).await?;
    Ok(())
}

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

    match reset(&config).await {
        Ok(()) => {
            info!(event = "reset_db", "all tables dropped successfully");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "reset_db_failed", error = %e, "error resetting database");
            std::process::ExitCode::FAILURE
        }
    }
}
