//! Server startup.
//!
//! Initialization order:
//! 1. `.env` is loaded and [`AppConfig`] built (by the binary)
//! 2. logging is initialized from `server.log_json` (by the binary)
//! 3. the database pool is opened; migrations run when `database.auto_migrate`
//! 4. the [`ServiceRegistry`] is built from pool + config
//! 5. the router is assembled and the listener bound

use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::ServiceRegistry;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn build_state(db: DatabaseConnection, config: AppConfig) -> AppState {
    let registry = ServiceRegistry::new(db, &config);
    AppState { registry: Arc::new(registry), config: Arc::new(config) }
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: connect, build the app and serve until Ctrl+C
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&config.database).await?;
    if config.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }
    if config.auth.uses_dev_secret() {
        warn!("JWT_SECRET not set; running with the development secret");
    }

    let addr = config.server.bind_addr();
    let app = build_app(build_state(db, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
