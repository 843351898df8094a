//! Construction point for every service.
//!
//! Built once at startup from the database pool and the loaded
//! configuration, then shared read-only by request handlers.

use configs::{AppConfig, FeatureFlags};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::organization_service::OrganizationService;

#[derive(Clone, Debug)]
pub struct ServiceRegistry {
    pub organizations: OrganizationService,
    pub features: FeatureFlags,
}

impl ServiceRegistry {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let features = config.features;
        info!(
            ai_features = features.enable_ai_features,
            analytics = features.enable_analytics,
            "service registry initialized"
        );
        Self {
            organizations: OrganizationService::new(db, features.enable_analytics),
            features,
        }
    }
}
