use std::sync::Arc;

use configs::AppConfig;
use service::ServiceRegistry;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ServiceRegistry>,
    pub config: Arc<AppConfig>,
}
