use axum::{extract::State, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Welcome};

use crate::openapi;
use crate::state::AppState;

pub mod organizations;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Liveness probe
#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "healthy" })
}

/// Service banner with version and docs location
#[utoipa::path(get, path = "/", tag = "root", responses((status = 200, description = "Welcome message", body = crate::openapi::WelcomeDoc)))]
pub async fn root(State(state): State<AppState>) -> Json<Welcome> {
    let api = &state.config.api;
    Json(Welcome {
        message: format!("Welcome to {}", api.project_name),
        docs: OPENAPI_PATH.to_string(),
        version: api.version.clone(),
    })
}

async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::document(&state.config.api.prefix))
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(OPENAPI_PATH, get(openapi_json));

    let api = organizations::routes(&state.config.api.prefix);

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
