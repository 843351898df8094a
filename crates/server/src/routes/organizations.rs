use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use common::{DataResponse, PaginatedResponse};
use models::organization::{self, CreateOrganization, OrganizationWithStats, UpdateOrganization};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Organization routes mounted under `prefix` (e.g. `/api/v1`).
pub fn routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{prefix}/organizations"), get(list_organizations).post(create_organization))
        .route(&format!("{prefix}/organizations/:id"), get(get_organization).put(update_organization))
        .route(&format!("{prefix}/organizations/:id/stats"), get(organization_stats))
}

/// List organizations, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    tag = "organizations",
    params(
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("per_page" = Option<u32>, Query, description = "Items per page, 1..=100, default 20")
    ),
    responses((status = 200, description = "One page of organizations", body = crate::openapi::OrganizationPageDoc))
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<PaginatedResponse<organization::Model>>, ApiError> {
    let page = state.registry.organizations.list(pagination).await?;
    Ok(Json(page))
}

/// Create an organization
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    tag = "organizations",
    request_body = crate::openapi::CreateOrganizationDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::OrganizationDataDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateOrganization>,
) -> Result<(StatusCode, Json<DataResponse<organization::Model>>), ApiError> {
    let org = state.registry.organizations.create(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::with_message(org, "Organization created successfully"))))
}

/// Get one organization
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    tag = "organizations",
    params(("id" = Uuid, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::OrganizationDataDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DataResponse<organization::Model>>, ApiError> {
    let org = state.registry.organizations.get(id).await?;
    Ok(Json(DataResponse::new(org)))
}

/// Partially update an organization
#[utoipa::path(
    put,
    path = "/api/v1/organizations/{id}",
    tag = "organizations",
    params(("id" = Uuid, Path, description = "Organization id")),
    request_body = crate::openapi::UpdateOrganizationDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::OrganizationDataDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update_organization(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<UpdateOrganization>,
) -> Result<Json<DataResponse<organization::Model>>, ApiError> {
    let org = state.registry.organizations.update(id, &patch).await?;
    Ok(Json(DataResponse::with_message(org, "Organization updated successfully")))
}

/// Organization with user and course counts
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}/stats",
    tag = "organizations",
    params(("id" = Uuid, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization with counts", body = crate::openapi::OrganizationStatsDataDoc),
        (status = 404, description = "Not Found or analytics disabled", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn organization_stats(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DataResponse<OrganizationWithStats>>, ApiError> {
    let stats = state.registry.organizations.stats(id).await?;
    Ok(Json(DataResponse::new(stats)))
}
