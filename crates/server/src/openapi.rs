//! OpenAPI document. Schemas here mirror the wire shapes of the envelope
//! and organization types. Paths are declared under [`DOC_PREFIX`] and
//! rewritten to the configured prefix by [`document`].
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

/// Prefix the `#[utoipa::path]` declarations are written against.
pub const DOC_PREFIX: &str = "/api/v1";

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct WelcomeDoc { pub message: String, pub docs: String, pub version: String }

#[derive(ToSchema)]
pub struct OrganizationDoc {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub is_active: bool,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct OrganizationWithStatsDoc {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub user_count: u64,
    pub course_count: u64,
}

#[derive(ToSchema)]
pub struct CreateOrganizationDoc { pub name: String, pub domain: Option<String> }

#[derive(ToSchema)]
pub struct UpdateOrganizationDoc { pub name: Option<String>, pub domain: Option<String>, pub is_active: Option<bool> }

#[derive(ToSchema)]
pub struct PageMetaDoc { pub page: u64, pub per_page: u64, pub total: u64, pub pages: u64 }

#[derive(ToSchema)]
pub struct OrganizationDataDoc { pub success: bool, pub message: Option<String>, pub data: OrganizationDoc }

#[derive(ToSchema)]
pub struct OrganizationStatsDataDoc { pub success: bool, pub message: Option<String>, pub data: OrganizationWithStatsDoc }

#[derive(ToSchema)]
pub struct OrganizationPageDoc {
    pub success: bool,
    pub message: Option<String>,
    pub data: Vec<OrganizationDoc>,
    pub meta: PageMetaDoc,
}

#[derive(ToSchema)]
pub struct ErrorResponseDoc {
    pub success: bool,
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::root,
        crate::routes::organizations::list_organizations,
        crate::routes::organizations::create_organization,
        crate::routes::organizations::get_organization,
        crate::routes::organizations::update_organization,
        crate::routes::organizations::organization_stats,
    ),
    components(
        schemas(
            HealthResponse,
            WelcomeDoc,
            OrganizationDoc,
            OrganizationWithStatsDoc,
            CreateOrganizationDoc,
            UpdateOrganizationDoc,
            PageMetaDoc,
            OrganizationDataDoc,
            OrganizationStatsDataDoc,
            OrganizationPageDoc,
            ErrorResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "root"),
        (name = "organizations")
    )
)]
pub struct ApiDoc;

/// The document for an API mounted under `prefix`.
pub fn document(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if prefix != DOC_PREFIX {
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| match path.strip_prefix(DOC_PREFIX) {
                Some(rest) => (format!("{prefix}{rest}"), item),
                None => (path, item),
            })
            .collect();
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_is_left_alone() {
        let doc = document(DOC_PREFIX);
        assert!(doc.paths.paths.contains_key("/api/v1/organizations/{id}"));
    }

    #[test]
    fn custom_prefix_rewrites_api_paths_only() {
        let doc = document("/learn");
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/learn/organizations"));
        assert!(paths.contains_key("/learn/organizations/{id}/stats"));
        assert!(!paths.keys().any(|p| p.starts_with(DOC_PREFIX)));
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/"));
    }
}
