use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, info};
use uuid::Uuid;

use common::PaginatedResponse;
use models::organization::{self, CreateOrganization, OrganizationWithStats, UpdateOrganization};
use models::{course, user};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Organization operations. Cheap to clone; the connection is a pool handle.
#[derive(Clone, Debug)]
pub struct OrganizationService {
    db: DatabaseConnection,
    analytics_enabled: bool,
}

impl OrganizationService {
    pub fn new(db: DatabaseConnection, analytics_enabled: bool) -> Self {
        Self { db, analytics_enabled }
    }

    /// Create an organization.
    pub async fn create(&self, input: &CreateOrganization) -> Result<organization::Model, ServiceError> {
        let created = organization::create(&self.db, input).await?;
        info!(organization_id = %created.id, name = %created.name, "organization created");
        Ok(created)
    }

    /// Get organization by id.
    pub async fn get(&self, id: Uuid) -> Result<organization::Model, ServiceError> {
        organization::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("organization"))
    }

    /// Apply a partial update. The patch is validated before the row is read.
    pub async fn update(&self, id: Uuid, patch: &UpdateOrganization) -> Result<organization::Model, ServiceError> {
        organization::validate_update(patch)?;
        let current = self.get(id).await?;
        let applied = organization::apply_update(current.clone(), patch)?;
        let saved = organization::save_update(&self.db, current, applied).await?;
        info!(organization_id = %saved.id, is_active = saved.is_active, "organization updated");
        Ok(saved)
    }

    /// One page of organizations, oldest first.
    pub async fn list(&self, pagination: Pagination) -> Result<PaginatedResponse<organization::Model>, ServiceError> {
        let (idx, per_page) = pagination.normalize();
        let paginator = organization::Entity::find()
            .order_by_asc(organization::Column::CreatedAt)
            .order_by_asc(organization::Column::Id)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(idx).await?;
        debug!(page = idx + 1, per_page, total, returned = items.len(), "organizations listed");
        Ok(PaginatedResponse::new(items, pagination.meta(total)?))
    }

    /// Organization with member and course counts. Counts are computed on
    /// every call; nothing is cached.
    pub async fn stats(&self, id: Uuid) -> Result<OrganizationWithStats, ServiceError> {
        if !self.analytics_enabled {
            return Err(ServiceError::FeatureDisabled("analytics".into()));
        }
        let org = self.get(id).await?;
        let user_count = user::Entity::find()
            .filter(user::Column::OrganizationId.eq(id))
            .count(&self.db)
            .await?;
        let course_count = course::Entity::find()
            .filter(course::Column::OrganizationId.eq(id))
            .count(&self.db)
            .await?;
        debug!(organization_id = %id, user_count, course_count, "organization stats computed");
        Ok(OrganizationWithStats { organization: org, user_count, course_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn disconnected(analytics: bool) -> OrganizationService {
        OrganizationService::new(DatabaseConnection::Disconnected, analytics)
    }

    #[tokio::test]
    async fn create_validates_before_touching_db() {
        let svc = disconnected(true);
        let err = svc
            .create(&CreateOrganization { name: String::new(), domain: Some("acme.com".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_validates_before_touching_db() {
        let svc = disconnected(true);
        let patch = UpdateOrganization { domain: Some("  ".into()), ..Default::default() };
        let err = svc.update(Uuid::new_v4(), &patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn stats_respects_feature_flag() {
        let svc = disconnected(false);
        let err = svc.stats(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::FeatureDisabled(_)));
    }

    #[tokio::test]
    async fn organization_service_crud() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let svc = OrganizationService::new(db.clone(), true);

        let name = format!("svc_org_{}", Uuid::new_v4());
        let org = svc
            .create(&CreateOrganization { name: name.clone(), domain: Some("svc.example.com".into()) })
            .await?;
        assert_eq!(org.name, name);

        let found = svc.get(org.id).await?;
        assert_eq!(found.id, org.id);

        let updated = svc
            .update(org.id, &UpdateOrganization { name: Some("new_name".into()), ..Default::default() })
            .await?;
        assert_eq!(updated.name, "new_name");
        assert!(updated.updated_at > updated.created_at);

        let missing = svc.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));

        organization::Entity::delete_by_id(org.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn stats_count_members() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let svc = OrganizationService::new(db.clone(), true);

        let org = svc
            .create(&CreateOrganization {
                name: format!("stats_org_{}", Uuid::new_v4()),
                domain: Some("stats.example.com".into()),
            })
            .await?;
        let mut authors = vec![];
        for i in 0..2 {
            let u = user::create(
                &db,
                &user::NewUser {
                    organization_id: org.id,
                    email: format!("stats_{i}_{}@example.com", Uuid::new_v4()),
                    role: "professor".into(),
                    ..Default::default()
                },
            )
            .await?;
            authors.push(u);
        }
        course::create(
            &db,
            &course::NewCourse {
                organization_id: org.id,
                created_by: authors[0].id,
                title: "Algebra".into(),
                description: None,
            },
        )
        .await?;

        let stats = svc.stats(org.id).await?;
        assert_eq!(stats.organization.id, org.id);
        assert_eq!(stats.user_count, 2);
        assert_eq!(stats.course_count, 1);

        organization::Entity::delete_by_id(org.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn list_reports_page_meta() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let svc = OrganizationService::new(db.clone(), true);

        let first = svc.list(Pagination { page: 1, per_page: 2 }).await?;
        let meta = *first.meta();
        assert_eq!(meta.per_page(), 2);
        assert_eq!(meta.pages(), meta.total().div_ceil(2));
        assert!(first.data().len() as u64 <= 2);
        Ok(())
    }
}
