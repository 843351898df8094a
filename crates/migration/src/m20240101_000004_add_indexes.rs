use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // User: index on organization_id (stats counts filter on it)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_organization")
                    .table(User::Table)
                    .col(User::OrganizationId)
                    .to_owned(),
            )
            .await?;

        // Course: index on organization_id and creator
        manager
            .create_index(
                Index::create()
                    .name("idx_course_organization")
                    .table(Course::Table)
                    .col(Course::OrganizationId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_course_created_by")
                    .table(Course::Table)
                    .col(Course::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // Organization: listing is ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_organization_created_at")
                    .table(Organization::Table)
                    .col(Organization::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_organization").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_course_organization").table(Course::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_course_created_by").table(Course::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_organization_created_at").table(Organization::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Organization { Table, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, OrganizationId }

#[derive(DeriveIden)]
enum Course { Table, OrganizationId, CreatedBy }
