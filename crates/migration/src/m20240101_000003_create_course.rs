//! Create `course` table with FKs to `organization` and its creating `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(uuid(Course::Id).primary_key())
                    .col(uuid(Course::OrganizationId).not_null())
                    .col(uuid(Course::CreatedBy).not_null())
                    .col(string_len(Course::Title, 255).not_null())
                    .col(ColumnDef::new(Course::Description).text().null())
                    .col(boolean(Course::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(Course::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Course::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_organization")
                            .from(Course::Table, Course::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_created_by")
                            .from(Course::Table, Course::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Course::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Course { Table, Id, OrganizationId, CreatedBy, Title, Description, IsActive, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Organization { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
