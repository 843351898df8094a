//! Create `user` table with FK to `organization`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(uuid(User::OrganizationId).not_null())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(ColumnDef::new(User::FirstName).string_len(100).null())
                    .col(ColumnDef::new(User::LastName).string_len(100).null())
                    .col(string_len(User::Role, 50).not_null())
                    .col(boolean(User::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_organization")
                            .from(User::Table, User::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Id, OrganizationId, Email, FirstName, LastName, Role, IsActive, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Organization { Table, Id }
