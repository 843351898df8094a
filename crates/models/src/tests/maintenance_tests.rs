use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::setup_test_db;
use crate::db;

async fn public_table_count(conn: &sea_orm::DatabaseConnection) -> Result<i64> {
    let row = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*)::bigint AS n FROM pg_tables WHERE schemaname = 'public'",
        ))
        .await?
        .ok_or_else(|| anyhow::anyhow!("no row"))?;
    Ok(row.try_get("", "n")?)
}

/// Destructive: only runs when explicitly allowed.
#[tokio::test]
async fn test_drop_all_tables_then_migrate() -> Result<()> {
    if std::env::var("ALLOW_DESTRUCTIVE_DB_TESTS").is_err() {
        return Ok(());
    }
    let Some(conn) = setup_test_db().await else { return Ok(()) };
    assert!(public_table_count(&conn).await? > 0);

    db::drop_all_tables(&conn).await?;
    assert_eq!(public_table_count(&conn).await?, 0);

    migration::Migrator::up(&conn, None).await?;
    assert!(public_table_count(&conn).await? >= 3);
    Ok(())
}
