use anyhow::Result;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::setup_test_db;
use crate::entity::EntityBase;
use crate::organization::{self, CreateOrganization, UpdateOrganization};
use crate::{course, user};

fn unique_org() -> CreateOrganization {
    let tag = Uuid::new_v4();
    CreateOrganization { name: format!("org_{tag}"), domain: Some(format!("{tag}.example.com")) }
}

/// Test organization create / read / update
#[tokio::test]
async fn test_organization_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let input = unique_org();
    let created = organization::create(&db, &input).await?;
    assert_eq!(created.name, input.name);
    assert!(created.is_active);
    assert_eq!(created.created_at, created.updated_at);

    let found = organization::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let by_name = organization::Entity::find()
        .filter(organization::Column::Name.eq(input.name.clone()))
        .one(&db)
        .await?;
    assert_eq!(by_name.map(|o| o.id), Some(created.id));

    let patch = UpdateOrganization { domain: Some("renamed.example.com".into()), ..Default::default() };
    let applied = organization::apply_update(created.clone(), &patch)?;
    let saved = organization::save_update(&db, created.clone(), applied).await?;
    assert_eq!(saved.domain, "renamed.example.com");
    assert_eq!(saved.created_at, created.created_at);
    assert!(saved.updated_at > saved.created_at);

    // the mapping of a row read back equals the mapping of what was saved
    let reread = organization::Entity::find_by_id(created.id).one(&db).await?.unwrap();
    assert_eq!(reread.to_mapping()?, saved.to_mapping()?);

    organization::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Users and courses hang off an organization and cascade with it
#[tokio::test]
async fn test_members_cascade_with_organization() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let org = organization::create(&db, &unique_org()).await?;
    let author = user::create(
        &db,
        &user::NewUser {
            organization_id: org.id,
            email: format!("author_{}@example.com", Uuid::new_v4()),
            role: "admin".into(),
            ..Default::default()
        },
    )
    .await?;
    let c = course::create(
        &db,
        &course::NewCourse {
            organization_id: org.id,
            created_by: author.id,
            title: "Intro".into(),
            description: Some("first course".into()),
        },
    )
    .await?;

    organization::Entity::delete_by_id(org.id).exec(&db).await?;
    assert!(user::Entity::find_by_id(author.id).one(&db).await?.is_none());
    assert!(course::Entity::find_by_id(c.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_db_error() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let org = organization::create(&db, &unique_org()).await?;
    let input = user::NewUser {
        organization_id: org.id,
        email: format!("dup_{}@example.com", Uuid::new_v4()),
        role: "student".into(),
        ..Default::default()
    };
    user::create(&db, &input).await?;
    let again = user::create(&db, &input).await;
    assert!(matches!(again, Err(crate::errors::ModelError::Db(_))));

    organization::Entity::delete_by_id(org.id).exec(&db).await?;
    Ok(())
}
