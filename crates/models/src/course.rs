use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::entity::{self, EntityBase};
use crate::errors::ModelError;
use crate::{organization, user};

pub const TITLE_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Organization,
    Creator,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Organization => Entity::belongs_to(organization::Entity)
                .from(Column::OrganizationId)
                .to(organization::Column::Id)
                .into(),
            Relation::Creator => Entity::belongs_to(user::Entity)
                .from(Column::CreatedBy)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<organization::Entity> for Entity {
    fn to() -> RelationDef { Relation::Organization.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl EntityBase for Model {
    const TYPE_NAME: &'static str = "Course";

    fn id(&self) -> Uuid { self.id }
    fn created_at(&self) -> DateTimeWithTimeZone { self.created_at }
    fn updated_at(&self) -> DateTimeWithTimeZone { self.updated_at }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewCourse {
    pub organization_id: Uuid,
    pub created_by: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub fn build(input: &NewCourse) -> Result<Model, ModelError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ModelError::validation("title required"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ModelError::validation(format!("title must be at most {TITLE_MAX_LEN} characters")));
    }
    let now = entity::now();
    Ok(Model {
        id: entity::new_id(),
        organization_id: input.organization_id,
        created_by: input.created_by,
        title: title.to_string(),
        description: input.description.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

pub async fn create(db: &DatabaseConnection, input: &NewCourse) -> Result<Model, ModelError> {
    let m = build(input)?;
    let am = ActiveModel {
        id: Set(m.id),
        organization_id: Set(m.organization_id),
        created_by: Set(m.created_by),
        title: Set(m.title),
        description: Set(m.description),
        is_active: Set(m.is_active),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_name_matches_derived_collection_name() {
        assert_eq!(Model::collection_name(), Entity.table_name());
    }

    #[test]
    fn build_rejects_blank_title() {
        let r = build(&NewCourse { title: "  ".into(), ..Default::default() });
        assert!(matches!(r, Err(ModelError::Validation(_))));
    }
}
