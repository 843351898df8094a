use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::entity::{self, EntityBase};
use crate::errors::ModelError;
use crate::organization;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Organization,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Organization => Entity::belongs_to(organization::Entity)
                .from(Column::OrganizationId)
                .to(organization::Column::Id)
                .into(),
        }
    }
}

impl Related<organization::Entity> for Entity {
    fn to() -> RelationDef { Relation::Organization.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl EntityBase for Model {
    const TYPE_NAME: &'static str = "User";

    fn id(&self) -> Uuid { self.id }
    fn created_at(&self) -> DateTimeWithTimeZone { self.created_at }
    fn updated_at(&self) -> DateTimeWithTimeZone { self.updated_at }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub organization_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: String,
}

pub fn build(input: &NewUser) -> Result<Model, ModelError> {
    if !input.email.contains('@') || input.email.len() > 255 {
        return Err(ModelError::validation("invalid email"));
    }
    if input.role.trim().is_empty() || input.role.len() > 50 {
        return Err(ModelError::validation("role required (max 50 characters)"));
    }
    for name in [&input.first_name, &input.last_name].into_iter().flatten() {
        if name.chars().count() > 100 {
            return Err(ModelError::validation("names must be at most 100 characters"));
        }
    }
    let now = entity::now();
    Ok(Model {
        id: entity::new_id(),
        organization_id: input.organization_id,
        email: input.email.trim().to_lowercase(),
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        role: input.role.trim().to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

pub async fn create(db: &DatabaseConnection, input: &NewUser) -> Result<Model, ModelError> {
    let m = build(input)?;
    let am = ActiveModel {
        id: Set(m.id),
        organization_id: Set(m.organization_id),
        email: Set(m.email),
        first_name: Set(m.first_name),
        last_name: Set(m.last_name),
        role: Set(m.role),
        is_active: Set(m.is_active),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
