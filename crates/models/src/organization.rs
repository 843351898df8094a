use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::entity::{self, EntityBase};
use crate::errors::ModelError;
use crate::{course, user};

pub const NAME_MAX_LEN: usize = 255;
pub const DOMAIN_MAX_LEN: usize = 255;

/// A tenant. Every user and course belongs to exactly one organization.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organization")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Course,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::has_many(user::Entity).into(),
            Relation::Course => Entity::has_many(course::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef { Relation::Course.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl EntityBase for Model {
    const TYPE_NAME: &'static str = "Organization";

    fn id(&self) -> Uuid { self.id }
    fn created_at(&self) -> DateTimeWithTimeZone { self.created_at }
    fn updated_at(&self) -> DateTimeWithTimeZone { self.updated_at }
}

/// Creation request. `domain` is optional on the wire so that a missing
/// value is reported as a field error rather than a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrganization {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateOrganization {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.domain.is_none() && self.is_active.is_none()
    }
}

/// Organization plus aggregate counts, computed at read time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationWithStats {
    #[serde(flatten)]
    pub organization: Model,
    pub user_count: u64,
    pub course_count: u64,
}

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("{field} required")));
    }
    if value.trim().chars().count() > max {
        return Err(ModelError::validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    validate_text("name", name, NAME_MAX_LEN)
}

pub fn validate_domain(domain: &str) -> Result<(), ModelError> {
    validate_text("domain", domain, DOMAIN_MAX_LEN)
}

pub fn validate_update(patch: &UpdateOrganization) -> Result<(), ModelError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(domain) = &patch.domain {
        validate_domain(domain)?;
    }
    Ok(())
}

/// Validate a creation request and build the entity without touching the
/// database. `created_at == updated_at` on the result.
pub fn build(input: &CreateOrganization) -> Result<Model, ModelError> {
    validate_name(&input.name)?;
    let domain = input.domain.as_deref().unwrap_or_default();
    validate_domain(domain)?;
    let now = entity::now();
    Ok(Model {
        id: entity::new_id(),
        name: input.name.trim().to_string(),
        domain: domain.trim().to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Apply a partial update in memory. An empty patch is not a mutation and
/// returns the model unchanged; otherwise `updated_at` moves strictly forward.
pub fn apply_update(mut model: Model, patch: &UpdateOrganization) -> Result<Model, ModelError> {
    validate_update(patch)?;
    if patch.is_empty() {
        return Ok(model);
    }
    if let Some(name) = &patch.name {
        model.name = name.trim().to_string();
    }
    if let Some(domain) = &patch.domain {
        model.domain = domain.trim().to_string();
    }
    if let Some(is_active) = patch.is_active {
        model.is_active = is_active;
    }
    model.updated_at = entity::refreshed_at(&model.updated_at);
    Ok(model)
}

pub async fn create(db: &DatabaseConnection, input: &CreateOrganization) -> Result<Model, ModelError> {
    let m = build(input)?;
    let am = ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        domain: Set(m.domain),
        is_active: Set(m.is_active),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Persist an already-applied update of `current` to `updated`.
pub async fn save_update(db: &DatabaseConnection, current: Model, updated: Model) -> Result<Model, ModelError> {
    if current == updated {
        return Ok(current);
    }
    let mut am: ActiveModel = current.into();
    am.name = Set(updated.name);
    am.domain = Set(updated.domain);
    am.is_active = Set(updated.is_active);
    am.updated_at = Set(updated.updated_at);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> CreateOrganization {
        CreateOrganization { name: "Acme".into(), domain: Some("acme.com".into()) }
    }

    #[test]
    fn table_name_matches_derived_collection_name() {
        assert_eq!(Model::collection_name(), Entity.table_name());
        assert_eq!(Model::collection_name(), "organization");
    }

    #[test]
    fn build_acme() {
        let org = build(&acme()).unwrap();
        assert!(!org.id.is_nil());
        assert!(org.is_active);
        assert_eq!(org.name, "Acme");
        assert_eq!(org.domain, "acme.com");
        assert_eq!(org.created_at, org.updated_at);
    }

    #[test]
    fn build_trims_input() {
        let org = build(&CreateOrganization { name: "  Acme ".into(), domain: Some(" acme.com".into()) }).unwrap();
        assert_eq!(org.name, "Acme");
        assert_eq!(org.domain, "acme.com");
    }

    #[test]
    fn build_rejects_bad_fields() {
        let blank = CreateOrganization { name: "   ".into(), domain: Some("acme.com".into()) };
        assert!(matches!(build(&blank), Err(ModelError::Validation(_))));

        let no_domain = CreateOrganization { name: "Acme".into(), domain: None };
        assert!(matches!(build(&no_domain), Err(ModelError::Validation(ref m)) if m.contains("domain")));

        let long = CreateOrganization { name: "x".repeat(256), domain: Some("acme.com".into()) };
        assert!(matches!(build(&long), Err(ModelError::Validation(_))));

        let at_limit = CreateOrganization { name: "x".repeat(255), domain: Some("d".repeat(255)) };
        assert!(build(&at_limit).is_ok());
    }

    #[test]
    fn update_moves_updated_at_forward() {
        let org = build(&acme()).unwrap();
        let patch = UpdateOrganization { is_active: Some(false), ..Default::default() };
        let updated = apply_update(org.clone(), &patch).unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.id, org.id);
        assert_eq!(updated.created_at, org.created_at);
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let org = build(&acme()).unwrap();
        let same = apply_update(org.clone(), &UpdateOrganization::default()).unwrap();
        assert_eq!(same, org);
    }

    #[test]
    fn update_validates_before_applying() {
        let org = build(&acme()).unwrap();
        let patch = UpdateOrganization { name: Some(String::new()), ..Default::default() };
        assert!(apply_update(org, &patch).is_err());
    }

    #[test]
    fn mapping_lists_each_field_once_in_order() {
        let org = build(&acme()).unwrap();
        let map = org.to_mapping().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name", "domain", "is_active", "created_at", "updated_at"]);
    }

    #[test]
    fn mapping_round_trip_is_identity() {
        let org = build(&acme()).unwrap();
        let map = org.to_mapping().unwrap();
        let back = Model::from_mapping(map.clone()).unwrap();
        assert_eq!(back, org);
        assert_eq!(back.to_mapping().unwrap(), map);
    }

    #[test]
    fn describe_names_type_and_id() {
        let org = build(&acme()).unwrap();
        assert_eq!(org.describe(), format!("<Organization(id={})>", org.id));
    }

    #[test]
    fn stats_flatten_organization_fields() {
        let org = build(&acme()).unwrap();
        let stats = OrganizationWithStats { organization: org.clone(), user_count: 3, course_count: 1 };
        let v = serde_json::to_value(&stats).unwrap();
        assert_eq!(v["name"], "Acme");
        assert_eq!(v["user_count"], 3);
        assert_eq!(v["course_count"], 1);
        assert!(v.get("organization").is_none());
    }
}
