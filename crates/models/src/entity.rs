//! Identity, audit and serialization contract shared by every persisted entity.
//!
//! Each entity declares a static `TYPE_NAME`; its collection (table) name is
//! derived from it by lower-casing. Ids are random v4 UUIDs generated at
//! construction, and `updated_at` never moves backwards relative to
//! `created_at`.

use chrono::{Duration, SubsecRound, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ModelError;

/// Storage name for an entity type: its declared name, lower-cased.
pub fn derive_collection_name(type_name: &str) -> String {
    type_name.to_lowercase()
}

/// Fresh 128-bit random identifier. Callers never supply ids.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Current time truncated to microseconds, the precision Postgres stores,
/// so a value survives a round trip through the database unchanged.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).into()
}

/// Timestamp for a mutation of a row last touched at `previous`.
/// Always strictly later than `previous`.
pub fn refreshed_at(previous: &DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    let candidate = now();
    if candidate > *previous {
        candidate
    } else {
        *previous + Duration::microseconds(1)
    }
}

pub trait EntityBase: Serialize + DeserializeOwned + Sized {
    /// Declared type name, e.g. `"Organization"`.
    const TYPE_NAME: &'static str;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTimeWithTimeZone;
    fn updated_at(&self) -> DateTimeWithTimeZone;

    fn collection_name() -> String {
        derive_collection_name(Self::TYPE_NAME)
    }

    /// Persisted fields as an ordered key/value mapping, in declaration order.
    fn to_mapping(&self) -> Result<Map<String, Value>, ModelError> {
        match serde_json::to_value(self).map_err(|e| ModelError::Mapping(e.to_string()))? {
            Value::Object(map) => Ok(map),
            other => Err(ModelError::Mapping(format!(
                "{} serialized to a non-object: {}",
                Self::TYPE_NAME,
                other
            ))),
        }
    }

    fn from_mapping(map: Map<String, Value>) -> Result<Self, ModelError> {
        serde_json::from_value(Value::Object(map)).map_err(|e| ModelError::Mapping(e.to_string()))
    }

    /// Short label for logs, e.g. `<Organization(id=...)>`.
    fn describe(&self) -> String {
        format!("<{}(id={})>", Self::TYPE_NAME, self.id())
    }
}
