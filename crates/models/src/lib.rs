//! Persisted entities and their shared contract.
//!
//! - [`entity::EntityBase`] gives every entity the same identity, audit
//!   timestamps, collection naming and mapping conversion.
//! - Each entity module pairs a sea-orm `Model` with pure `build` /
//!   validation functions and thin async persistence helpers.

pub mod errors;
pub mod entity;
pub mod db;
pub mod organization;
pub mod user;
pub mod course;

pub use entity::EntityBase;

#[cfg(test)]
mod tests;
