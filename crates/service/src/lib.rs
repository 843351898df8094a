//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Services are constructed once and handed out through [`ServiceRegistry`].

pub mod errors;
pub mod pagination;
pub mod organization_service;
pub mod registry;
#[cfg(test)]
pub mod test_support;

pub use organization_service::OrganizationService;
pub use registry::ServiceRegistry;
