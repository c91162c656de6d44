// Service exports
pub mod catalog;
pub mod interactions;
pub mod property_api;

pub use catalog::{CatalogCache, CatalogKey};
pub use interactions::{InteractionStore, InteractionStoreError};
pub use property_api::{PropertyApiClient, PropertyApiError};
