//! Business logic services for the application layer.

pub mod taxonomy_service;

pub use taxonomy_service::{Taxonomy, TaxonomyService};
