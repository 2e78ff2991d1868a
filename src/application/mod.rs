//! Application layer services orchestrating the domain layer.
//!
//! Services fetch records from sources, drive store validation and merging,
//! and build the hierarchy index into an immutable snapshot that the rest of
//! the application reads from.
//!
//! # Available Services
//!
//! - [`services::taxonomy_service::TaxonomyService`] - Source loading, merge and index build
//! - [`services::taxonomy_service::Taxonomy`] - Published store + index snapshot

pub mod services;
