//! # Semantic Domains
//!
//! A hierarchical index over semantic-domain taxonomy records (a Dewey-like
//! classification of word meanings such as "1.2.3 Substance, matter"), used by
//! dictionary tools to browse, assign and search semantic categories.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Records, the validated record store and the hierarchy index
//! - **Application Layer** ([`application`]) - Loading sources into an immutable taxonomy snapshot
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON file and in-memory record sources
//! - **State** ([`state`]) - Swap-on-reload handle shared by readers
//!
//! ## Features
//!
//! - Tree reconstruction from flat dotted codes with numeric sibling order
//! - Stable identity by guid across renumbering and language files
//! - Multilingual names merged from per-language sources
//! - Name-then-description search per language
//!
//! ## Quick Start
//!
//! ```bash
//! export SEMDOM_SOURCES="data/semdom.en.json,data/semdom.fr.json"
//!
//! cargo run -- tree --depth 1
//! cargo run -- search sun --lang en
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod telemetry;

pub use error::TaxonomyError;
pub use state::TaxonomyState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Taxonomy, TaxonomyService};
    pub use crate::domain::entities::{DomainCode, DomainRecord, MultiString};
    pub use crate::domain::hierarchy::{HierarchyIndex, Lookup, Node};
    pub use crate::domain::repositories::RecordSource;
    pub use crate::domain::search::{MatchField, SearchResults};
    pub use crate::domain::store::DomainStore;
    pub use crate::error::TaxonomyError;
    pub use crate::state::TaxonomyState;
}
