//! Core domain entities representing the taxonomy data model.
//!
//! Entities are plain data structures; validation and indexing live in
//! [`crate::domain::store`], tree relationships in [`crate::domain::hierarchy`].
//!
//! # Entity Types
//!
//! - [`DomainRecord`] - One semantic domain, joined across languages
//! - [`DomainCode`] - Parsed dotted code that positions a record in the tree
//! - [`MultiString`] - Language-keyed text used for names, descriptions and values

pub mod code;
pub mod multi_string;
pub mod record;

pub use code::{CodeParseError, DomainCode};
pub use multi_string::{MergeConflict, MultiString};
pub use record::DomainRecord;
pub(crate) use record::default_predefined;
