//! Domain layer: taxonomy entities, record store and hierarchy index.
//!
//! Everything here is synchronous and free of I/O. Records arrive already
//! parsed, either from a [`repositories::RecordSource`] or directly from the
//! caller.
//!
//! # Architecture
//!
//! - [`entities`] - Records, codes and language-keyed names
//! - [`store`] - Validated record collection indexed by guid, code and id
//! - [`hierarchy`] - Tree built from dotted codes, with navigation queries
//! - [`search`] - Name-then-description text search over the tree
//! - [`repositories`] - Source trait implemented by the infrastructure layer
//!
//! # Build Flow
//!
//! 1. Each language source is loaded into its own [`store::DomainStore`]
//! 2. Stores are joined by guid with [`store::DomainStore::merge`]
//! 3. [`hierarchy::HierarchyIndex::build`] derives the tree once
//! 4. Readers share the built index without locking

pub mod entities;
pub mod hierarchy;
pub mod repositories;
pub mod search;
pub mod store;
