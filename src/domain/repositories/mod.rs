//! Source trait definitions for the domain layer.
//!
//! The store and index never perform I/O. Getting records into memory is the
//! job of a [`RecordSource`], implemented in `crate::infrastructure::sources`.
//!
//! # Testing
//!
//! A `MockRecordSource` is generated via `mockall` for unit tests; see
//! `tests/taxonomy_service.rs` for integration usage with real sources.

pub mod record_source;

pub use record_source::RecordSource;

#[cfg(test)]
pub use record_source::MockRecordSource;
