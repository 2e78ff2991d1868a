//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete ways to get taxonomy records into memory.
//!
//! # Modules
//!
//! - [`sources`] - Record sources (JSON data files and in-memory lists)

pub mod sources;
