//! Record sources feeding the domain store.
//!
//! Provides two [`RecordSource`](crate::domain::repositories::RecordSource)
//! implementations:
//! - [`JsonFileSource`] - Generated per-language JSON data files of [`SourceRecord`]s
//! - [`InMemorySource`] - Pre-materialized records (embedding, tests)

mod in_memory_source;
mod json_file_source;
mod source_record;

pub use in_memory_source::InMemorySource;
pub use json_file_source::{JsonFileSource, language_from_file_name};
pub use source_record::SourceRecord;
