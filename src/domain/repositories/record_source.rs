//! Source trait for per-language record files.

use crate::domain::entities::DomainRecord;
use crate::error::TaxonomyError;
use async_trait::async_trait;

/// Supplies the records of one generated data file.
///
/// Each source covers a single language: its records carry names (and
/// descriptions) in that language only. Several sources are merged by `guid`
/// to form the multilingual taxonomy.
///
/// # Implementations
///
/// - [`crate::infrastructure::sources::JsonFileSource`] - JSON array on disk
/// - [`crate::infrastructure::sources::InMemorySource`] - records already in memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Language tag of the names this source provides (e.g. `"en"`).
    fn language(&self) -> String;

    /// Human-readable origin, used in logs and error details.
    fn describe(&self) -> String;

    /// Reads every record of the source.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Source`] if the data cannot be read or parsed.
    async fn fetch(&self) -> Result<Vec<DomainRecord>, TaxonomyError>;
}
