//! Source over records that are already in memory.

use crate::domain::entities::DomainRecord;
use crate::domain::repositories::RecordSource;
use crate::error::TaxonomyError;
use async_trait::async_trait;

/// Serves a fixed record list, e.g. data compiled into the binary or built
/// by tests.
pub struct InMemorySource {
    language: String,
    records: Vec<DomainRecord>,
}

impl InMemorySource {
    pub fn new(language: impl Into<String>, records: Vec<DomainRecord>) -> Self {
        Self {
            language: language.into(),
            records,
        }
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    fn language(&self) -> String {
        self.language.clone()
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }

    async fn fetch(&self) -> Result<Vec<DomainRecord>, TaxonomyError> {
        Ok(self.records.clone())
    }
}
