//! Taxonomy loading service.

use crate::domain::hierarchy::{HierarchyIndex, Lookup, Node};
use crate::domain::repositories::RecordSource;
use crate::domain::search::SearchResults;
use crate::domain::store::DomainStore;
use crate::error::TaxonomyError;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// An immutable store + index pair published to readers.
///
/// Snapshots are never modified after construction. A reload produces a new
/// snapshot; see [`crate::state::TaxonomyState`].
#[derive(Debug)]
pub struct Taxonomy {
    store: Arc<DomainStore>,
    index: HierarchyIndex,
    default_language: String,
    loaded_at: DateTime<Utc>,
    source_count: usize,
}

impl Taxonomy {
    /// Builds a snapshot directly from a store.
    ///
    /// # Errors
    ///
    /// Propagates [`HierarchyIndex::build`] failures.
    pub fn from_store(
        store: DomainStore,
        default_language: impl Into<String>,
    ) -> Result<Self, TaxonomyError> {
        Self::assemble(Arc::new(store), default_language.into(), 1)
    }

    fn assemble(
        store: Arc<DomainStore>,
        default_language: String,
        source_count: usize,
    ) -> Result<Self, TaxonomyError> {
        let index = HierarchyIndex::build_from(store.clone())?;
        Ok(Self {
            store,
            index,
            default_language,
            loaded_at: Utc::now(),
            source_count,
        })
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn source_count(&self) -> usize {
        self.source_count
    }

    /// Searches in `language`, retrying in the default language when no
    /// domain is named in `language`.
    ///
    /// The language actually used is available from
    /// [`SearchResults::language`].
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::UnknownLanguage`] only if the default language
    /// is unknown as well.
    pub fn search_with_fallback(
        &self,
        query: &str,
        language: &str,
    ) -> Result<SearchResults<'_>, TaxonomyError> {
        match self.index.search(query, language) {
            Err(e) if e.is_recoverable() && language != self.default_language => {
                tracing::debug!(
                    requested = language,
                    fallback = %self.default_language,
                    "Search language unknown, using default"
                );
                self.index.search(query, &self.default_language)
            }
            other => other,
        }
    }

    /// Resolves a persisted selection to its breadcrumb path.
    ///
    /// Returns `Ok(None)` if the guid no longer exists in this taxonomy.
    pub fn breadcrumb_for_guid(&self, guid: &Uuid) -> Lookup<Vec<&Node>> {
        let Some(record) = self.store.get_by_guid(guid) else {
            return Ok(None);
        };
        self.index.path(&record.code.to_string())
    }
}

/// Service that turns a set of per-language sources into a [`Taxonomy`].
///
/// Loading is all-or-nothing: any source, validation, merge or build failure
/// aborts the load and no snapshot is produced.
pub struct TaxonomyService {
    sources: Vec<Arc<dyn RecordSource>>,
    default_language: String,
}

impl TaxonomyService {
    /// Creates a new taxonomy service.
    pub fn new(sources: Vec<Arc<dyn RecordSource>>, default_language: impl Into<String>) -> Self {
        Self {
            sources,
            default_language: default_language.into(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Fetches every source, loads and merges the records, and builds the index.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Validation`] if no sources are configured or a
    /// source's records are invalid.
    /// Returns [`TaxonomyError::Source`] if a source cannot be read.
    /// Returns [`TaxonomyError::Conflict`] if sources disagree on a record.
    /// Returns [`TaxonomyError::OrphanNode`] if the tree cannot be built.
    pub async fn load_taxonomy(&self) -> Result<Taxonomy, TaxonomyError> {
        if self.sources.is_empty() {
            return Err(TaxonomyError::validation(
                "No record sources configured",
                json!({}),
            ));
        }

        let mut stores = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let origin = source.describe();
            let records = source.fetch().await.inspect_err(|e| {
                tracing::error!(source = %origin, error = %e, "Failed to fetch records");
            })?;

            let store = DomainStore::load(records).inspect_err(|e| {
                tracing::error!(source = %origin, error = %e, details = %e.to_info().details, "Invalid records");
            })?;

            tracing::info!(
                source = %origin,
                language = %source.language(),
                records = store.len(),
                "Loaded record source"
            );
            stores.push(store);
        }

        let store = DomainStore::merge(&stores)?;
        Taxonomy::assemble(
            Arc::new(store),
            self.default_language.clone(),
            self.sources.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DomainRecord;
    use crate::domain::repositories::MockRecordSource;

    fn record(guid: u128, code: &str, lang: &str, name: &str) -> DomainRecord {
        DomainRecord::new(
            Uuid::from_u128(guid),
            code.parse().unwrap(),
            [(lang, name)].into_iter().collect(),
        )
    }

    fn mock_source(language: &str, records: Vec<DomainRecord>) -> MockRecordSource {
        let mut source = MockRecordSource::new();
        source.expect_language().return_const(language.to_string());
        source
            .expect_describe()
            .return_const(format!("mock-{language}"));
        source
            .expect_fetch()
            .times(1)
            .returning(move || Ok(records.clone()));
        source
    }

    #[tokio::test]
    async fn test_load_taxonomy_merges_languages() {
        let en = mock_source(
            "en",
            vec![record(1, "1", "en", "Universe"), record(2, "1.1", "en", "Sky")],
        );
        let fr = mock_source(
            "fr",
            vec![record(1, "1", "fr", "Univers"), record(2, "1.1", "fr", "Ciel")],
        );

        let service = TaxonomyService::new(vec![Arc::new(en), Arc::new(fr)], "en");
        let taxonomy = service.load_taxonomy().await.unwrap();

        assert_eq!(taxonomy.source_count(), 2);
        assert_eq!(taxonomy.store().len(), 2);
        let sky = taxonomy.index().get("1.1").unwrap().unwrap();
        assert_eq!(sky.name("fr"), Some("Ciel"));
        assert_eq!(sky.name("en"), Some("Sky"));
    }

    #[tokio::test]
    async fn test_load_taxonomy_without_sources() {
        let service = TaxonomyService::new(Vec::new(), "en");
        let result = service.load_taxonomy().await;

        assert!(matches!(result, Err(TaxonomyError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_load_taxonomy_propagates_source_error() {
        let mut broken = MockRecordSource::new();
        broken.expect_describe().return_const("broken".to_string());
        broken.expect_language().return_const("en".to_string());
        broken
            .expect_fetch()
            .times(1)
            .returning(|| Err(TaxonomyError::source("unreadable", json!({}))));

        let service = TaxonomyService::new(vec![Arc::new(broken)], "en");
        let result = service.load_taxonomy().await;

        assert!(matches!(result, Err(TaxonomyError::Source { .. })));
    }

    #[tokio::test]
    async fn test_load_taxonomy_rejects_code_conflict() {
        let en = mock_source("en", vec![record(1, "1", "en", "Universe")]);
        let fr = mock_source("fr", vec![record(1, "2", "fr", "Personne")]);

        let service = TaxonomyService::new(vec![Arc::new(en), Arc::new(fr)], "en");
        let result = service.load_taxonomy().await;

        assert!(matches!(result, Err(TaxonomyError::Conflict { .. })));
    }

    #[test]
    fn test_search_with_fallback_uses_default_language() {
        let store = DomainStore::load(vec![record(1, "1", "en", "Sky")]).unwrap();
        let taxonomy = Taxonomy::from_store(store, "en").unwrap();

        let results = taxonomy.search_with_fallback("sky", "de").unwrap();
        assert_eq!(results.language(), "en");
        assert_eq!(results.count(), 1);
    }

    #[test]
    fn test_search_with_fallback_fails_when_default_unknown() {
        let store = DomainStore::load(vec![record(1, "1", "en", "Sky")]).unwrap();
        let taxonomy = Taxonomy::from_store(store, "es").unwrap();

        let result = taxonomy.search_with_fallback("sky", "de");
        assert!(matches!(result, Err(TaxonomyError::UnknownLanguage { .. })));
    }

    #[test]
    fn test_breadcrumb_for_guid() {
        let store = DomainStore::load(vec![
            record(1, "1", "en", "Universe"),
            record(2, "1.1", "en", "Sky"),
        ])
        .unwrap();
        let taxonomy = Taxonomy::from_store(store, "en").unwrap();

        let crumbs = taxonomy
            .breadcrumb_for_guid(&Uuid::from_u128(2))
            .unwrap()
            .unwrap();
        let labels: Vec<_> = crumbs.iter().map(|n| n.label("en", "en")).collect();
        assert_eq!(labels, vec!["1 Universe", "1.1 Sky"]);

        assert!(taxonomy
            .breadcrumb_for_guid(&Uuid::from_u128(99))
            .unwrap()
            .is_none());
    }
}
