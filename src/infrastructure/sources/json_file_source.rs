//! Source reading a generated JSON data file.

use super::SourceRecord;
use crate::domain::entities::DomainRecord;
use crate::domain::repositories::RecordSource;
use crate::error::TaxonomyError;
use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Reads a JSON array of records from disk.
///
/// The file holds one [`SourceRecord`] per semantic domain. Its plain-string
/// `description` and `value` are keyed by the source language.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    language: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
        }
    }

    /// Creates a source whose language is taken from a `<stem>.<lang>.json`
    /// file name, e.g. `semdom.fr.json`.
    ///
    /// Returns `None` if the file name does not follow that pattern.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let language = language_from_file_name(&path)?;
        Some(Self { path, language })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Extracts `fr` from `semdom.fr.json`.
pub fn language_from_file_name(path: &Path) -> Option<String> {
    if path.extension()? != "json" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (_, language) = stem.rsplit_once('.')?;

    if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some(language.to_string())
}

#[async_trait]
impl RecordSource for JsonFileSource {
    fn language(&self) -> String {
        self.language.clone()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<DomainRecord>, TaxonomyError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            TaxonomyError::source(
                "Failed to read record source",
                json!({ "path": self.describe(), "error": e.to_string() }),
            )
        })?;

        let raw: Vec<SourceRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            TaxonomyError::source(
                "Failed to parse record source",
                json!({
                    "path": self.describe(),
                    "line": e.line(),
                    "column": e.column(),
                    "error": e.to_string(),
                }),
            )
        })?;

        let records: Vec<DomainRecord> = raw
            .into_iter()
            .map(|r| r.into_record(&self.language))
            .collect();

        let missing = records
            .iter()
            .filter(|r| !r.name.contains(&self.language))
            .count();
        if missing > 0 {
            tracing::warn!(
                path = %self.path.display(),
                language = %self.language,
                missing,
                "Records without a name in the source language"
            );
        }

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Record source read"
        );
        Ok(records)
    }
}
