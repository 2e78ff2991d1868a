//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any source is
//! read.
//!
//! ## Record Sources
//!
//! ```bash
//! # Language inferred from the `<stem>.<lang>.json` file name
//! export SEMDOM_SOURCES="data/semdom.en.json,data/semdom.fr.json"
//!
//! # Explicit language per file
//! export SEMDOM_SOURCES="en=/srv/taxonomy/english.json,fr=/srv/taxonomy/french.json"
//! ```
//!
//! ## Required Variables
//!
//! - `SEMDOM_SOURCES` - Comma-separated `lang=path` or `path` entries
//!
//! ## Optional Variables
//!
//! - `SEMDOM_DEFAULT_LANG` - Fallback language for names and search (default: `en`)
//! - `SEMDOM_SEARCH_LIMIT` - Maximum hits shown by the CLI (default: 25, range: 1-1000)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use crate::domain::repositories::RecordSource;
use crate::infrastructure::sources::{JsonFileSource, language_from_file_name};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

/// One configured per-language data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub language: String,
    pub path: PathBuf,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub sources: Vec<SourceSpec>,
    pub default_language: String,
    /// Maximum number of search hits the CLI prints.
    pub search_limit: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SEMDOM_SOURCES` is missing or malformed.
    pub fn from_env() -> Result<Self> {
        let raw_sources = env::var("SEMDOM_SOURCES").context("SEMDOM_SOURCES must be set")?;
        let sources = parse_sources(&raw_sources).context("Failed to parse SEMDOM_SOURCES")?;

        let default_language = env::var("SEMDOM_DEFAULT_LANG").unwrap_or_else(|_| "en".to_string());

        let search_limit = env::var("SEMDOM_SEARCH_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(25);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            sources,
            default_language,
            search_limit,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no sources are configured, or two sources share a path
    /// - `default_language` is empty
    /// - `search_limit` is outside 1-1000
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            anyhow::bail!("SEMDOM_SOURCES must list at least one file");
        }

        for (i, source) in self.sources.iter().enumerate() {
            if self.sources[..i].iter().any(|s| s.path == source.path) {
                anyhow::bail!(
                    "SEMDOM_SOURCES lists '{}' more than once",
                    source.path.display()
                );
            }
        }

        if self.default_language.trim().is_empty() {
            anyhow::bail!("SEMDOM_DEFAULT_LANG must not be empty");
        }

        if !(1..=1000).contains(&self.search_limit) {
            anyhow::bail!(
                "SEMDOM_SEARCH_LIMIT must be between 1 and 1000, got {}",
                self.search_limit
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Builds a JSON file source for every configured entry.
    pub fn record_sources(&self) -> Vec<Arc<dyn RecordSource>> {
        self.sources
            .iter()
            .map(|s| {
                Arc::new(JsonFileSource::new(s.path.clone(), s.language.clone()))
                    as Arc<dyn RecordSource>
            })
            .collect()
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        for source in &self.sources {
            tracing::info!("  Source [{}]: {}", source.language, source.path.display());
        }
        tracing::info!("  Default language: {}", self.default_language);
        tracing::info!("  Search limit: {}", self.search_limit);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses a comma-separated list of `lang=path` or `path` entries.
///
/// A bare path must be named `<stem>.<lang>.json`. Blank entries are skipped.
fn parse_sources(raw: &str) -> Result<Vec<SourceSpec>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((language, path)) => {
                let language = language.trim();
                let path = path.trim();
                if language.is_empty() || path.is_empty() {
                    anyhow::bail!("Invalid source entry '{}', expected 'lang=path'", entry);
                }
                Ok(SourceSpec {
                    language: language.to_string(),
                    path: PathBuf::from(path),
                })
            }
            None => {
                let path = PathBuf::from(entry);
                let language = language_from_file_name(&path).with_context(|| {
                    format!(
                        "Cannot infer language of '{}', use 'lang=path' or name it '<stem>.<lang>.json'",
                        entry
                    )
                })?;
                Ok(SourceSpec { language, path })
            }
        })
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in the binary).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
