//! Language-keyed text values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A map from language tag (e.g. `"en"`, `"fr"`) to text.
///
/// Keys are unique; iteration order is by language tag so that rendering and
/// comparisons are deterministic regardless of how the map was assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiString {
    values: BTreeMap<String, String>,
}

/// Two inputs carried different text for the same language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub language: String,
    pub existing: String,
    pub incoming: String,
}

impl MultiString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.values.get(language).map(String::as_str)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.values.contains_key(language)
    }

    /// Inserts or replaces the text for `language`.
    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.values.insert(language.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Adds every entry of `other` that is not already present.
    ///
    /// Identical entries are accepted, which makes the operation idempotent.
    /// A language present on both sides with different text is a conflict and
    /// leaves `self` untouched.
    pub fn merge(&mut self, other: &MultiString) -> Result<(), MergeConflict> {
        for (language, incoming) in &other.values {
            if let Some(existing) = self.values.get(language)
                && existing != incoming
            {
                return Err(MergeConflict {
                    language: language.clone(),
                    existing: existing.clone(),
                    incoming: incoming.clone(),
                });
            }
        }

        for (language, text) in &other.values {
            self.values
                .entry(language.clone())
                .or_insert_with(|| text.clone());
        }
        Ok(())
    }

    /// Text for `language`, else for `fallback`, else the first entry.
    pub fn best(&self, language: &str, fallback: &str) -> Option<&str> {
        self.get(language)
            .or_else(|| self.get(fallback))
            .or_else(|| self.values.values().next().map(String::as_str))
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for MultiString {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(l, t)| (l.into(), t.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_new_languages() {
        let mut name: MultiString = [("en", "Sky")].into_iter().collect();
        let french: MultiString = [("fr", "Ciel")].into_iter().collect();

        name.merge(&french).unwrap();

        assert_eq!(name.get("en"), Some("Sky"));
        assert_eq!(name.get("fr"), Some("Ciel"));
        assert_eq!(name.len(), 2);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut name: MultiString = [("en", "Sky")].into_iter().collect();
        let same = name.clone();

        name.merge(&same).unwrap();
        name.merge(&same).unwrap();

        assert_eq!(name, same);
    }

    #[test]
    fn test_merge_conflict_leaves_value_untouched() {
        let mut name: MultiString = [("en", "Sky")].into_iter().collect();
        let other: MultiString = [("en", "Heaven"), ("fr", "Ciel")].into_iter().collect();

        let conflict = name.merge(&other).unwrap_err();

        assert_eq!(conflict.language, "en");
        assert_eq!(conflict.existing, "Sky");
        assert_eq!(conflict.incoming, "Heaven");
        assert!(!name.contains("fr"));
    }

    #[test]
    fn test_best_falls_back() {
        let name: MultiString = [("fr", "Ciel"), ("en", "Sky")].into_iter().collect();

        assert_eq!(name.best("fr", "en"), Some("Ciel"));
        assert_eq!(name.best("de", "en"), Some("Sky"));
        assert_eq!(name.best("de", "es"), Some("Sky"));
        assert_eq!(MultiString::new().best("en", "en"), None);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let name: MultiString = [("en", "Sky")].into_iter().collect();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, r#"{"en":"Sky"}"#);

        let back: MultiString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}
