//! Semantic domain record, the atomic entity of the taxonomy.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::code::DomainCode;
use super::multi_string::MultiString;

/// One semantic domain, joined across every loaded language.
///
/// `guid` is the stable identity and survives renumbering of `code`. `id`
/// mirrors `code` in the shipped data but is kept separate because tooling
/// may let them diverge; nothing in this crate assumes they are equal.
///
/// A generated data file carries `description` and `value` as plain strings
/// in its own language; they are keyed by that language when the file is
/// read, so a merged record holds one entry per language for each.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DomainRecord {
    pub guid: Uuid,

    #[serde_as(as = "DisplayFromStr")]
    pub code: DomainCode,

    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,

    #[validate(length(min = 1, message = "abbr must not be empty"))]
    pub abbr: String,

    #[validate(custom(function = "validate_name"))]
    pub name: MultiString,

    /// Usage guidance per language. Languages without guidance have no entry.
    pub description: MultiString,

    /// Precomputed `"<code> <name>"` per language for direct rendering.
    pub value: MultiString,

    /// Shipped with the standard taxonomy, as opposed to a project-local addition.
    #[serde(default = "default_predefined")]
    pub predefined: bool,
}

pub(crate) fn default_predefined() -> bool {
    true
}

fn validate_name(name: &MultiString) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("empty_name")
            .with_message("name must contain at least one language".into()));
    }
    Ok(())
}

impl DomainRecord {
    /// Creates a record whose `id` and `abbr` mirror `code`, as in the
    /// generated data files. `value` gets one entry per name.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let sky = DomainRecord::new(
    ///     Uuid::parse_str("999581c4-1611-4acb-ae1b-5e6c1dfe6f0c")?,
    ///     "1.1".parse()?,
    ///     [("en", "Sky")].into_iter().collect(),
    /// );
    /// assert_eq!(sky.value.get("en"), Some("1.1 Sky"));
    /// ```
    pub fn new(guid: Uuid, code: DomainCode, name: MultiString) -> Self {
        let code_str = code.to_string();
        let value = name
            .iter()
            .map(|(lang, text)| (lang, format!("{} {}", code_str, text)))
            .collect();

        Self {
            guid,
            id: code_str.clone(),
            abbr: code_str,
            code,
            name,
            description: MultiString::new(),
            value,
            predefined: true,
        }
    }

    pub fn with_description(
        mut self,
        language: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.description.insert(language, description);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_predefined(mut self, predefined: bool) -> Self {
        self.predefined = predefined;
        self
    }

    /// Localized `"<abbr> <name>"` label, falling back to `fallback` and then
    /// to any available language.
    pub fn label(&self, language: &str, fallback: &str) -> String {
        match self.name.best(language, fallback) {
            Some(name) => format!("{} {}", self.abbr, name),
            None => self.abbr.clone(),
        }
    }
}
