//! Record shape of a generated per-language data file.

use crate::domain::entities::{DomainCode, DomainRecord, MultiString};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use uuid::Uuid;

/// One object of a generated data file.
///
/// Every field except `predefined` must be present. `description` and
/// `value` are written in the file's language only.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub guid: Uuid,

    #[serde_as(as = "DisplayFromStr")]
    pub code: DomainCode,

    pub id: String,
    pub abbr: String,
    pub name: MultiString,
    pub description: String,
    pub value: String,

    #[serde(default = "crate::domain::entities::default_predefined")]
    pub predefined: bool,
}

impl SourceRecord {
    /// Converts into a [`DomainRecord`], keying `description` and `value`
    /// by `language`. Empty strings leave no entry.
    pub fn into_record(self, language: &str) -> DomainRecord {
        let keyed = |text: String| -> MultiString {
            if text.is_empty() {
                MultiString::new()
            } else {
                [(language, text)].into_iter().collect()
            }
        };

        DomainRecord {
            guid: self.guid,
            code: self.code,
            id: self.id,
            abbr: self.abbr,
            name: self.name,
            description: keyed(self.description),
            value: keyed(self.value),
            predefined: self.predefined,
        }
    }
}
