#![allow(dead_code)]

use semantic_domains::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub const SKY_GUID: &str = "999581c4-1611-4acb-ae1b-5e6c1dfe6f0c";
pub const PERSON_GUID: &str = "1bd42665-0610-4442-8d8d-7c666fee3a6d";

pub fn guid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn record(n: u128, code: &str, lang: &str, name: &str) -> DomainRecord {
    DomainRecord::new(
        guid(n),
        code.parse().unwrap(),
        [(lang, name)].into_iter().collect(),
    )
}

pub fn english(n: u128, code: &str, name: &str) -> DomainRecord {
    record(n, code, "en", name)
}

/// Sun / Moon fixture: the Moon's description mentions the sun.
pub fn sky_records() -> Vec<DomainRecord> {
    vec![
        english(1, "1", "Universe, creation"),
        english(2, "1.1", "Sky"),
        english(3, "1.1.1", "Sun").with_description("en", "Words related to the sun."),
        english(4, "1.1.1.1", "Moon")
            .with_description("en", "The moon shines with light reflected from the sun."),
        english(5, "1.1.1.2", "Star"),
        english(6, "2", "Person"),
    ]
}

pub fn build_index(records: Vec<DomainRecord>) -> HierarchyIndex {
    let store = DomainStore::load(records).unwrap();
    HierarchyIndex::build_from(Arc::new(store)).unwrap()
}

pub fn codes(nodes: &[&Node]) -> Vec<String> {
    nodes.iter().map(|n| n.code().to_string()).collect()
}

/// Renders records in the generated data-file shape for `lang`.
pub fn source_json(records: &[DomainRecord], lang: &str) -> Vec<u8> {
    let objects: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "guid": r.guid,
                "code": r.code.to_string(),
                "id": r.id,
                "abbr": r.abbr,
                "name": r.name,
                "description": r.description.get(lang).unwrap_or_default(),
                "value": r.value.get(lang).unwrap_or_default(),
            })
        })
        .collect();
    serde_json::to_vec(&objects).unwrap()
}

/// Path to a bundled sample data file, e.g. `fixture_path("en")`.
pub fn fixture_path(lang: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(format!("semdom.{}.json", lang))
}
