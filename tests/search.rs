mod common;

use common::{build_index, codes, english, record};
use semantic_domains::prelude::*;

#[test]
fn test_name_hit_ranked_before_description_hit() {
    let index = build_index(common::sky_records());

    let hits: Vec<(String, MatchField)> = {
        let mut results = index.search("sun", "en").unwrap();
        std::iter::from_fn(|| results.next_hit())
            .map(|(n, field)| (n.code().to_string(), field))
            .collect()
    };

    assert_eq!(
        hits,
        vec![
            ("1.1.1".to_string(), MatchField::Name),
            ("1.1.1.1".to_string(), MatchField::Description),
        ]
    );
}

#[test]
fn test_no_match_is_empty_not_error() {
    let index = build_index(common::sky_records());

    let results = index.search("xyz123", "en").unwrap();
    assert_eq!(results.count(), 0);
}

#[test]
fn test_search_is_case_insensitive() {
    let index = build_index(common::sky_records());

    let hits: Vec<&Node> = index.search("  SKY ", "en").unwrap().collect();
    assert_eq!(codes(&hits), vec!["1.1"]);
}

#[test]
fn test_blank_query_yields_nothing() {
    let index = build_index(common::sky_records());

    assert_eq!(index.search("", "en").unwrap().count(), 0);
    assert_eq!(index.search("   ", "en").unwrap().count(), 0);
}

#[test]
fn test_unknown_language_is_an_error() {
    let index = build_index(common::sky_records());

    let err = index.search("sun", "de").unwrap_err();
    assert!(matches!(err, TaxonomyError::UnknownLanguage { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_only_nodes_named_in_language_are_searched() {
    let index = build_index(vec![
        english(1, "1", "Universe"),
        record(2, "2", "fr", "Personne"),
    ]);

    let hits: Vec<&Node> = index.search("per", "en").unwrap().collect();
    assert!(hits.is_empty());

    let hits: Vec<&Node> = index.search("per", "fr").unwrap().collect();
    assert_eq!(codes(&hits), vec!["2"]);
}

#[test]
fn test_results_can_be_restarted() {
    let index = build_index(common::sky_records());
    let mut results = index.search("s", "en").unwrap();

    let replay = results.clone();
    let first: Vec<&Node> = results.by_ref().collect();
    results.restart();
    let second: Vec<&Node> = results.collect();
    let cloned: Vec<&Node> = replay.collect();

    assert!(!first.is_empty());
    assert_eq!(codes(&first), codes(&second));
    assert_eq!(codes(&first), codes(&cloned));
}

#[test]
fn test_node_appears_once_even_if_both_fields_match() {
    let index = build_index(vec![
        english(1, "1", "Sun").with_description("en", "The sun is a star."),
    ]);

    let hits: Vec<&Node> = index.search("sun", "en").unwrap().collect();
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_leading_space_is_part_of_query() {
    let index = build_index(common::sky_records());

    let hits: Vec<&Node> = index.search(" sun", "en").unwrap().collect();
    assert_eq!(codes(&hits), vec!["1.1.1", "1.1.1.1"]);

    let mut results = index.search(" sun", "en").unwrap();
    assert_eq!(results.next_hit().unwrap().1, MatchField::Description);
}

#[test]
fn test_description_matched_in_search_language_only() {
    let index = build_index(vec![
        english(1, "1", "Universe").with_description("en", "The physical universe"),
        record(2, "2", "fr", "Personne").with_description("fr", "Un être humain"),
    ]);

    assert_eq!(index.search("humain", "en").unwrap().count(), 0);
    assert_eq!(index.search("physical", "fr").unwrap().count(), 0);

    let hits: Vec<&Node> = index.search("humain", "fr").unwrap().collect();
    assert_eq!(codes(&hits), vec!["2"]);
}
