//! Case-insensitive text search over a built [`HierarchyIndex`].

use crate::domain::hierarchy::{HierarchyIndex, Node};
use crate::error::TaxonomyError;
use serde_json::json;

/// Which field a hit was found in. Name hits always precede description hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Name,
    Description,
}

/// Lazy sequence of search hits.
///
/// Nodes whose localized name contains the query come first, then nodes whose
/// description in the same language contains it; each group is in ascending code order and a node
/// appears at most once. Only nodes that have a name in the requested
/// language are considered. Clone the value, or call
/// [`restart`](Self::restart), to walk the results again.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    nodes: &'a [Node],
    query: String,
    language: String,
    phase: Option<MatchField>,
    pos: usize,
}

impl<'a> SearchResults<'a> {
    fn new(nodes: &'a [Node], query: String, language: String) -> Self {
        let phase = if query.is_empty() {
            None
        } else {
            Some(MatchField::Name)
        };
        Self {
            nodes,
            query,
            language,
            phase,
            pos: 0,
        }
    }

    /// Language whose names are being searched.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Rewinds to the first hit.
    pub fn restart(&mut self) {
        self.pos = 0;
        if !self.query.is_empty() {
            self.phase = Some(MatchField::Name);
        }
    }

    /// Like [`Iterator::next`], but also reports which field matched.
    pub fn next_hit(&mut self) -> Option<(&'a Node, MatchField)> {
        loop {
            let phase = self.phase?;

            let nodes = self.nodes;
            let Some(node) = nodes.get(self.pos) else {
                self.pos = 0;
                self.phase = match phase {
                    MatchField::Name => Some(MatchField::Description),
                    MatchField::Description => None,
                };
                continue;
            };
            self.pos += 1;

            let Some(name) = node.folded_names.get(&self.language) else {
                continue;
            };
            let name_hit = name.contains(&self.query);

            let hit = match phase {
                MatchField::Name => name_hit,
                MatchField::Description => {
                    !name_hit
                        && node
                            .folded_descriptions
                            .get(&self.language)
                            .is_some_and(|d| d.contains(&self.query))
                }
            };
            if hit {
                return Some((node, phase));
            }
        }
    }
}

impl<'a> Iterator for SearchResults<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_hit().map(|(node, _)| node)
    }
}

impl HierarchyIndex {
    /// Searches names in `language`, then descriptions, for `query`.
    ///
    /// Matching is a case-insensitive substring test of the query as given,
    /// surrounding spaces included. Descriptions are only matched in
    /// `language`. A blank query yields no hits.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::NotBuilt`] before [`build`](Self::build).
    /// Returns [`TaxonomyError::UnknownLanguage`] if no node has a name in
    /// `language`.
    pub fn search(&self, query: &str, language: &str) -> Result<SearchResults<'_>, TaxonomyError> {
        let tree = self.tree()?;

        if !tree.languages.contains(language) {
            return Err(TaxonomyError::unknown_language(
                format!("No domain has a name in language '{}'", language),
                json!({ "language": language, "available": tree.languages }),
            ));
        }

        let folded = if query.trim().is_empty() {
            String::new()
        } else {
            query.to_lowercase()
        };
        tracing::trace!(query = %folded, language, "Searching domains");

        Ok(SearchResults::new(
            &tree.nodes,
            folded,
            language.to_string(),
        ))
    }
}
