//! Hierarchy index: the taxonomy tree derived from dotted codes.
//!
//! The flat record list is parsed once into an arena of [`Node`]s kept in
//! code order. Because [`DomainCode`] orders numerically segment by segment,
//! code order is the pre-order walk of the tree: siblings appear by ascending
//! last segment and every subtree is a contiguous run of the arena.

use crate::domain::entities::{DomainCode, DomainRecord, MultiString};
use crate::domain::store::DomainStore;
use crate::error::TaxonomyError;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Result of a query that may legitimately find nothing.
///
/// The outer `Result` only fails for misuse of the index (querying before
/// [`HierarchyIndex::build`]); a code that does not exist is `Ok(None)`.
pub type Lookup<T> = Result<Option<T>, TaxonomyError>;

/// A record placed in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    record: Arc<DomainRecord>,
    depth: usize,
    parent: Option<usize>,
    children: Vec<usize>,
    pub(crate) folded_names: HashMap<String, String>,
    pub(crate) folded_descriptions: HashMap<String, String>,
}

impl Node {
    fn new(record: Arc<DomainRecord>) -> Self {
        let folded_names = fold(&record.name);
        let folded_descriptions = fold(&record.description);

        Self {
            depth: record.code.depth(),
            record,
            parent: None,
            children: Vec::new(),
            folded_names,
            folded_descriptions,
        }
    }

    pub fn record(&self) -> &DomainRecord {
        &self.record
    }

    pub fn code(&self) -> &DomainCode {
        &self.record.code
    }

    pub fn guid(&self) -> Uuid {
        self.record.guid
    }

    /// Segment count minus one; roots are at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent_code(&self) -> Option<DomainCode> {
        self.record.code.parent()
    }

    pub fn name(&self, language: &str) -> Option<&str> {
        self.record.name.get(language)
    }

    pub fn description(&self, language: &str) -> Option<&str> {
        self.record.description.get(language)
    }

    pub fn label(&self, language: &str, fallback: &str) -> String {
        self.record.label(language, fallback)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Lowercased copy of every entry, for case-insensitive matching.
fn fold(text: &MultiString) -> HashMap<String, String> {
    text.iter()
        .map(|(lang, text)| (lang.to_string(), text.to_lowercase()))
        .collect()
}

/// The built tree. Only reachable through [`HierarchyIndex`] in the `Built` state.
#[derive(Debug)]
pub(crate) struct Tree {
    store: Arc<DomainStore>,
    pub(crate) nodes: Vec<Node>,
    roots: Vec<usize>,
    by_code: HashMap<DomainCode, usize>,
    pub(crate) languages: BTreeSet<String>,
}

#[derive(Debug, Default)]
enum IndexState {
    #[default]
    Unbuilt,
    Built(Tree),
}

/// Navigable, searchable view of a [`DomainStore`].
///
/// The index starts `Unbuilt`; [`build`](Self::build) moves it to `Built`
/// exactly once. After that it is immutable and can be shared freely across
/// threads. To pick up a new record set, build a fresh index.
#[derive(Debug, Default)]
pub struct HierarchyIndex {
    state: IndexState,
}

impl HierarchyIndex {
    /// Creates an unbuilt index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index and builds it from `store` in one step.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_from(store: Arc<DomainStore>) -> Result<Self, TaxonomyError> {
        let mut index = Self::new();
        index.build(store)?;
        Ok(index)
    }

    /// Builds the tree from `store`.
    ///
    /// On failure the index stays `Unbuilt` and nothing partial is exposed.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::AlreadyBuilt`] if called twice.
    /// Returns [`TaxonomyError::OrphanNode`] if a non-root code's parent is not
    /// in the store.
    /// Returns [`TaxonomyError::Validation`] if the store holds the same code
    /// twice (only possible for stores built without validation).
    pub fn build(&mut self, store: Arc<DomainStore>) -> Result<(), TaxonomyError> {
        if matches!(self.state, IndexState::Built(_)) {
            return Err(TaxonomyError::AlreadyBuilt);
        }

        let started = Instant::now();
        let tree = Tree::build(store)?;

        tracing::info!(
            nodes = tree.nodes.len(),
            roots = tree.roots.len(),
            languages = ?tree.languages,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Hierarchy index built"
        );

        self.state = IndexState::Built(tree);
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, IndexState::Built(_))
    }

    pub(crate) fn tree(&self) -> Result<&Tree, TaxonomyError> {
        match &self.state {
            IndexState::Built(tree) => Ok(tree),
            IndexState::Unbuilt => Err(TaxonomyError::NotBuilt),
        }
    }

    /// The store this index was built from.
    pub fn store(&self) -> Result<&Arc<DomainStore>, TaxonomyError> {
        Ok(&self.tree()?.store)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> Result<usize, TaxonomyError> {
        Ok(self.tree()?.nodes.len())
    }

    pub fn is_empty(&self) -> Result<bool, TaxonomyError> {
        Ok(self.tree()?.nodes.is_empty())
    }

    /// Language tags that at least one node has a name in.
    pub fn languages(&self) -> Result<&BTreeSet<String>, TaxonomyError> {
        Ok(&self.tree()?.languages)
    }

    /// Top-level domains, numerically ordered.
    pub fn roots(&self) -> Result<Vec<&Node>, TaxonomyError> {
        let tree = self.tree()?;
        Ok(tree.collect(&tree.roots))
    }

    pub fn get(&self, code: &str) -> Lookup<&Node> {
        let tree = self.tree()?;
        Ok(tree.find(code).map(|i| &tree.nodes[i]))
    }

    /// Direct children of `code`, numerically ordered; empty for leaves.
    pub fn children(&self, code: &str) -> Lookup<Vec<&Node>> {
        let tree = self.tree()?;
        Ok(tree
            .find(code)
            .map(|i| tree.collect(&tree.nodes[i].children)))
    }

    /// From the immediate parent of `code` up to its root; empty for roots.
    pub fn ancestors(&self, code: &str) -> Lookup<Vec<&Node>> {
        let tree = self.tree()?;
        let Some(idx) = tree.find(code) else {
            return Ok(None);
        };

        let mut out = Vec::with_capacity(tree.nodes[idx].depth);
        let mut cursor = tree.nodes[idx].parent;
        while let Some(parent) = cursor {
            out.push(&tree.nodes[parent]);
            cursor = tree.nodes[parent].parent;
        }
        Ok(Some(out))
    }

    /// From the root down to and including `code`, for breadcrumbs.
    pub fn path(&self, code: &str) -> Lookup<Vec<&Node>> {
        let tree = self.tree()?;
        let Some(idx) = tree.find(code) else {
            return Ok(None);
        };

        let mut out = vec![&tree.nodes[idx]];
        let mut cursor = tree.nodes[idx].parent;
        while let Some(parent) = cursor {
            out.push(&tree.nodes[parent]);
            cursor = tree.nodes[parent].parent;
        }
        out.reverse();
        Ok(Some(out))
    }

    /// Every node below `code` in code order, excluding `code` itself.
    pub fn descendants(&self, code: &str) -> Lookup<Vec<&Node>> {
        let tree = self.tree()?;
        let Some(idx) = tree.find(code) else {
            return Ok(None);
        };

        let root = tree.nodes[idx].code();
        Ok(Some(
            tree.nodes[idx + 1..]
                .iter()
                .take_while(|n| root.is_ancestor_of(n.code()))
                .collect(),
        ))
    }

    /// Every node in code order (pre-order of the tree).
    pub fn iter(&self) -> Result<impl Iterator<Item = &Node> + Clone + '_, TaxonomyError> {
        Ok(self.tree()?.nodes.iter())
    }
}

impl Tree {
    fn build(store: Arc<DomainStore>) -> Result<Self, TaxonomyError> {
        let mut records: Vec<Arc<DomainRecord>> = store.shared_records().cloned().collect();
        records.sort_by(|a, b| a.code.cmp(&b.code));

        for pair in records.windows(2) {
            if pair[0].code == pair[1].code {
                return Err(TaxonomyError::validation(
                    "Duplicate code",
                    json!({ "code": pair[0].code.to_string() }),
                ));
            }
        }

        for record in &records {
            if let Some(parent) = record.code.parent()
                && store.get(&parent).is_none()
            {
                return Err(TaxonomyError::orphan(
                    format!("Parent of domain {} does not exist", record.code),
                    json!({ "code": record.code.to_string(), "parent": parent.to_string() }),
                ));
            }
        }

        let mut nodes: Vec<Node> = records.into_iter().map(Node::new).collect();
        let by_code: HashMap<DomainCode, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.code().clone(), i))
            .collect();

        // Arena is in code order, so pushing children in arena order already
        // sorts every sibling group by its numeric last segment.
        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            match nodes[i].parent_code() {
                None => roots.push(i),
                Some(parent_code) => {
                    let parent = by_code[&parent_code];
                    nodes[i].parent = Some(parent);
                    nodes[parent].children.push(i);
                }
            }
        }

        let languages = nodes
            .iter()
            .flat_map(|n| n.record.name.languages().map(str::to_string))
            .collect();

        Ok(Self {
            store,
            nodes,
            roots,
            by_code,
            languages,
        })
    }

    fn find(&self, code: &str) -> Option<usize> {
        let code: DomainCode = code.parse().ok()?;
        self.by_code.get(&code).copied()
    }

    fn collect(&self, indices: &[usize]) -> Vec<&Node> {
        indices.iter().map(|&i| &self.nodes[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(guid: u128, code: &str, name: &str) -> DomainRecord {
        DomainRecord::new(
            Uuid::from_u128(guid),
            code.parse().unwrap(),
            [("en", name)].into_iter().collect(),
        )
    }

    fn codes(nodes: &[&Node]) -> Vec<String> {
        nodes.iter().map(|n| n.code().to_string()).collect()
    }

    fn sample_index() -> HierarchyIndex {
        let store = DomainStore::load(vec![
            record(1, "1", "Universe, creation"),
            record(2, "1.10", "Ten"),
            record(3, "1.9", "Nine"),
            record(4, "1.2", "World"),
            record(5, "1.2.1", "Land"),
            record(6, "2", "Person"),
        ])
        .unwrap();
        HierarchyIndex::build_from(Arc::new(store)).unwrap()
    }

    #[test]
    fn test_queries_fail_before_build() {
        let index = HierarchyIndex::new();

        assert!(!index.is_built());
        assert!(matches!(index.roots(), Err(TaxonomyError::NotBuilt)));
        assert!(matches!(index.children("1"), Err(TaxonomyError::NotBuilt)));
        assert!(matches!(index.path("1"), Err(TaxonomyError::NotBuilt)));
    }

    #[test]
    fn test_build_twice_fails() {
        let store = Arc::new(DomainStore::load(vec![record(1, "1", "Universe")]).unwrap());
        let mut index = HierarchyIndex::new();

        index.build(store.clone()).unwrap();
        assert!(matches!(
            index.build(store),
            Err(TaxonomyError::AlreadyBuilt)
        ));
        assert!(index.is_built());
    }

    #[test]
    fn test_children_numeric_order() {
        let index = sample_index();
        let children = index.children("1").unwrap().unwrap();

        assert_eq!(codes(&children), vec!["1.2", "1.9", "1.10"]);
    }

    #[test]
    fn test_roots_and_depth() {
        let index = sample_index();
        let roots = index.roots().unwrap();

        assert_eq!(codes(&roots), vec!["1", "2"]);
        assert!(roots.iter().all(|n| n.depth() == 0 && n.is_root()));
        assert_eq!(index.get("1.2.1").unwrap().unwrap().depth(), 2);
    }

    #[test]
    fn test_leaf_has_empty_children() {
        let index = sample_index();
        assert!(index.children("1.2.1").unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_missing_code_is_not_found() {
        let index = sample_index();

        assert!(index.children("9").unwrap().is_none());
        assert!(index.path("1.2.7").unwrap().is_none());
        assert!(index.ancestors("garbage").unwrap().is_none());
    }

    #[test]
    fn test_ancestors_and_path() {
        let index = sample_index();

        let ancestors = index.ancestors("1.2.1").unwrap().unwrap();
        assert_eq!(codes(&ancestors), vec!["1.2", "1"]);

        let path = index.path("1.2.1").unwrap().unwrap();
        assert_eq!(codes(&path), vec!["1", "1.2", "1.2.1"]);

        assert!(index.ancestors("2").unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_descendants_are_contiguous_subtree() {
        let index = sample_index();

        let below = index.descendants("1").unwrap().unwrap();
        assert_eq!(codes(&below), vec!["1.2", "1.2.1", "1.9", "1.10"]);
        assert!(index.descendants("2").unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_orphan_fails_build() {
        let store = DomainStore::from_records_unchecked(vec![record(1, "2.1", "Body")]);
        let mut index = HierarchyIndex::new();

        let result = index.build(Arc::new(store));

        assert!(matches!(result, Err(TaxonomyError::OrphanNode { .. })));
        assert!(!index.is_built());
    }

    #[test]
    fn test_duplicate_code_fails_build() {
        let store = DomainStore::from_records_unchecked(vec![
            record(1, "1", "Universe"),
            record(2, "1", "Universe again"),
        ]);

        assert!(matches!(
            HierarchyIndex::build_from(Arc::new(store)),
            Err(TaxonomyError::Validation { .. })
        ));
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HierarchyIndex>();
    }
}
