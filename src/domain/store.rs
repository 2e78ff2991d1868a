//! Domain record store: validated records indexed by every identity key.

use crate::domain::entities::{DomainCode, DomainRecord};
use crate::error::TaxonomyError;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Immutable collection of taxonomy records with O(1) lookup by `guid`,
/// `code` and `id`.
///
/// A store performs no I/O. Records come from a
/// [`RecordSource`](crate::domain::repositories::RecordSource) or any other
/// caller that already has them in memory.
#[derive(Debug, Clone, Default)]
pub struct DomainStore {
    records: Vec<Arc<DomainRecord>>,
    by_guid: HashMap<Uuid, usize>,
    by_code: HashMap<DomainCode, usize>,
    by_id: HashMap<String, usize>,
}

impl DomainStore {
    /// Validates `records` and builds the lookup maps.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Validation`] if:
    /// - a record has an empty `name`, `id` or `abbr`
    /// - a `guid`, `code` or `id` appears more than once
    /// - a non-root code's parent code is not present
    pub fn load(records: Vec<DomainRecord>) -> Result<Self, TaxonomyError> {
        for record in &records {
            record.validate().map_err(|e| {
                TaxonomyError::validation(
                    "Record failed shape validation",
                    json!({
                        "guid": record.guid,
                        "code": record.code.to_string(),
                        "errors": e.to_string(),
                    }),
                )
            })?;
        }

        let store = Self::index(records)?;

        for record in &store.records {
            if let Some(parent) = record.code.parent()
                && !store.by_code.contains_key(&parent)
            {
                return Err(TaxonomyError::validation(
                    "Parent code does not exist",
                    json!({ "code": record.code.to_string(), "parent": parent.to_string() }),
                ));
            }
        }

        tracing::debug!(records = store.len(), "Domain store loaded");
        Ok(store)
    }

    /// Builds the lookup maps without any validation.
    ///
    /// When keys collide, later records win in the maps while every record is
    /// still returned by [`all`](Self::all).
    pub fn from_records_unchecked(records: Vec<DomainRecord>) -> Self {
        let mut store = Self::default();
        for record in sorted(records) {
            let idx = store.records.len();
            store.by_guid.insert(record.guid, idx);
            store.by_code.insert(record.code.clone(), idx);
            store.by_id.insert(record.id.clone(), idx);
            store.records.push(Arc::new(record));
        }
        store
    }

    /// Combines per-language stores into one multilingual store.
    ///
    /// Records sharing a `guid` are joined: their `name`, `description` and
    /// `value` maps are unioned. A merged record is predefined only if every
    /// input is. The result does not depend on the order of `stores`, and
    /// merging a store with itself changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Conflict`] if two stores disagree on the
    /// `code`, `id` or `abbr` of a guid, or give different text for the same
    /// language in one of the maps.
    /// Returns [`TaxonomyError::Validation`] if the merged set breaks a
    /// [`load`](Self::load) invariant, e.g. two guids now share a code.
    pub fn merge(stores: &[DomainStore]) -> Result<Self, TaxonomyError> {
        let mut merged: Vec<DomainRecord> = Vec::new();
        let mut positions: HashMap<Uuid, usize> = HashMap::new();

        for store in stores {
            for record in store.all() {
                let Some(&pos) = positions.get(&record.guid) else {
                    positions.insert(record.guid, merged.len());
                    merged.push(record.clone());
                    continue;
                };
                join(&mut merged[pos], record)?;
            }
        }

        let store = Self::load(merged)?;
        tracing::info!(
            sources = stores.len(),
            records = store.len(),
            languages = ?store.languages(),
            "Merged domain stores"
        );
        Ok(store)
    }

    pub fn get_by_guid(&self, guid: &Uuid) -> Option<&DomainRecord> {
        self.by_guid.get(guid).map(|&i| &*self.records[i])
    }

    /// Looks up a record by its dotted code. Malformed codes are simply not found.
    pub fn get_by_code(&self, code: &str) -> Option<&DomainRecord> {
        let code: DomainCode = code.parse().ok()?;
        self.get(&code)
    }

    pub fn get(&self, code: &DomainCode) -> Option<&DomainRecord> {
        self.by_code.get(code).map(|&i| &*self.records[i])
    }

    pub fn get_by_id(&self, id: &str) -> Option<&DomainRecord> {
        self.by_id.get(id).map(|&i| &*self.records[i])
    }

    /// Every record, in no guaranteed order. Call again to restart.
    pub fn all(&self) -> impl Iterator<Item = &DomainRecord> + Clone + '_ {
        self.records.iter().map(|r| &**r)
    }

    pub(crate) fn shared_records(&self) -> impl Iterator<Item = &Arc<DomainRecord>> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Language tags present in at least one record name.
    pub fn languages(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|r| r.name.languages().map(str::to_string))
            .collect()
    }

    fn index(records: Vec<DomainRecord>) -> Result<Self, TaxonomyError> {
        let mut store = Self::default();

        for record in sorted(records) {
            let idx = store.records.len();

            if store.by_guid.insert(record.guid, idx).is_some() {
                return Err(TaxonomyError::validation(
                    "Duplicate guid",
                    json!({ "guid": record.guid, "code": record.code.to_string() }),
                ));
            }
            if store.by_code.insert(record.code.clone(), idx).is_some() {
                return Err(TaxonomyError::validation(
                    "Duplicate code",
                    json!({ "code": record.code.to_string() }),
                ));
            }
            if store.by_id.insert(record.id.clone(), idx).is_some() {
                return Err(TaxonomyError::validation(
                    "Duplicate id",
                    json!({ "id": record.id, "code": record.code.to_string() }),
                ));
            }

            store.records.push(Arc::new(record));
        }

        Ok(store)
    }
}

/// Folds `record` into `target`, which carries the same guid.
fn join(target: &mut DomainRecord, record: &DomainRecord) -> Result<(), TaxonomyError> {
    let keys = [
        ("code", target.code.to_string(), record.code.to_string()),
        ("id", target.id.clone(), record.id.clone()),
        ("abbr", target.abbr.clone(), record.abbr.clone()),
    ];
    for (field, existing, incoming) in keys {
        if existing != incoming {
            return Err(TaxonomyError::conflict(
                format!("Sources disagree on {} for the same guid", field),
                json!({ "guid": record.guid, "field": field, "values": [existing, incoming] }),
            ));
        }
    }

    let fields = [
        ("name", &mut target.name, &record.name),
        ("description", &mut target.description, &record.description),
        ("value", &mut target.value, &record.value),
    ];
    for (field, into, from) in fields {
        into.merge(from).map_err(|c| {
            TaxonomyError::conflict(
                format!("Sources disagree on {} for the same language", field),
                json!({
                    "guid": record.guid,
                    "field": field,
                    "language": c.language,
                    "values": [c.existing, c.incoming],
                }),
            )
        })?;
    }

    target.predefined &= record.predefined;
    Ok(())
}

/// Orders records by code so that map contents and error reports do not
/// depend on input order.
fn sorted(mut records: Vec<DomainRecord>) -> Vec<DomainRecord> {
    records.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.guid.cmp(&b.guid)));
    records
}
