//! The verb collection: load with seed fallback, merge, save.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::StoreError;
use crate::ids::IdAllocator;
use crate::model::{seed_verbs, VerbRecord};
use crate::slot::DurableSlot;

/// Slot key the collection snapshot is stored under.
pub const STORE_KEY: &str = "verbdrill-verbs";

/// Result of merging generated candidates into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Candidates admitted, in the order they now appear at the front of the store.
    pub accepted: Vec<VerbRecord>,
    /// Candidates whose base form was already present, or that lacked a form.
    pub rejected: usize,
}

impl MergeOutcome {
    /// `true` when nothing was admitted. A normal outcome, not a failure.
    pub fn nothing_new(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// The learner's verb collection.
///
/// Semantically a set keyed by case-folded `base`; the order only matters
/// for display (newest first). All mutation goes through [`VerbStore::merge`].
pub struct VerbStore {
    records: Vec<VerbRecord>,
    slot: Arc<dyn DurableSlot>,
    ids: Arc<dyn IdAllocator>,
}

impl VerbStore {
    /// Load the collection from `slot`, falling back to the seed set when the
    /// snapshot is absent, unreadable, or malformed.
    ///
    /// Records stored without an id get one now; it is persisted with the
    /// next save.
    pub fn load(slot: Arc<dyn DurableSlot>, ids: Arc<dyn IdAllocator>) -> Self {
        let mut records = load_records(slot.as_ref());
        for record in records.iter_mut().filter(|r| r.id.trim().is_empty()) {
            record.id = ids.allocate();
        }
        Self {
            records,
            slot,
            ids,
        }
    }

    /// Build a store over explicit records without touching the slot.
    ///
    /// Later duplicates of an earlier base are dropped.
    pub fn from_records(
        records: Vec<VerbRecord>,
        slot: Arc<dyn DurableSlot>,
        ids: Arc<dyn IdAllocator>,
    ) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| seen.insert(r.key()))
            .collect();
        Self {
            records,
            slot,
            ids,
        }
    }

    pub fn records(&self) -> &[VerbRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with this base form (any casing) is present.
    pub fn contains_base(&self, base: &str) -> bool {
        let key = base.to_lowercase();
        self.records.iter().any(|r| r.key() == key)
    }

    /// Write the full collection to the slot.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.records)?;
        self.slot
            .write(STORE_KEY, &json)
            .map_err(|source| StoreError::Write {
                key: STORE_KEY.to_string(),
                source,
            })
    }

    /// Admit candidates whose base form is not already present.
    ///
    /// Accepted candidates get an id if theirs is blank and are placed at the
    /// front of the collection, keeping their batch order. The store is saved
    /// when anything was accepted.
    pub fn merge(&mut self, candidates: Vec<VerbRecord>) -> Result<MergeOutcome, StoreError> {
        let mut seen: HashSet<String> = self.records.iter().map(VerbRecord::key).collect();
        let mut outcome = MergeOutcome::default();

        for mut candidate in candidates {
            if !candidate.has_forms() {
                tracing::debug!(base = %candidate.base, "rejecting candidate with blank forms");
                outcome.rejected += 1;
                continue;
            }
            if !seen.insert(candidate.key()) {
                outcome.rejected += 1;
                continue;
            }
            if candidate.id.trim().is_empty() {
                candidate.id = self.ids.allocate();
            }
            outcome.accepted.push(candidate);
        }

        if outcome.accepted.is_empty() {
            tracing::debug!(rejected = outcome.rejected, "merge admitted nothing new");
            return Ok(outcome);
        }

        let mut records = outcome.accepted.clone();
        records.append(&mut self.records);
        self.records = records;
        tracing::info!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected,
            total = self.records.len(),
            "merged verbs into collection"
        );

        self.save()?;
        Ok(outcome)
    }
}

/// Read the snapshot from `slot`, or the seed set if it cannot be used.
pub fn load_records(slot: &dyn DurableSlot) -> Vec<VerbRecord> {
    let content = match slot.read(STORE_KEY) {
        Ok(Some(content)) => content,
        Ok(None) => return seed_verbs(),
        Err(e) => {
            tracing::debug!("verb snapshot unreadable, using seed set: {e}");
            return seed_verbs();
        }
    };

    match parse_snapshot(&content) {
        Ok(records) => records,
        Err(reason) => {
            tracing::debug!("verb snapshot rejected, using seed set: {reason}");
            seed_verbs()
        }
    }
}

/// Parse and structurally validate a snapshot.
fn parse_snapshot(content: &str) -> Result<Vec<VerbRecord>, String> {
    let records: Vec<VerbRecord> =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

    let mut seen = HashSet::new();
    let mut seen_ids = HashSet::new();
    for record in &records {
        if !record.has_forms() {
            return Err(format!("record '{}' has blank forms", record.id));
        }
        if !seen.insert(record.key()) {
            return Err(format!("duplicate base form '{}'", record.base));
        }
        if !record.id.trim().is_empty() && !seen_ids.insert(record.id.as_str()) {
            return Err(format!("duplicate id '{}'", record.id));
        }
    }
    Ok(records)
}
