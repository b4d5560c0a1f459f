//! Change planning.
//!
//! Pure diff between the fetched remote state and the desired record set.
//! No I/O happens here; the plan is data that the adapter executes.

use std::collections::BTreeMap;

use crate::fetch::FetchedRecord;
use crate::record::{CanonicalRecord, RecordType};

/// One planned mutation against the remote zone.
#[derive(Debug, Clone)]
pub enum Change {
    /// The record exists in the desired set only.
    Create(CanonicalRecord),
    /// The record exists on both sides but TTL or values differ.
    Update {
        /// Remote state, carrying the row ids to replace.
        existing: FetchedRecord,
        /// Desired state to write.
        desired: CanonicalRecord,
    },
    /// The record exists remotely only.
    Delete(FetchedRecord),
}

impl Change {
    /// The `(fqdn, type)` identity this change targets.
    #[must_use]
    pub fn key(&self) -> (&str, RecordType) {
        match self {
            Change::Create(desired) | Change::Update { desired, .. } => desired.key(),
            Change::Delete(existing) => existing.canonical.key(),
        }
    }

    /// Short verb for log lines.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Change::Create(_) => "create",
            Change::Update { .. } => "update",
            Change::Delete(_) => "delete",
        }
    }
}

/// Diff remote state against the desired record set.
///
/// Records are matched by `(fqdn, type)`. A matched pair produces an
/// update only when the TTL differs or the value sets differ; value
/// comparison ignores order, so a remote answer shuffle alone never
/// produces a change. The returned plan lists creates first, then
/// updates, then deletes, each phase sorted by key, so additions land
/// before removals and runs are reproducible.
#[must_use]
pub fn plan(existing: Vec<FetchedRecord>, desired: Vec<CanonicalRecord>) -> Vec<Change> {
    let mut remote: BTreeMap<(String, RecordType), FetchedRecord> = existing
        .into_iter()
        .map(|f| {
            let (fqdn, record_type) = f.canonical.key();
            ((fqdn.to_string(), record_type), f)
        })
        .collect();

    let mut creates: BTreeMap<(String, RecordType), Change> = BTreeMap::new();
    let mut updates: BTreeMap<(String, RecordType), Change> = BTreeMap::new();

    for record in desired {
        let (fqdn, record_type) = record.key();
        let key = (fqdn.to_string(), record_type);
        match remote.remove(&key) {
            None => {
                creates.insert(key, Change::Create(record));
            }
            Some(fetched) => {
                let same_ttl = fetched.canonical.ttl == record.ttl;
                if !(same_ttl && fetched.canonical.data.same_values(&record.data)) {
                    updates.insert(
                        key,
                        Change::Update {
                            existing: fetched,
                            desired: record,
                        },
                    );
                }
            }
        }
    }

    creates
        .into_values()
        .chain(updates.into_values())
        .chain(remote.into_values().map(Change::Delete))
        .collect()
}
