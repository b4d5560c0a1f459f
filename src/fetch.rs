//! Remote record fetch.
//!
//! Pages through the record listing of one zone and regroups the API's
//! one-row-per-answer representation into canonical records keyed by
//! `(entry, record_type)`. Grouping goes through an ordered map, so the
//! merged result is deterministic even if the API reorders rows between
//! pages; the value order inside one group stays arrival order.

use std::collections::BTreeMap;

use crate::api::AzionApi;
use crate::api::types::AzionRecord;
use crate::error::Result;
use crate::record::{CanonicalRecord, RecordType, canonical_from_group, parse_remote_type};

/// Fixed page size for record listing requests.
pub const RECORDS_PAGE_SIZE: u32 = 100;

/// A grouped remote record set: the canonical view plus the vendor row ids
/// needed to update or delete it later.
#[derive(Debug, Clone)]
pub struct FetchedRecord {
    /// Canonical form of the grouped rows.
    pub canonical: CanonicalRecord,
    /// Ids of the rows that make up the group, in arrival order.
    pub record_ids: Vec<u64>,
}

/// Fetch every record of a zone as grouped canonical records.
///
/// Record types the canonical model cannot express (vendor-internal kinds)
/// are logged and dropped — encountering them in a listing is not an
/// error. Rows of a supported type that fail to translate are likewise
/// logged and skipped, surfacing per record rather than aborting the run.
///
/// # Errors
///
/// Transport failures abort the whole fetch (a partial record set is
/// unsafe to diff against): [`SyncError::TransientFetch`](crate::SyncError::TransientFetch)
/// on network trouble, [`SyncError::ZoneNotFound`](crate::SyncError::ZoneNotFound)
/// if the zone id is stale, [`SyncError::MalformedResponse`](crate::SyncError::MalformedResponse)
/// on an unparseable envelope.
pub async fn fetch_records<A: AzionApi + ?Sized>(
    api: &A,
    zone_id: u64,
    zone_domain: &str,
) -> Result<Vec<FetchedRecord>> {
    let mut groups: BTreeMap<(String, RecordType), Vec<AzionRecord>> = BTreeMap::new();
    let mut page = 1;
    let mut rows_seen = 0_usize;

    loop {
        let response = api.list_records(zone_id, page, RECORDS_PAGE_SIZE).await?;
        let page_len = response.items.len();
        rows_seen += page_len;

        for row in response.items {
            let Ok(record_type) = parse_remote_type(&row.record_type) else {
                log::warn!(
                    "zone {zone_id}: skipping unsupported {} record '{}'",
                    row.record_type,
                    row.entry
                );
                continue;
            };
            // Some responses use "" for the apex where others use "@".
            // Entries compare case-insensitively, like zone names; keep
            // the key lowercase so a mixed-case remote entry matches the
            // desired fqdn instead of producing churn on every run.
            let entry = if row.entry.is_empty() {
                "@".to_string()
            } else {
                row.entry.to_ascii_lowercase()
            };
            groups.entry((entry, record_type)).or_default().push(row);
        }

        if !response.has_next || page_len < RECORDS_PAGE_SIZE as usize {
            break;
        }
        page += 1;
    }

    let mut fetched = Vec::with_capacity(groups.len());
    for ((entry, record_type), rows) in &groups {
        match canonical_from_group(entry, *record_type, zone_domain, rows) {
            Ok(canonical) => fetched.push(FetchedRecord {
                canonical,
                record_ids: rows.iter().map(|r| r.record_id).collect(),
            }),
            Err(e) => {
                log::warn!("zone {zone_id}: skipping record '{entry}' {record_type}: {e}");
            }
        }
    }

    log::debug!(
        "zone {zone_id}: fetched {rows_seen} rows into {} records over {page} page(s)",
        fetched.len()
    );
    Ok(fetched)
}
