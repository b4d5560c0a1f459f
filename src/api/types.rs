//! Azion Intelligent DNS wire types.
//!
//! Shapes follow API version 3. List endpoints wrap their payload in a
//! `{count, links, results}` envelope; the record listing nests one level
//! deeper (`results.records`). One record row carries one or more answers
//! for a single `(entry, record_type)` pair; the API accepts a single
//! answer per create/update call.

use serde::{Deserialize, Serialize};

/// Pagination links in a list envelope. A present `next` means more pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// URL of the next page, if any.
    pub next: Option<String>,
}

/// Envelope of `GET /intelligent_dns`.
#[derive(Debug, Deserialize)]
pub struct ZoneListResponse {
    /// Total number of zones.
    #[serde(default)]
    pub count: u64,
    /// Pagination links.
    #[serde(default)]
    pub links: PageLinks,
    /// Zones in this page.
    pub results: Vec<AzionZone>,
}

/// Envelope of single-zone responses (`GET`/`POST /intelligent_dns/{id}`).
#[derive(Debug, Deserialize)]
pub struct ZoneResponse {
    /// The zone payload.
    pub results: AzionZone,
}

/// Envelope of `GET /intelligent_dns/{zone_id}/records`.
#[derive(Debug, Deserialize)]
pub struct RecordListResponse {
    /// Total number of record rows.
    #[serde(default)]
    pub count: u64,
    /// Pagination links.
    #[serde(default)]
    pub links: PageLinks,
    /// Record rows in this page.
    pub results: RecordListResults,
}

/// Inner payload of the record listing envelope.
#[derive(Debug, Deserialize)]
pub struct RecordListResults {
    /// Record rows.
    pub records: Vec<AzionRecord>,
}

/// Envelope of single-record responses (create/update).
#[derive(Debug, Deserialize)]
pub struct RecordResponse {
    /// The record payload.
    pub results: AzionRecord,
}

/// A hosted zone as the API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct AzionZone {
    /// Zone identifier.
    pub id: u64,
    /// Zone name (display name; usually equals the domain).
    pub name: String,
    /// Domain the zone is authoritative for.
    #[serde(default)]
    pub domain: String,
    /// Whether the zone is active.
    #[serde(default)]
    pub is_active: bool,
}

impl AzionZone {
    /// The domain this zone answers for, falling back to `name` when the
    /// API omits `domain`.
    #[must_use]
    pub fn domain_name(&self) -> &str {
        if self.domain.is_empty() {
            &self.name
        } else {
            &self.domain
        }
    }
}

/// One record row as the API returns it.
///
/// Multiple rows sharing `(entry, record_type)` form one canonical record.
#[derive(Debug, Clone, Deserialize)]
pub struct AzionRecord {
    /// Record row identifier.
    pub record_id: u64,
    /// Zone-relative name (`"@"` or empty for the apex).
    pub entry: String,
    /// Record type string (`"A"`, `"ANAME"`, ...).
    pub record_type: String,
    /// Time to live in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Answer values carried by this row.
    #[serde(default)]
    pub answers_list: Vec<String>,
}

fn default_ttl() -> u32 {
    3600
}

/// Payload of `POST /intelligent_dns`.
///
/// Both `name` and `domain` must be set; supplying only one silently
/// produces a malformed zone.
#[derive(Debug, Clone, Serialize)]
pub struct CreateZoneRequest {
    /// Zone display name.
    pub name: String,
    /// Domain the zone is authoritative for.
    pub domain: String,
    /// Activate the zone immediately.
    pub is_active: bool,
}

/// Payload of record create/update calls. One answer per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordParams {
    /// Zone-relative name (`"@"` for the apex).
    pub entry: String,
    /// Record type string as the API expects it (`"ANAME"` for ALIAS).
    pub record_type: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Answer values; exactly one element per call.
    pub answers_list: Vec<String>,
}

/// One page of a listing, already unwrapped from the envelope.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Whether the API advertises another page.
    pub has_next: bool,
}
