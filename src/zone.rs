//! Zone lookup and caching.
//!
//! Maps zone domain names to vendor zone ids. Lookups page through the
//! zone listing; resolved ids are cached in an explicit [`RunContext`]
//! owned by the caller, so two reconciliation runs never share state
//! unless they share a context.

use std::collections::HashMap;

use crate::api::AzionApi;
use crate::api::types::{AzionZone, CreateZoneRequest};
use crate::error::{Result, SyncError};

/// Fixed page size for zone listing requests.
pub const ZONES_PAGE_SIZE: u32 = 200;

/// Per-run cache of resolved zone ids, keyed by normalized domain.
#[derive(Debug, Default)]
pub struct RunContext {
    zone_ids: HashMap<String, u64>,
}

impl RunContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, domain: &str) -> Option<u64> {
        self.zone_ids.get(domain).copied()
    }

    fn insert(&mut self, domain: String, zone_id: u64) {
        self.zone_ids.insert(domain, zone_id);
    }
}

/// Trailing dot stripped, lowercased. Zone names compare case-insensitively.
fn normalize_domain(domain: &str) -> String {
    domain.trim_end_matches('.').to_ascii_lowercase()
}

async fn find_zone<A: AzionApi + ?Sized>(api: &A, domain: &str) -> Result<Option<AzionZone>> {
    let mut page = 1;
    loop {
        let response = api.list_zones(page, ZONES_PAGE_SIZE).await?;
        let page_len = response.items.len();
        for zone in response.items {
            if normalize_domain(zone.domain_name()) == domain {
                return Ok(Some(zone));
            }
        }
        if !response.has_next || page_len < ZONES_PAGE_SIZE as usize {
            return Ok(None);
        }
        page += 1;
    }
}

/// Resolve a zone domain to its vendor id.
///
/// The match is exact on the normalized domain; a zone for a parent
/// domain never matches a child. With `create_if_missing` the zone is
/// created (active, with both display name and domain set) when no match
/// exists. Resolutions are cached in `ctx`, including ids of zones this
/// call created.
///
/// # Errors
///
/// [`SyncError::ZoneNotFound`] when the zone does not exist and
/// `create_if_missing` is false; fetch/apply transport errors otherwise.
pub async fn resolve_zone<A: AzionApi + ?Sized>(
    api: &A,
    ctx: &mut RunContext,
    domain: &str,
    create_if_missing: bool,
) -> Result<u64> {
    let domain = normalize_domain(domain);
    if let Some(zone_id) = ctx.get(&domain) {
        return Ok(zone_id);
    }

    if let Some(zone) = find_zone(api, &domain).await? {
        log::debug!("resolved zone '{domain}' to id {}", zone.id);
        ctx.insert(domain, zone.id);
        return Ok(zone.id);
    }

    if !create_if_missing {
        return Err(SyncError::ZoneNotFound { domain });
    }

    let created = api
        .create_zone(&CreateZoneRequest {
            name: domain.clone(),
            domain: domain.clone(),
            is_active: true,
        })
        .await?;
    log::info!("created zone '{domain}' with id {}", created.id);
    ctx.insert(domain, created.id);
    Ok(created.id)
}

/// List every hosted zone domain, fully qualified and sorted.
///
/// # Errors
///
/// Propagates listing transport errors.
pub async fn list_zone_names<A: AzionApi + ?Sized>(api: &A) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut page = 1;
    loop {
        let response = api.list_zones(page, ZONES_PAGE_SIZE).await?;
        let page_len = response.items.len();
        for zone in response.items {
            names.push(format!("{}.", normalize_domain(zone.domain_name())));
        }
        if !response.has_next || page_len < ZONES_PAGE_SIZE as usize {
            break;
        }
        page += 1;
    }
    names.sort();
    Ok(names)
}
