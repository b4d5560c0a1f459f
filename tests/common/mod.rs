//! Shared test fixtures: a stateful in-memory Azion API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use azion_dns_sync::api::types::{AzionRecord, AzionZone, CreateZoneRequest, Page, RecordParams};
use azion_dns_sync::{AzionApi, Result, SyncError};

#[derive(Default)]
struct State {
    zones: Vec<AzionZone>,
    records: HashMap<u64, Vec<AzionRecord>>,
    next_zone_id: u64,
    next_record_id: u64,
}

/// In-memory Intelligent DNS backend. Mutations change its store, so a
/// reconcile run can be verified by fetching again afterwards.
pub struct MockApi {
    state: Mutex<State>,
    /// `(zone_id, page, page_size)` of every record listing call.
    pub record_list_calls: Mutex<Vec<(u64, u32, u32)>>,
    /// Payload of every zone creation call.
    pub zone_create_calls: Mutex<Vec<CreateZoneRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_zone_id: 1,
                next_record_id: 1,
                ..State::default()
            }),
            record_list_calls: Mutex::new(Vec::new()),
            zone_create_calls: Mutex::new(Vec::new()),
        }
    }

    /// Seed a hosted zone, returning its id.
    pub fn add_zone(&self, domain: &str) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_zone_id;
        state.next_zone_id += 1;
        state.zones.push(AzionZone {
            id,
            name: domain.to_string(),
            domain: domain.to_string(),
            is_active: true,
        });
        state.records.insert(id, Vec::new());
        id
    }

    /// Seed one record row, returning its id.
    pub fn add_record(
        &self,
        zone_id: u64,
        entry: &str,
        record_type: &str,
        ttl: u32,
        answers: &[&str],
    ) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_record_id;
        state.next_record_id += 1;
        let row = AzionRecord {
            record_id: id,
            entry: entry.to_string(),
            record_type: record_type.to_string(),
            ttl,
            answers_list: answers.iter().map(|s| (*s).to_string()).collect(),
        };
        state.records.entry(zone_id).or_default().push(row);
        id
    }

    /// Current rows of a zone, in insertion order.
    pub fn rows(&self, zone_id: u64) -> Vec<AzionRecord> {
        self.state
            .lock()
            .unwrap()
            .records
            .get(&zone_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Id of the zone hosting `domain`, if seeded or created.
    pub fn zone_id(&self, domain: &str) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .zones
            .iter()
            .find(|z| z.domain == domain)
            .map(|z| z.id)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

fn page_of<T: Clone>(items: &[T], page: u32, page_size: u32) -> Page<T> {
    let start = ((page.max(1) - 1) * page_size) as usize;
    let slice: Vec<T> = items
        .iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();
    Page {
        has_next: start + slice.len() < items.len(),
        items: slice,
    }
}

#[async_trait]
impl AzionApi for MockApi {
    async fn list_zones(&self, page: u32, page_size: u32) -> Result<Page<AzionZone>> {
        let state = self.state.lock().unwrap();
        Ok(page_of(&state.zones, page, page_size))
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<AzionZone> {
        self.zone_create_calls.lock().unwrap().push(req.clone());
        let mut state = self.state.lock().unwrap();
        let id = state.next_zone_id;
        state.next_zone_id += 1;
        let zone = AzionZone {
            id,
            name: req.name.clone(),
            domain: req.domain.clone(),
            is_active: req.is_active,
        };
        state.zones.push(zone.clone());
        state.records.insert(id, Vec::new());
        Ok(zone)
    }

    async fn delete_zone(&self, zone_id: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.zones.retain(|z| z.id != zone_id);
        state.records.remove(&zone_id);
        Ok(())
    }

    async fn list_records(
        &self,
        zone_id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<AzionRecord>> {
        self.record_list_calls
            .lock()
            .unwrap()
            .push((zone_id, page, page_size));
        let state = self.state.lock().unwrap();
        let rows = state
            .records
            .get(&zone_id)
            .ok_or_else(|| SyncError::ZoneNotFound {
                domain: format!("zone {zone_id}"),
            })?;
        Ok(page_of(rows, page, page_size))
    }

    async fn create_record(&self, zone_id: u64, params: &RecordParams) -> Result<AzionRecord> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_record_id;
        state.next_record_id += 1;
        let row = AzionRecord {
            record_id: id,
            entry: params.entry.clone(),
            record_type: params.record_type.clone(),
            ttl: params.ttl,
            answers_list: params.answers_list.clone(),
        };
        state
            .records
            .get_mut(&zone_id)
            .ok_or_else(|| SyncError::ZoneNotFound {
                domain: format!("zone {zone_id}"),
            })?
            .push(row.clone());
        Ok(row)
    }

    async fn update_record(
        &self,
        zone_id: u64,
        record_id: u64,
        params: &RecordParams,
    ) -> Result<AzionRecord> {
        let mut state = self.state.lock().unwrap();
        let rows = state
            .records
            .get_mut(&zone_id)
            .ok_or_else(|| SyncError::ZoneNotFound {
                domain: format!("zone {zone_id}"),
            })?;
        let row = rows
            .iter_mut()
            .find(|r| r.record_id == record_id)
            .ok_or_else(|| SyncError::MalformedResponse {
                detail: format!("no record {record_id}"),
            })?;
        row.entry = params.entry.clone();
        row.record_type = params.record_type.clone();
        row.ttl = params.ttl;
        row.answers_list = params.answers_list.clone();
        Ok(row.clone())
    }

    async fn delete_record(&self, zone_id: u64, record_id: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let rows = state
            .records
            .get_mut(&zone_id)
            .ok_or_else(|| SyncError::ZoneNotFound {
                domain: format!("zone {zone_id}"),
            })?;
        rows.retain(|r| r.record_id != record_id);
        Ok(())
    }
}
