//! Azion API surface.
//!
//! [`AzionApi`] is the seam between the reconciliation logic and the HTTP
//! transport: the fetcher, zone resolver, and adapter are written against
//! the trait, and [`AzionClient`] is the reqwest-backed production
//! implementation. Tests substitute an in-memory implementation.

mod client;
pub mod types;

pub use client::AzionClient;

use async_trait::async_trait;

use crate::error::Result;
use types::{AzionRecord, AzionZone, CreateZoneRequest, Page, RecordParams};

/// Raw Azion Intelligent DNS operations, one method per endpoint.
///
/// List methods are page-based (1-indexed); the caller drives the
/// pagination loop. Mutating methods operate on one record row per call.
#[async_trait]
pub trait AzionApi: Send + Sync {
    /// List hosted zones, one page at a time.
    async fn list_zones(&self, page: u32, page_size: u32) -> Result<Page<AzionZone>>;

    /// Create a hosted zone.
    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<AzionZone>;

    /// Delete a hosted zone.
    async fn delete_zone(&self, zone_id: u64) -> Result<()>;

    /// List record rows of a zone, one page at a time.
    async fn list_records(
        &self,
        zone_id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<AzionRecord>>;

    /// Create one record row.
    async fn create_record(&self, zone_id: u64, params: &RecordParams) -> Result<AzionRecord>;

    /// Replace one record row.
    async fn update_record(
        &self,
        zone_id: u64,
        record_id: u64,
        params: &RecordParams,
    ) -> Result<AzionRecord>;

    /// Delete one record row.
    async fn delete_record(&self, zone_id: u64, record_id: u64) -> Result<()>;
}
