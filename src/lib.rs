//! # azion-dns-sync
//!
//! Zone synchronization adapter for [Azion Intelligent DNS](https://www.azion.com/).
//!
//! The crate reconciles a desired set of DNS records against a hosted
//! zone: fetch the remote state, diff it, and apply the resulting plan
//! through the Intelligent DNS v3 API.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! azion-dns-sync = "0.1"
//! ```
//!
//! ```rust,no_run
//! use azion_dns_sync::{
//!     plan, ApplyPolicy, AzionAdapter, AzionConfig, CanonicalRecord, RecordData,
//!     RunContext, Zone,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = AzionAdapter::from_config(&AzionConfig::from_env()?);
//!     let mut ctx = RunContext::new();
//!
//!     // 1. Read the remote zone (a zone that is not hosted yet
//!     //    populates empty and reports exists = false).
//!     let mut zone = Zone::new("example.com.");
//!     let exists = adapter.populate(&mut zone, &mut ctx).await?;
//!     println!("{} records (exists: {exists})", zone.records.len());
//!
//!     // 2. Diff against the desired state.
//!     let desired = vec![CanonicalRecord {
//!         fqdn: "www.example.com.".to_string(),
//!         ttl: 600,
//!         data: RecordData::A { addresses: vec!["1.2.3.4".to_string()] },
//!     }];
//!     let existing = if exists {
//!         adapter.fetch("example.com.", &mut ctx).await?
//!     } else {
//!         Vec::new()
//!     };
//!     let changes = plan(existing, desired);
//!
//!     // 3. Apply the plan (creates the zone when missing).
//!     let report = adapter
//!         .apply("example.com.", changes, ApplyPolicy::FailFast, &mut ctx)
//!         .await?;
//!     println!("applied {} change(s)", report.applied);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, SyncError>`](SyncError). Variants
//! separate caller mistakes from remote trouble:
//!
//! - [`SyncError::Configuration`] — unusable credentials or setup
//! - [`SyncError::ZoneNotFound`] — the zone is not hosted remotely
//! - [`SyncError::TransientFetch`] / [`SyncError::TransientApply`] —
//!   network trouble, timeouts, rate limits (retried with backoff first)
//! - [`SyncError::MalformedResponse`] — the API broke its own contract
//!
//! [`SyncError::is_transient`] tells whether retrying the whole run can
//! help.
//!
//! ## Testing
//!
//! Everything above the HTTP transport is written against the
//! [`AzionApi`] trait; swap in an in-memory implementation to exercise
//! populate, plan, and apply without a network.

mod adapter;
pub mod api;
mod config;
mod error;
mod fetch;
mod plan;
mod record;
mod zone;

pub use adapter::{ApplyFailure, ApplyPolicy, ApplyReport, AzionAdapter, Zone};
pub use api::{AzionApi, AzionClient};
pub use config::{AzionConfig, TOKEN_ENV_VAR};
pub use error::{Result, SyncError};
pub use fetch::{FetchedRecord, RECORDS_PAGE_SIZE, fetch_records};
pub use plan::{Change, plan};
pub use record::{
    CaaValue, CanonicalRecord, MxValue, RecordData, RecordType, SrvValue, canonical_from_group,
    parse_remote_type, remote_params_for, to_fqdn, to_remote_name,
};
pub use zone::{RunContext, ZONES_PAGE_SIZE, list_zone_names, resolve_zone};
