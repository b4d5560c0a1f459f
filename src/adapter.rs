//! Synchronization adapter.
//!
//! [`AzionAdapter`] is the top-level entry point: `populate` reads the
//! remote zone into canonical records, `apply` executes a planned change
//! set against it. Both are generic over [`AzionApi`], so the full
//! reconciliation path runs against an in-memory API in tests.

use crate::api::types::RecordParams;
use crate::api::{AzionApi, AzionClient};
use crate::config::AzionConfig;
use crate::error::{Result, SyncError};
use crate::fetch::{FetchedRecord, fetch_records};
use crate::plan::Change;
use crate::record::{CanonicalRecord, remote_params_for};
use crate::zone::{RunContext, resolve_zone};

/// A zone and its canonical records.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Zone domain, with or without a trailing dot.
    pub name: String,
    /// Canonical records of the zone.
    pub records: Vec<CanonicalRecord>,
}

impl Zone {
    /// Create an empty zone for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Zone domain without the trailing dot.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.name.trim_end_matches('.')
    }
}

/// How `apply` reacts to a failing change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyPolicy {
    /// Abort on the first failing change.
    FailFast,
    /// Keep going; collect failures into the report.
    ContinueOnError,
}

/// One change that failed during apply.
#[derive(Debug)]
pub struct ApplyFailure {
    /// `fqdn TYPE` identity of the failed change.
    pub key: String,
    /// `create` / `update` / `delete`.
    pub verb: &'static str,
    /// What went wrong.
    pub error: SyncError,
}

/// Outcome of an apply run.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Changes executed successfully.
    pub applied: usize,
    /// Changes that failed (empty under [`ApplyPolicy::FailFast`]).
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    /// True when every change landed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Azion Intelligent DNS synchronization adapter.
pub struct AzionAdapter<A: AzionApi> {
    api: A,
}

impl AzionAdapter<AzionClient> {
    /// Build an adapter backed by the production HTTP client.
    #[must_use]
    pub fn from_config(config: &AzionConfig) -> Self {
        Self::new(AzionClient::new(config))
    }
}

impl<A: AzionApi> AzionAdapter<A> {
    /// Build an adapter over any API implementation.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API handle.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fill `zone` with the remote records and report whether the remote
    /// zone exists.
    ///
    /// A zone that is not hosted remotely is not an error: the zone is
    /// left empty and `false` is returned, so a first sync against a
    /// fresh account starts from a clean slate.
    ///
    /// # Errors
    ///
    /// Transport and envelope errors from the fetch; never
    /// [`SyncError::ZoneNotFound`].
    pub async fn populate(&self, zone: &mut Zone, ctx: &mut RunContext) -> Result<bool> {
        let zone_id = match resolve_zone(&self.api, ctx, zone.domain(), false).await {
            Ok(zone_id) => zone_id,
            Err(SyncError::ZoneNotFound { .. }) => {
                log::debug!("zone '{}' not hosted, populating empty", zone.name);
                zone.records.clear();
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        // The zone can also vanish between resolution and the record
        // listing (stale id, 404 mid-run); that is the same "not hosted"
        // outcome, not a failure.
        let fetched = match fetch_records(&self.api, zone_id, zone.domain()).await {
            Ok(fetched) => fetched,
            Err(SyncError::ZoneNotFound { .. }) => {
                log::debug!("zone '{}' gone during fetch, populating empty", zone.name);
                zone.records.clear();
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        log::info!("populated zone '{}' with {} records", zone.name, fetched.len());
        zone.records = fetched.into_iter().map(|f| f.canonical).collect();
        Ok(true)
    }

    /// Fetch the remote state of `zone_name` with row ids, for planning.
    ///
    /// # Errors
    ///
    /// [`SyncError::ZoneNotFound`] when the zone is not hosted, plus
    /// fetch transport errors.
    pub async fn fetch(
        &self,
        zone_name: &str,
        ctx: &mut RunContext,
    ) -> Result<Vec<FetchedRecord>> {
        let domain = zone_name.trim_end_matches('.');
        let zone_id = resolve_zone(&self.api, ctx, domain, false).await?;
        fetch_records(&self.api, zone_id, domain).await
    }

    /// Execute a planned change set against `zone_name`.
    ///
    /// The zone is created when missing; this is the only implicit
    /// provisioning step. Changes run in plan order. An update is
    /// executed as delete-then-create because the API takes one answer
    /// per call and has no atomic replace.
    ///
    /// # Errors
    ///
    /// Under [`ApplyPolicy::FailFast`], the first failing change aborts
    /// the run with its error. Under [`ApplyPolicy::ContinueOnError`],
    /// per-change failures land in the report and only zone resolution
    /// errors abort.
    pub async fn apply(
        &self,
        zone_name: &str,
        changes: Vec<Change>,
        policy: ApplyPolicy,
        ctx: &mut RunContext,
    ) -> Result<ApplyReport> {
        let domain = zone_name.trim_end_matches('.').to_string();
        let zone_id = resolve_zone(&self.api, ctx, &domain, true).await?;

        log::info!(
            "applying {} change(s) to zone '{domain}' (id {zone_id})",
            changes.len()
        );

        let mut report = ApplyReport::default();
        for change in changes {
            let (fqdn, record_type) = change.key();
            let key = format!("{fqdn} {record_type}");
            let verb = change.verb();
            match self.execute(zone_id, &domain, change).await {
                Ok(()) => {
                    log::debug!("{verb} {key}: ok");
                    report.applied += 1;
                }
                Err(e) => {
                    log::warn!("{verb} {key}: {e}");
                    match policy {
                        ApplyPolicy::FailFast => return Err(e),
                        ApplyPolicy::ContinueOnError => report.failures.push(ApplyFailure {
                            key,
                            verb,
                            error: e,
                        }),
                    }
                }
            }
        }
        Ok(report)
    }

    async fn execute(&self, zone_id: u64, domain: &str, change: Change) -> Result<()> {
        match change {
            Change::Create(desired) => {
                let params = remote_params_for(&desired, domain)?;
                self.create_rows(zone_id, &params).await
            }
            Change::Update { existing, desired } => {
                // Translate before deleting so a bad desired record
                // cannot leave the name without answers.
                let params = remote_params_for(&desired, domain)?;
                self.delete_rows(zone_id, &existing.record_ids).await?;
                self.create_rows(zone_id, &params).await
            }
            Change::Delete(existing) => self.delete_rows(zone_id, &existing.record_ids).await,
        }
    }

    async fn create_rows(&self, zone_id: u64, params: &[RecordParams]) -> Result<()> {
        for param in params {
            self.api.create_record(zone_id, param).await?;
        }
        Ok(())
    }

    async fn delete_rows(&self, zone_id: u64, record_ids: &[u64]) -> Result<()> {
        for record_id in record_ids {
            self.api.delete_record(zone_id, *record_id).await?;
        }
        Ok(())
    }
}
