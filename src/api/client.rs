//! Reqwest-backed [`AzionApi`] implementation.
//!
//! Transport concerns live here and only here: authentication headers,
//! timeout configuration, HTTP status mapping into the [`SyncError`]
//! taxonomy, and retry with exponential backoff for transient failures.
//! Reconciliation code never retries on its own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::AzionConfig;
use crate::error::{Result, SyncError};

use super::AzionApi;
use super::types::{
    AzionRecord, AzionZone, CreateZoneRequest, Page, RecordListResponse, RecordParams,
    RecordResponse, ZoneListResponse, ZoneResponse,
};

/// Azion API base URL.
const API_BASE: &str = "https://api.azionapi.net";
/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Whole-request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Retries for transient failures before giving up.
const MAX_RETRIES: u32 = 3;
/// Upper bound honored from a server-sent `Retry-After` header.
const RETRY_AFTER_CAP_SECS: u64 = 30;
/// Longest slice of a response body that goes to the debug log.
const LOG_BODY_LIMIT: usize = 256;

/// Which side of the reconciliation a request serves; decides whether a
/// transient failure surfaces as [`SyncError::TransientFetch`] or
/// [`SyncError::TransientApply`].
#[derive(Debug, Clone, Copy)]
enum Op {
    Fetch,
    Apply,
}

impl Op {
    fn transient(self, detail: String) -> SyncError {
        match self {
            Self::Fetch => SyncError::TransientFetch { detail },
            Self::Apply => SyncError::TransientApply { detail },
        }
    }
}

/// Truncate a response body for logging.
fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_BODY_LIMIT {
        return s.to_string();
    }
    let mut end = LOG_BODY_LIMIT;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

/// Exponential backoff: 100ms, 200ms, 400ms, ... capped at 10s.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}

/// Parse a `Retry-After` header value (delta-seconds form), capped at
/// [`RETRY_AFTER_CAP_SECS`]. The HTTP-date form is not supported and
/// falls back to backoff.
fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: u64 = value.trim().parse().ok()?;
    Some(Duration::from_secs(secs.min(RETRY_AFTER_CAP_SECS)))
}

/// Delay before the next attempt: the server's `Retry-After` when it
/// sent one, exponential backoff otherwise.
fn retry_delay(retry_after: Option<Duration>, attempt: u32) -> Duration {
    retry_after.unwrap_or_else(|| backoff_delay(attempt))
}

/// One failed request attempt, with the server-advised retry delay when
/// the response carried one.
struct AttemptError {
    error: SyncError,
    retry_after: Option<Duration>,
}

impl AttemptError {
    fn new(error: SyncError) -> Self {
        Self {
            error,
            retry_after: None,
        }
    }
}

/// Production HTTP client for the Azion Intelligent DNS API (version 3).
pub struct AzionClient {
    client: Client,
    token: String,
    base_url: String,
}

impl AzionClient {
    /// Build a client from a validated configuration.
    #[must_use]
    pub fn new(config: &AzionConfig) -> Self {
        Self::with_base_url(config, API_BASE)
    }

    /// Build a client against a non-default base URL (test servers).
    #[must_use]
    pub fn with_base_url(config: &AzionConfig, base_url: &str) -> Self {
        #[allow(clippy::expect_used)]
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            token: config.token.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json; version=3")
    }

    /// Send a request, mapping connection failures and retryable statuses
    /// into the error taxonomy. Returns the status and body otherwise.
    async fn execute(
        builder: RequestBuilder,
        op: Op,
        method: &str,
        path: &str,
    ) -> std::result::Result<(StatusCode, String), AttemptError> {
        log::debug!("{method} {path}");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AttemptError::new(op.transient(format!("request timed out: {e}")))
            } else {
                AttemptError::new(op.transient(e.to_string()))
            }
        })?;

        let status = response.status();
        log::debug!("{method} {path} -> {status}");

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            // Capture the header before text() consumes the response.
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            let body = response.text().await.unwrap_or_default();
            log::warn!("{method} {path} retryable failure (HTTP {status})");
            return Err(AttemptError {
                error: op.transient(format!("HTTP {status}: {body}")),
                retry_after,
            });
        }

        let body = response.text().await.map_err(|e| {
            AttemptError::new(op.transient(format!("failed to read response body: {e}")))
        })?;

        log::debug!("{method} {path} body: {}", truncate_for_log(&body));
        Ok((status, body))
    }

    /// [`execute`](Self::execute) wrapped in a retry loop for transient
    /// errors.
    async fn execute_with_retry(
        builder: RequestBuilder,
        op: Op,
        method: &str,
        path: &str,
    ) -> Result<(StatusCode, String)> {
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            let Some(req) = builder.try_clone() else {
                // Streaming bodies cannot be cloned; fall back to one shot.
                log::warn!("{method} {path}: request not cloneable, retry disabled");
                return Self::execute(builder, op, method, path)
                    .await
                    .map_err(|f| f.error);
            };

            match Self::execute(req, op, method, path).await {
                Ok(resp) => return Ok(resp),
                Err(failure) if attempt < MAX_RETRIES && failure.error.is_transient() => {
                    let delay = retry_delay(failure.retry_after, attempt);
                    log::warn!(
                        "{method} {path} failed (attempt {}/{MAX_RETRIES}), retrying in {:.1}s: {}",
                        attempt + 1,
                        delay.as_secs_f32(),
                        failure.error,
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(failure.error);
                }
                Err(failure) => return Err(failure.error),
            }
        }

        Err(last_error
            .unwrap_or_else(|| op.transient("all retries exhausted".to_string())))
    }

    /// Map non-2xx statuses that survived [`execute`](Self::execute).
    ///
    /// Retryable statuses were already turned into transient errors there;
    /// whatever remains will not get better on retry.
    fn check_status(status: StatusCode, body: &str, what: &str) -> Result<()> {
        if status.is_success() {
            return Ok(());
        }
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SyncError::Configuration {
                detail: format!("API rejected credentials (HTTP {status})"),
            }),
            StatusCode::NOT_FOUND => Err(SyncError::ZoneNotFound {
                domain: what.to_string(),
            }),
            _ => Err(SyncError::MalformedResponse {
                detail: format!("unexpected HTTP {status}: {body}"),
            }),
        }
    }

    fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("raw response: {}", truncate_for_log(body));
            SyncError::MalformedResponse {
                detail: e.to_string(),
            }
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let builder = self.headers(self.client.get(&url));
        let (status, body) = Self::execute_with_retry(builder, Op::Fetch, "GET", path).await?;
        Self::check_status(status, &body, what)?;
        Self::parse_json(&body)
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        request_body: &B,
        what: &str,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let builder = self.headers(self.client.post(&url)).json(request_body);
        let (status, body) = Self::execute_with_retry(builder, Op::Apply, "POST", path).await?;
        Self::check_status(status, &body, what)?;
        Self::parse_json(&body)
    }

    async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        request_body: &B,
        what: &str,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let builder = self.headers(self.client.put(&url)).json(request_body);
        let (status, body) = Self::execute_with_retry(builder, Op::Apply, "PUT", path).await?;
        Self::check_status(status, &body, what)?;
        Self::parse_json(&body)
    }

    async fn delete_path(&self, path: &str, what: &str) -> Result<()> {
        let url = format!("{}{path}", self.base_url);
        let builder = self.headers(self.client.delete(&url));
        let (status, body) = Self::execute_with_retry(builder, Op::Apply, "DELETE", path).await?;
        Self::check_status(status, &body, what)
    }
}

#[async_trait]
impl AzionApi for AzionClient {
    async fn list_zones(&self, page: u32, page_size: u32) -> Result<Page<AzionZone>> {
        let path = format!("/intelligent_dns?page={page}&page_size={page_size}");
        let resp: ZoneListResponse = self.get_json(&path, "zone listing").await?;
        Ok(Page {
            items: resp.results,
            has_next: resp.links.next.is_some(),
        })
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<AzionZone> {
        let resp: ZoneResponse = self
            .post_json("/intelligent_dns", req, &req.domain)
            .await?;
        Ok(resp.results)
    }

    async fn delete_zone(&self, zone_id: u64) -> Result<()> {
        self.delete_path(
            &format!("/intelligent_dns/{zone_id}"),
            &format!("zone {zone_id}"),
        )
        .await
    }

    async fn list_records(
        &self,
        zone_id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<AzionRecord>> {
        let path =
            format!("/intelligent_dns/{zone_id}/records?page={page}&page_size={page_size}");
        let resp: RecordListResponse = self.get_json(&path, &format!("zone {zone_id}")).await?;
        Ok(Page {
            items: resp.results.records,
            has_next: resp.links.next.is_some(),
        })
    }

    async fn create_record(&self, zone_id: u64, params: &RecordParams) -> Result<AzionRecord> {
        let resp: RecordResponse = self
            .post_json(
                &format!("/intelligent_dns/{zone_id}/records"),
                params,
                &format!("zone {zone_id}"),
            )
            .await?;
        Ok(resp.results)
    }

    async fn update_record(
        &self,
        zone_id: u64,
        record_id: u64,
        params: &RecordParams,
    ) -> Result<AzionRecord> {
        let resp: RecordResponse = self
            .put_json(
                &format!("/intelligent_dns/{zone_id}/records/{record_id}"),
                params,
                &format!("zone {zone_id}"),
            )
            .await?;
        Ok(resp.results)
    }

    async fn delete_record(&self, zone_id: u64, record_id: u64) -> Result<()> {
        self.delete_path(
            &format!("/intelligent_dns/{zone_id}/records/{record_id}"),
            &format!("zone {zone_id}"),
        )
        .await
    }
}
