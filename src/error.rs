use serde::{Deserialize, Serialize};

/// Unified error type for all synchronization operations.
///
/// Variants carry the context needed to act on the failure without parsing
/// message strings. All variants are serializable for structured error
/// reporting back to the orchestration engine.
///
/// # Transient Errors
///
/// [`TransientFetch`](Self::TransientFetch) and
/// [`TransientApply`](Self::TransientApply) represent network-level failures
/// that may succeed on retry. The HTTP client retries these with exponential
/// backoff; everything else is handed to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum SyncError {
    /// Credentials are missing or rejected by the API. Fatal; checked before
    /// any network call where possible.
    Configuration {
        /// What is wrong with the configuration.
        detail: String,
    },

    /// No zone with the given domain name exists on the remote side.
    ///
    /// The caller decides whether to abort or provision the zone.
    ZoneNotFound {
        /// Domain name that failed to resolve to a zone.
        domain: String,
    },

    /// A record fqdn is not the zone apex and not a subdomain of the zone.
    ///
    /// This is an input error, fatal for that record only.
    NameMismatch {
        /// The offending fully-qualified name.
        fqdn: String,
        /// The zone the name was expected to fall under.
        zone: String,
    },

    /// A desired record has a type this adapter cannot express on the wire.
    ///
    /// Raised at translation time, never silently dropped. Unsupported types
    /// coming *from* the API during a read are logged and skipped instead.
    UnsupportedType {
        /// The unsupported record type string.
        record_type: String,
    },

    /// A network failure or retryable HTTP status while reading remote state.
    ///
    /// A partial record set is unsafe to diff against, so the whole fetch
    /// aborts with this error.
    TransientFetch {
        /// Error details.
        detail: String,
    },

    /// A network failure or retryable HTTP status while writing a change.
    TransientApply {
        /// Error details.
        detail: String,
    },

    /// The API returned a payload this adapter does not recognize.
    ///
    /// Fatal; usually signals a vendor API contract change.
    MalformedResponse {
        /// Details about the unexpected shape.
        detail: String,
    },
}

impl SyncError {
    /// Whether the error is eligible for a retry at the caller's discretion.
    ///
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::TransientFetch { .. } | Self::TransientApply { .. }
        )
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration { detail } => {
                write!(f, "Configuration error: {detail}")
            }
            Self::ZoneNotFound { domain } => {
                write!(f, "Zone '{domain}' not found")
            }
            Self::NameMismatch { fqdn, zone } => {
                write!(f, "Name '{fqdn}' is not within zone '{zone}'")
            }
            Self::UnsupportedType { record_type } => {
                write!(f, "Unsupported record type: {record_type}")
            }
            Self::TransientFetch { detail } => {
                write!(f, "Transient fetch error: {detail}")
            }
            Self::TransientApply { detail } => {
                write!(f, "Transient apply error: {detail}")
            }
            Self::MalformedResponse { detail } => {
                write!(f, "Malformed API response: {detail}")
            }
        }
    }
}

impl std::error::Error for SyncError {}

/// Convenience type alias for `Result<T, SyncError>`.
pub type Result<T> = std::result::Result<T, SyncError>;
