//! Record name normalization.
//!
//! The orchestration engine speaks fully-qualified names with a trailing
//! dot; the Azion API speaks names relative to the zone apex, with the
//! literal `@` for the apex itself. `to_fqdn(to_remote_name(x, z), z) == x`
//! holds for any `x` at or under `z`; names outside the zone fail with
//! [`SyncError::NameMismatch`].

use crate::error::{Result, SyncError};

/// Strip a trailing dot and lowercase for comparison.
fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Convert a fully-qualified name to the zone-relative form the API expects.
///
/// The apex maps to `"@"`; a subdomain maps to the fqdn with the
/// `.{zone}` suffix stripped. Comparison is case-insensitive and
/// trailing-dot-normalized.
///
/// # Errors
///
/// Returns [`SyncError::NameMismatch`] if `fqdn` is neither the zone apex
/// nor a strict subdomain of `zone_domain`.
pub fn to_remote_name(fqdn: &str, zone_domain: &str) -> Result<String> {
    let name = normalize(fqdn);
    let zone = normalize(zone_domain);

    if name == zone {
        return Ok("@".to_string());
    }
    if let Some(prefix) = name.strip_suffix(&format!(".{zone}")) {
        return Ok(prefix.to_string());
    }
    Err(SyncError::NameMismatch {
        fqdn: fqdn.to_string(),
        zone: zone_domain.to_string(),
    })
}

/// Convert a zone-relative name back to a trailing-dot-qualified fqdn.
///
/// `"@"` (and the empty string, which some API responses use for the apex)
/// maps to the zone domain itself.
#[must_use]
pub fn to_fqdn(relative_name: &str, zone_domain: &str) -> String {
    let zone = normalize(zone_domain);

    if relative_name == "@" || relative_name.is_empty() {
        format!("{zone}.")
    } else {
        format!("{relative_name}.{zone}.")
    }
}
