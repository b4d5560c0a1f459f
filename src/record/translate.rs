//! Bidirectional record translation.
//!
//! [`canonical_from_group`] turns a group of remote rows sharing one
//! `(entry, record_type)` key into a [`CanonicalRecord`];
//! [`remote_params_for`] turns a canonical record back into one
//! [`RecordParams`] per value, since the API accepts a single answer per
//! create/update call.
//!
//! Every [`RecordType`] variant has its own branch on both sides; the
//! exhaustive `match` makes a missing per-type builder a compile error
//! instead of a runtime surprise. The only vendor-specific spelling is
//! `ALIAS`, which travels as `ANAME` on the wire.

use crate::api::types::{AzionRecord, RecordParams};
use crate::error::{Result, SyncError};
use crate::record::name::{to_fqdn, to_remote_name};
use crate::record::{CaaValue, CanonicalRecord, MxValue, RecordData, RecordType, SrvValue};

/// Wire spelling of the ALIAS type.
const ANAME_WIRE_TYPE: &str = "ANAME";

/// Parse a remote record type string into a [`RecordType`].
///
/// `ANAME` maps to [`RecordType::Alias`]. This is the strict path used when
/// a caller asks for an explicit translation; the fetcher's read path drops
/// unknown remote types silently instead (see [`crate::fetch`]) — creating
/// a record of an unsupported type is a caller error, encountering one in a
/// listing is not.
///
/// # Errors
///
/// Returns [`SyncError::UnsupportedType`] for anything else.
pub fn parse_remote_type(record_type: &str) -> Result<RecordType> {
    match record_type.to_ascii_uppercase().as_str() {
        "A" => Ok(RecordType::A),
        "AAAA" => Ok(RecordType::Aaaa),
        ANAME_WIRE_TYPE | "ALIAS" => Ok(RecordType::Alias),
        "CAA" => Ok(RecordType::Caa),
        "CNAME" => Ok(RecordType::Cname),
        "MX" => Ok(RecordType::Mx),
        "NS" => Ok(RecordType::Ns),
        "PTR" => Ok(RecordType::Ptr),
        "SRV" => Ok(RecordType::Srv),
        "TXT" => Ok(RecordType::Txt),
        other => Err(SyncError::UnsupportedType {
            record_type: other.to_string(),
        }),
    }
}

/// Wire spelling of a [`RecordType`].
pub(crate) fn remote_type_name(record_type: RecordType) -> &'static str {
    match record_type {
        RecordType::Alias => ANAME_WIRE_TYPE,
        other => other.as_str(),
    }
}

/// Append a trailing dot unless present.
fn qualify(hostname: &str) -> String {
    if hostname.ends_with('.') {
        hostname.to_string()
    } else {
        format!("{hostname}.")
    }
}

/// Quote a TXT value for the wire, escaping backslashes and quotes.
fn quote_txt(text: &str) -> String {
    format!(
        "\"{}\"",
        text.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

/// Reverse [`quote_txt`]. Unquoted answers pass through unchanged.
fn unquote_txt(answer: &str) -> String {
    let Some(inner) = answer
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    else {
        return answer.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(esc) => out.push(esc),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn malformed(record_type: RecordType, answer: &str) -> SyncError {
    SyncError::MalformedResponse {
        detail: format!("cannot parse {record_type} answer '{answer}'"),
    }
}

fn parse_mx(answer: &str) -> Result<MxValue> {
    let (priority, exchange) = answer
        .split_once(' ')
        .ok_or_else(|| malformed(RecordType::Mx, answer))?;
    Ok(MxValue {
        priority: priority
            .parse()
            .map_err(|_| malformed(RecordType::Mx, answer))?,
        exchange: qualify(exchange.trim()),
    })
}

fn parse_srv(answer: &str) -> Result<SrvValue> {
    let parts: Vec<&str> = answer.splitn(4, ' ').collect();
    let &[priority, weight, port, target] = parts.as_slice() else {
        return Err(malformed(RecordType::Srv, answer));
    };
    let target = if target == "." {
        ".".to_string()
    } else {
        qualify(target)
    };
    let parse_u16 = |s: &str| {
        s.parse::<u16>()
            .map_err(|_| malformed(RecordType::Srv, answer))
    };
    Ok(SrvValue {
        priority: parse_u16(priority)?,
        weight: parse_u16(weight)?,
        port: parse_u16(port)?,
        target,
    })
}

fn parse_caa(answer: &str) -> Result<CaaValue> {
    let parts: Vec<&str> = answer.splitn(3, ' ').collect();
    let &[flags, tag, value] = parts.as_slice() else {
        return Err(malformed(RecordType::Caa, answer));
    };
    Ok(CaaValue {
        flags: flags
            .parse()
            .map_err(|_| malformed(RecordType::Caa, answer))?,
        tag: tag.to_string(),
        value: value.trim_matches('"').to_string(),
    })
}

/// Build a [`CanonicalRecord`] from the remote rows grouped under one
/// `(entry, record_type)` key.
///
/// The TTL of the first row wins for the whole group. Hostname answers are
/// restored to fully-qualified form; TXT answers are unquoted.
///
/// # Errors
///
/// Returns [`SyncError::MalformedResponse`] when a group is empty, a
/// single-value type carries no answer, or an answer does not parse as its
/// type's wire format.
pub fn canonical_from_group(
    entry: &str,
    record_type: RecordType,
    zone_domain: &str,
    rows: &[AzionRecord],
) -> Result<CanonicalRecord> {
    let first = rows.first().ok_or_else(|| SyncError::MalformedResponse {
        detail: format!("empty record group for '{entry}' {record_type}"),
    })?;

    let answers: Vec<&str> = rows
        .iter()
        .flat_map(|row| row.answers_list.iter().map(String::as_str))
        .collect();

    let single = || -> Result<&str> {
        answers
            .first()
            .copied()
            .ok_or_else(|| SyncError::MalformedResponse {
                detail: format!("no answer for '{entry}' {record_type}"),
            })
    };

    let data = match record_type {
        RecordType::A => RecordData::A {
            addresses: answers.iter().map(ToString::to_string).collect(),
        },
        RecordType::Aaaa => RecordData::AAAA {
            addresses: answers.iter().map(ToString::to_string).collect(),
        },
        RecordType::Alias => RecordData::ALIAS {
            target: qualify(single()?),
        },
        RecordType::Caa => RecordData::CAA {
            values: answers
                .iter()
                .copied()
                .map(parse_caa)
                .collect::<Result<_>>()?,
        },
        RecordType::Cname => RecordData::CNAME {
            target: qualify(single()?),
        },
        RecordType::Mx => RecordData::MX {
            values: answers
                .iter()
                .copied()
                .map(parse_mx)
                .collect::<Result<_>>()?,
        },
        RecordType::Ns => RecordData::NS {
            nameservers: answers.iter().copied().map(qualify).collect(),
        },
        RecordType::Ptr => RecordData::PTR {
            target: qualify(single()?),
        },
        RecordType::Srv => RecordData::SRV {
            values: answers
                .iter()
                .copied()
                .map(parse_srv)
                .collect::<Result<_>>()?,
        },
        RecordType::Txt => RecordData::TXT {
            texts: answers.iter().copied().map(unquote_txt).collect(),
        },
    };

    Ok(CanonicalRecord {
        fqdn: to_fqdn(entry, zone_domain),
        ttl: first.ttl,
        data,
    })
}

/// Serialize a canonical record into API call parameters, one per value.
///
/// Hostnames are submitted without the trailing dot (the API re-qualifies
/// them relative to nothing); SRV's `"."` placeholder target is preserved;
/// TXT values are quoted. The order of the returned params follows the
/// record's value order.
///
/// # Errors
///
/// Returns [`SyncError::NameMismatch`] if the record's fqdn is outside
/// `zone_domain`.
pub fn remote_params_for(
    record: &CanonicalRecord,
    zone_domain: &str,
) -> Result<Vec<RecordParams>> {
    let entry = to_remote_name(&record.fqdn, zone_domain)?;
    let record_type = remote_type_name(record.record_type()).to_string();

    let params = |answer: String| RecordParams {
        entry: entry.clone(),
        record_type: record_type.clone(),
        ttl: record.ttl,
        answers_list: vec![answer],
    };

    let out = match &record.data {
        RecordData::A { addresses } | RecordData::AAAA { addresses } => {
            addresses.iter().map(|a| params(a.clone())).collect()
        }
        RecordData::ALIAS { target }
        | RecordData::CNAME { target }
        | RecordData::PTR { target } => {
            vec![params(target.trim_end_matches('.').to_string())]
        }
        RecordData::CAA { values } => values
            .iter()
            .map(|v| params(format!("{} {} \"{}\"", v.flags, v.tag, v.value)))
            .collect(),
        RecordData::MX { values } => values
            .iter()
            .map(|v| params(format!("{} {}", v.priority, v.exchange.trim_end_matches('.'))))
            .collect(),
        RecordData::NS { nameservers } => {
            nameservers.iter().map(|ns| params(ns.clone())).collect()
        }
        RecordData::SRV { values } => values
            .iter()
            .map(|v| {
                let target = if v.target == "." {
                    "."
                } else {
                    v.target.trim_end_matches('.')
                };
                params(format!("{} {} {} {}", v.priority, v.weight, v.port, target))
            })
            .collect(),
        RecordData::TXT { texts } => texts.iter().map(|t| params(quote_txt(t))).collect(),
    };

    Ok(out)
}
