//! Canonical record model.
//!
//! This is the orchestration engine's view of a DNS record: fully-qualified
//! name, TTL, and a type-tagged value set, independent of how the Azion API
//! shapes the same data on the wire. Within one zone `(fqdn, type)` is
//! unique; multiple remote rows with the same name and type collapse into
//! one [`CanonicalRecord`] with multiple values.

mod name;
mod translate;

pub use name::{to_fqdn, to_remote_name};
pub use translate::{canonical_from_group, parse_remote_type, remote_params_for};

use serde::{Deserialize, Serialize};

/// DNS record type identifier.
///
/// Closed set: every variant has a matching translation branch in
/// [`translate`](self), enforced by exhaustive `match`. Serialized as
/// uppercase strings (`"A"`, `"AAAA"`, `"ALIAS"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Apex-capable CNAME-like alias (Azion's `ANAME` on the wire).
    Alias,
    /// Certificate Authority Authorization record.
    Caa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Reverse-lookup pointer record.
    Ptr,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
}

impl RecordType {
    /// Uppercase canonical name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Alias => "ALIAS",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One MX value: `{priority, exchange}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MxValue {
    /// Priority (lower = preferred).
    pub priority: u16,
    /// Mail server hostname, fully qualified.
    pub exchange: String,
}

/// One SRV value: `{priority, weight, port, target}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SrvValue {
    /// Priority (lower = preferred).
    pub priority: u16,
    /// Weight for load balancing among same-priority targets.
    pub weight: u16,
    /// TCP/UDP port number.
    pub port: u16,
    /// Target hostname providing the service, fully qualified (`"."` for
    /// "service not available").
    pub target: String,
}

/// One CAA value: `{flags, tag, value}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaaValue {
    /// Issuer critical flag (0 or 128).
    pub flags: u8,
    /// Property tag (`"issue"`, `"issuewild"`, or `"iodef"`).
    pub tag: String,
    /// CA domain or reporting URI.
    pub value: String,
}

/// Type-tagged record values.
///
/// Multi-value types carry every value of the grouped record; single-value
/// types (CNAME, ALIAS, PTR) carry exactly one target by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// A record values.
    A {
        /// IPv4 addresses.
        addresses: Vec<String>,
    },
    /// AAAA record values.
    AAAA {
        /// IPv6 addresses.
        addresses: Vec<String>,
    },
    /// ALIAS record value.
    ALIAS {
        /// Target hostname, fully qualified.
        target: String,
    },
    /// CAA record values.
    CAA {
        /// CAA property values.
        values: Vec<CaaValue>,
    },
    /// CNAME record value.
    CNAME {
        /// Target hostname, fully qualified.
        target: String,
    },
    /// MX record values.
    MX {
        /// Mail exchange values.
        values: Vec<MxValue>,
    },
    /// NS record values.
    NS {
        /// Name server hostnames, fully qualified.
        nameservers: Vec<String>,
    },
    /// PTR record value.
    PTR {
        /// Target hostname, fully qualified.
        target: String,
    },
    /// SRV record values.
    SRV {
        /// Service locator values.
        values: Vec<SrvValue>,
    },
    /// TXT record values.
    TXT {
        /// Raw (unquoted, unescaped) text values.
        texts: Vec<String>,
    },
}

impl RecordData {
    /// Returns the [`RecordType`] discriminant for this data.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A { .. } => RecordType::A,
            Self::AAAA { .. } => RecordType::Aaaa,
            Self::ALIAS { .. } => RecordType::Alias,
            Self::CAA { .. } => RecordType::Caa,
            Self::CNAME { .. } => RecordType::Cname,
            Self::MX { .. } => RecordType::Mx,
            Self::NS { .. } => RecordType::Ns,
            Self::PTR { .. } => RecordType::Ptr,
            Self::SRV { .. } => RecordType::Srv,
            Self::TXT { .. } => RecordType::Txt,
        }
    }

    /// Number of values carried.
    #[must_use]
    pub fn value_count(&self) -> usize {
        match self {
            Self::A { addresses } | Self::AAAA { addresses } => addresses.len(),
            Self::ALIAS { .. } | Self::CNAME { .. } | Self::PTR { .. } => 1,
            Self::CAA { values } => values.len(),
            Self::MX { values } => values.len(),
            Self::NS { nameservers } => nameservers.len(),
            Self::SRV { values } => values.len(),
            Self::TXT { texts } => texts.len(),
        }
    }

    /// Order-insensitive value equality.
    ///
    /// Two data sets of the same type compare equal if they contain the same
    /// values, regardless of the order the API (or the caller) listed them
    /// in. Different types never compare equal.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        fn sorted<T: Ord + Clone>(v: &[T]) -> Vec<T> {
            let mut s = v.to_vec();
            s.sort();
            s
        }

        match (self, other) {
            (Self::A { addresses: a }, Self::A { addresses: b })
            | (Self::AAAA { addresses: a }, Self::AAAA { addresses: b })
            | (Self::NS { nameservers: a }, Self::NS { nameservers: b })
            | (Self::TXT { texts: a }, Self::TXT { texts: b }) => sorted(a) == sorted(b),
            (Self::ALIAS { target: a }, Self::ALIAS { target: b })
            | (Self::CNAME { target: a }, Self::CNAME { target: b })
            | (Self::PTR { target: a }, Self::PTR { target: b }) => a == b,
            (Self::CAA { values: a }, Self::CAA { values: b }) => sorted(a) == sorted(b),
            (Self::MX { values: a }, Self::MX { values: b }) => sorted(a) == sorted(b),
            (Self::SRV { values: a }, Self::SRV { values: b }) => sorted(a) == sorted(b),
            _ => false,
        }
    }
}

/// A DNS record in the canonical model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Fully-qualified record name, trailing dot included
    /// (e.g. `"www.example.com."`).
    pub fqdn: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Type-tagged values.
    pub data: RecordData,
}

impl CanonicalRecord {
    /// Returns the record type discriminant.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Reconciliation key: `(fqdn, type)` is unique within one zone.
    #[must_use]
    pub fn key(&self) -> (&str, RecordType) {
        (&self.fqdn, self.record_type())
    }
}
