//! DNS record types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResellerError;
use crate::normalize::string_or_number;
use crate::types::PaginationParams;

/// Smallest TTL the API accepts, in seconds.
pub const MIN_TTL: u32 = 7200;

/// Record types managed through the DNS API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DnsRecordType {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
    #[serde(rename = "CNAME")]
    Cname,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "NS")]
    Ns,
    #[serde(rename = "TXT")]
    Txt,
    #[serde(rename = "SRV")]
    Srv,
    #[serde(rename = "SOA")]
    Soa,
}

impl DnsRecordType {
    /// Every supported type.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Txt,
        Self::Srv,
        Self::Soa,
    ];

    /// Uppercase type name, as used by `search-records.json`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Soa => "SOA",
        }
    }

    /// Segment used in `add-{segment}-record.json` style endpoints.
    pub fn endpoint_segment(self) -> &'static str {
        match self {
            Self::A => "ipv4",
            Self::Aaaa => "ipv6",
            Self::Cname => "cname",
            Self::Mx => "mx",
            Self::Ns => "ns",
            Self::Txt => "txt",
            Self::Srv => "srv",
            Self::Soa => "soa",
        }
    }

    /// Whether the API wants a `priority` for this type.
    pub fn requires_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnsRecordType {
    type Err = ResellerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" | "IPV4" => Ok(Self::A),
            "AAAA" | "IPV6" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "TXT" => Ok(Self::Txt),
            "SRV" => Ok(Self::Srv),
            "SOA" => Ok(Self::Soa),
            _ => Err(ResellerError::UnsupportedRecordType {
                record_type: s.to_string(),
            }),
        }
    }
}

/// A DNS record as returned by `search-records.json`.
///
/// Numeric fields are kept as the strings the API sends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsRecord {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub value: String,
    /// Remote `timetolive`.
    #[serde(
        rename(deserialize = "timetolive"),
        deserialize_with = "string_or_number::deserialize"
    )]
    pub ttl: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    #[serde(default)]
    pub status: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub priority: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub port: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub weight: Option<String>,
}

impl DnsRecord {
    /// TTL in seconds, when the API sent a number.
    pub fn ttl_seconds(&self) -> Option<u32> {
        self.ttl.trim().parse().ok()
    }
}

/// Query for `search-records.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSearchParams {
    pub domain_name: String,
    /// The API searches one type at a time.
    pub record_type: DnsRecordType,
    /// Exact host filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Exact value filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub pagination: PaginationParams,
}

impl RecordSearchParams {
    pub fn new(domain_name: impl Into<String>, record_type: DnsRecordType) -> Self {
        Self {
            domain_name: domain_name.into(),
            record_type,
            host: None,
            value: None,
            pagination: PaginationParams::default(),
        }
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.pagination = PaginationParams::new(page, page_size);
        self
    }
}

/// Request to add one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddRecordRequest {
    pub domain_name: String,
    pub record_type: DnsRecordType,
    /// Relative host; empty or `@` for the zone apex.
    pub host: String,
    pub value: String,
    /// Seconds, at least [`MIN_TTL`]. The API default applies when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// MX and SRV only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// SRV only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// SRV only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
}

impl AddRecordRequest {
    pub fn new(
        domain_name: impl Into<String>,
        record_type: DnsRecordType,
        host: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            record_type,
            host: host.into(),
            value: value.into(),
            ttl: None,
            priority: None,
            port: None,
            weight: None,
        }
    }

    #[must_use]
    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// SRV priority, weight and port in one go.
    #[must_use]
    pub fn srv(mut self, priority: u16, weight: u16, port: u16) -> Self {
        self.priority = Some(priority);
        self.weight = Some(weight);
        self.port = Some(port);
        self
    }
}

/// Request to change the value (and optionally TTL/extras) of one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRecordRequest {
    pub domain_name: String,
    pub record_type: DnsRecordType,
    pub host: String,
    pub current_value: String,
    pub new_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
}

/// Request to delete one record.
///
/// Records are addressed by host and value; SRV additionally by port,
/// priority and weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteRecordRequest {
    pub domain_name: String,
    pub record_type: DnsRecordType,
    pub host: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
}

/// New SOA timers for a zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoaUpdate {
    pub domain_name: String,
    /// Zone contact e-mail.
    pub responsible_person: String,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    /// Minimum TTL of the zone, at least [`MIN_TTL`].
    pub ttl: u32,
}
