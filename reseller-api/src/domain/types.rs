//! Domain order types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::normalize::string_or_number;
use crate::types::PaginationParams;
use crate::utils::datetime::parse_epoch_opt;

/// Most nameservers a registration accepts.
pub const MAX_NAMESERVERS: usize = 13;

/// A row of `domains/search.json`, prefixes already stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainSummary {
    #[serde(rename = "orderid", deserialize_with = "string_or_number::deserialize")]
    pub order_id: String,
    /// Search rows carry the name in `description`.
    #[serde(rename = "description", default)]
    pub domain_name: String,
    #[serde(rename = "currentstatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        rename = "customerid",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub customer_id: Option<String>,
    #[serde(
        rename = "creationtime",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub creation_time: Option<String>,
    #[serde(
        rename = "endtime",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub end_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomainSummary {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch_opt(self.creation_time.as_deref())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch_opt(self.end_time.as_deref())
    }
}

/// Full order details from `domains/details.json` with `options=All`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainDetails {
    #[serde(rename = "orderid", deserialize_with = "string_or_number::deserialize")]
    pub order_id: String,
    #[serde(rename = "domainname", default)]
    pub domain_name: String,
    #[serde(rename = "currentstatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Locks and holds on the order (`resellerlock`, `transferlock`, ...).
    #[serde(rename = "orderstatus", default, deserialize_with = "string_list")]
    pub order_status: Vec<String>,
    #[serde(
        rename = "customerid",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub customer_id: Option<String>,
    #[serde(
        rename = "creationtime",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub creation_time: Option<String>,
    #[serde(
        rename = "endtime",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub end_time: Option<String>,
    /// Filled from `ns1`..`nsN`.
    #[serde(default)]
    pub nameservers: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomainDetails {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch_opt(self.creation_time.as_deref())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch_opt(self.end_time.as_deref())
    }
}

/// Filters for `domains/search.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainSearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// `Active`, `InActive`, `Suspended`, `Pending Delete Restorable`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub pagination: PaginationParams,
}

/// Availability of one name under one TLD.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Availability {
    /// Fully qualified name, e.g. `example.com`.
    pub domain: String,
    /// `available`, `regthroughus`, `regthroughothers`, `unknown`.
    pub status: String,
    /// Product key of the TLD (`domcno`, `dotnet`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_key: Option<String>,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        self.status.eq_ignore_ascii_case("available")
    }
}

/// `"a"`, `["a", "b"]` or `null` into a list.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(Raw::One(s)) => vec![s],
        Some(Raw::Many(v)) => v,
        None => Vec::new(),
    })
}
