//! MCP tool parameter schemas
//!
//! Defines the input parameter structures for all MCP tools.
//! All structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.

use schemars::JsonSchema;
use serde::Deserialize;

// ============ DNS ============

/// Parameters for `dns_search_records` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsSearchRecordsParams {
    #[schemars(description = "Zone to search, e.g. example.com")]
    pub domain_name: String,

    #[schemars(description = "Record type: A, AAAA, CNAME, MX, NS, TXT, SRV or SOA")]
    pub record_type: String,

    #[schemars(description = "Only records with this host")]
    pub host: Option<String>,

    #[schemars(description = "Only records with this value")]
    pub value: Option<String>,

    /// Page number (1-indexed, default: 1).
    #[schemars(description = "Page number (1-indexed, default: 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Records per page, 10 to 50 (default: 50)")]
    pub page_size: Option<u32>,
}

/// Parameters for `dns_add_record` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsAddRecordParams {
    #[schemars(description = "Zone to add the record to")]
    pub domain_name: String,

    #[schemars(description = "Record type: A, AAAA, CNAME, MX, NS, TXT or SRV")]
    pub record_type: String,

    #[schemars(description = "Host relative to the zone; omit or empty for the apex")]
    #[serde(default)]
    pub host: String,

    #[schemars(description = "Record value (address, target, text)")]
    pub value: String,

    #[schemars(description = "TTL in seconds, at least 7200")]
    pub ttl: Option<u32>,

    #[schemars(description = "Priority, required for MX and SRV")]
    pub priority: Option<u16>,

    #[schemars(description = "Port, required for SRV")]
    pub port: Option<u16>,

    #[schemars(description = "Weight, required for SRV")]
    pub weight: Option<u16>,
}

/// Parameters for `dns_update_record` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsUpdateRecordParams {
    pub domain_name: String,

    #[schemars(description = "Record type: A, AAAA, CNAME, MX, NS, TXT or SRV")]
    pub record_type: String,

    #[serde(default)]
    pub host: String,

    #[schemars(description = "Value the record has now")]
    pub current_value: String,

    #[schemars(description = "Value to set")]
    pub new_value: String,

    #[schemars(description = "TTL in seconds, at least 7200")]
    pub ttl: Option<u32>,

    pub priority: Option<u16>,
    pub port: Option<u16>,
    pub weight: Option<u16>,
}

/// Parameters for `dns_delete_record` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsDeleteRecordParams {
    pub domain_name: String,

    #[schemars(description = "Record type: A, AAAA, CNAME, MX, NS, TXT or SRV")]
    pub record_type: String,

    #[serde(default)]
    pub host: String,

    #[schemars(description = "Value of the record to delete")]
    pub value: String,

    #[schemars(description = "SRV only")]
    pub priority: Option<u16>,
    #[schemars(description = "SRV only")]
    pub port: Option<u16>,
    #[schemars(description = "SRV only")]
    pub weight: Option<u16>,
}

/// Parameters for `dns_update_soa` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsUpdateSoaParams {
    pub domain_name: String,

    #[schemars(description = "Zone contact e-mail")]
    pub responsible_person: String,

    #[schemars(description = "Refresh interval in seconds")]
    pub refresh: u32,

    #[schemars(description = "Retry interval in seconds")]
    pub retry: u32,

    #[schemars(description = "Expiry in seconds")]
    pub expire: u32,

    #[schemars(description = "Minimum TTL in seconds, at least 7200")]
    pub ttl: u32,
}

/// Parameters for `dns_activate` and `domain_get_details`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OrderIdParams {
    #[schemars(description = "Domain order id")]
    pub order_id: String,
}

// ============ Customers ============

/// Parameters for `customer_get_by_username` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CustomerUsernameParams {
    #[schemars(description = "Customer login e-mail")]
    pub username: String,
}

/// Parameters for `customer_get_by_id` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CustomerIdParams {
    #[schemars(description = "Numeric customer id")]
    pub customer_id: String,
}

/// Parameters for `customer_search` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CustomerSearchToolParams {
    pub username: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    #[schemars(description = "ISO 3166-1 alpha-2 country code")]
    pub country: Option<String>,
    #[schemars(description = "Active, Suspended or Deleted")]
    pub status: Option<String>,

    /// Page number (1-indexed, default: 1).
    #[schemars(description = "Page number (1-indexed, default: 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Customers per page, 10 to 500 (default: 25)")]
    pub page_size: Option<u32>,
}

// ============ Domains ============

/// Parameters for `domain_search` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DomainSearchToolParams {
    #[schemars(description = "Only orders for this domain name")]
    pub domain_name: Option<String>,
    #[schemars(description = "Only orders of this customer id")]
    pub customer_id: Option<String>,
    #[schemars(description = "Order status, e.g. Active or InActive")]
    pub status: Option<String>,

    /// Page number (1-indexed, default: 1).
    #[schemars(description = "Page number (1-indexed, default: 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Orders per page, 10 to 500 (default: 25)")]
    pub page_size: Option<u32>,
}

/// Parameters for `domain_get_details_by_name` and `domain_get_order_id`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DomainNameParams {
    #[schemars(description = "Registered domain name, e.g. example.com")]
    pub domain_name: String,
}

/// Parameters for `domain_check_availability` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DomainAvailabilityParams {
    #[schemars(description = "Labels to check without TLD, e.g. [\"example\"]")]
    pub names: Vec<String>,

    #[schemars(description = "TLDs to check, e.g. [\"com\", \"net\"]")]
    pub tlds: Vec<String>,
}

/// Parameters for `domain_modify_nameservers` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DomainModifyNameserversParams {
    #[schemars(description = "Domain order id")]
    pub order_id: String,

    #[schemars(description = "1 to 13 nameserver host names")]
    pub nameservers: Vec<String>,
}
