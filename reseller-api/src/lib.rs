//! # reseller-api
//!
//! Typed client for a domain registrar's Reseller HTTP API: DNS zone
//! management, customer accounts and domain orders.
//!
//! The remote API has a few habits this crate smooths over:
//!
//! - credentials travel as `auth-userid` / `api-key` query parameters on
//!   every call, including POSTs;
//! - failures may arrive with HTTP 200 and `{"status": "ERROR", "message": ...}`;
//! - list endpoints return an object keyed `"1"`, `"2"`, ... next to
//!   `recsonpage` / `recsindb` counters, with columns prefixed by table name
//!   (`entity.`, `orders.`, `customer.`);
//! - numbers are usually sent as strings.
//!
//! Results come back as plain structs and [`Page<T>`], failures as
//! [`ResellerError`].
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reseller_api::{DnsRecordType, RecordSearchParams, ResellerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // RESELLER_AUTH_USERID / RESELLER_API_KEY, RESELLER_SANDBOX=1 for the test endpoint
//!     let client = ResellerClient::from_env()?;
//!
//!     let query = RecordSearchParams::new("example.com", DnsRecordType::A).page(1, 50);
//!     let page = client.dns().search_records(&query).await?;
//!     for record in &page.items {
//!         println!("{} -> {} (ttl {})", record.host, record.value, record.ttl);
//!     }
//!
//!     let order = client.domains().details_by_name("example.com").await?;
//!     println!("nameservers: {:?}", order.nameservers);
//!     Ok(())
//! }
//! ```
//!
//! ## Adding Records
//!
//! ```rust,no_run
//! # use reseller_api::*;
//! # async fn example(client: &ResellerClient) -> Result<()> {
//! let request = AddRecordRequest::new("example.com", DnsRecordType::Mx, "", "mail.example.com")
//!     .ttl(14_400)
//!     .priority(10);
//! client.dns().add_record(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ResellerError>`](ResellerError).
//! Input is checked before any request is sent: TTLs below [`MIN_TTL`],
//! SOA adds/deletes and MX/SRV records without their extra fields fail early.
//!
//! - [`ResellerError::InvalidCredentials`] — authentication failed
//! - [`ResellerError::DomainNotFound`] — unknown domain or order
//! - [`ResellerError::RateLimited`] — too many requests (retryable)
//! - [`ResellerError::NetworkError`] — network connectivity issue (retryable)
//!
//! Read-only calls retry transient errors with exponential backoff. Writes
//! are sent once.

mod client;
mod config;
mod customer;
mod dns;
mod domain;
mod error;
mod error_mapper;
mod http_client;
pub mod normalize;
mod types;
mod utils;

pub use client::{QueryParams, ResellerClient};

pub use config::{
    DEFAULT_MAX_RETRIES, Environment, LIVE_BASE_URL, ResellerConfig, ResellerConfigBuilder,
    SANDBOX_BASE_URL, env_vars,
};

pub use error::{ResellerError, Result};

pub use types::{ApiMessage, BatchFailure, BatchResult, BatchSuccess, Page, PaginationParams};

pub use dns::{
    AddRecordRequest, DeleteRecordRequest, DnsApi, DnsRecord, DnsRecordType, MIN_TTL,
    RecordSearchParams, SoaUpdate, UpdateRecordRequest,
};

pub use customer::{Customer, CustomerApi, CustomerSearchParams, CustomerSignup};

pub use domain::{
    Availability, DomainApi, DomainDetails, DomainSearchParams, DomainSummary, MAX_NAMESERVERS,
};

pub use utils::datetime;
