//! Domain façade: order search, details, availability and nameservers.

mod types;

use serde_json::Value;

use crate::client::{QueryParams, ResellerClient};
use crate::customer::scalar_id;
use crate::error::{ResellerError, Result};
use crate::error_mapper::ErrorContext;
use crate::normalize::{
    collect_nameservers, fill_missing_key, flatten_numbered, strip_key_prefixes,
};
use crate::types::{ApiMessage, Page};

pub use types::{
    Availability, DomainDetails, DomainSearchParams, DomainSummary, MAX_NAMESERVERS,
};

const MIN_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 500;

/// Table prefixes on `domains/search.json` rows.
const SEARCH_PREFIXES: &[&str] = &["entity.", "orders."];

/// Domain order operations, obtained from [`ResellerClient::domains`].
#[derive(Debug, Clone, Copy)]
pub struct DomainApi<'a> {
    client: &'a ResellerClient,
}

impl<'a> DomainApi<'a> {
    pub(crate) fn new(client: &'a ResellerClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, query: &DomainSearchParams) -> Result<Page<DomainSummary>> {
        let pagination = query.pagination.validated(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

        let mut params = QueryParams::new()
            .with("no-of-records", pagination.page_size)
            .with("page-no", pagination.page);
        params.push_opt("domain-name", query.domain_name.as_deref());
        params.push_opt("customer-id", query.customer_id.as_deref());
        params.push_opt("status", query.status.as_deref());

        let ctx = query
            .domain_name
            .as_deref()
            .map(ErrorContext::domain)
            .unwrap_or_default();
        let value: Value = self
            .client
            .get_with("domains/search.json", &params, ctx)
            .await?;

        flatten_numbered(value)?.into_page(pagination.page, pagination.page_size, |row| {
            fill_missing_key(
                strip_key_prefixes(row, SEARCH_PREFIXES),
                "description",
                "domainname",
            )
        })
    }

    /// Order details by order id.
    pub async fn details(&self, order_id: &str) -> Result<DomainDetails> {
        require("order-id", order_id)?;
        let params = QueryParams::new()
            .with("order-id", order_id)
            .with("options", "All");
        let value: Value = self
            .client
            .get_with("domains/details.json", &params, ErrorContext::domain(order_id))
            .await?;
        decode_details(value)
    }

    /// Order details by domain name.
    pub async fn details_by_name(&self, domain_name: &str) -> Result<DomainDetails> {
        require("domain-name", domain_name)?;
        let params = QueryParams::new()
            .with("domain-name", domain_name)
            .with("options", "All");
        let value: Value = self
            .client
            .get_with(
                "domains/details-by-name.json",
                &params,
                ErrorContext::domain(domain_name),
            )
            .await?;
        decode_details(value)
    }

    /// Order id of a registered domain.
    pub async fn order_id(&self, domain_name: &str) -> Result<String> {
        require("domain-name", domain_name)?;
        let params = QueryParams::new().with("domain-name", domain_name);
        let value: Value = self
            .client
            .get_with("domains/orderid.json", &params, ErrorContext::domain(domain_name))
            .await?;
        scalar_id(&value)
            .ok_or_else(|| ResellerError::parse(format!("orderid.json returned {value}")))
    }

    /// Check every `name` under every TLD in one call.
    ///
    /// `names` are second-level labels (`example`), `tlds` come with or
    /// without the leading dot.
    pub async fn check_availability(
        &self,
        names: &[String],
        tlds: &[String],
    ) -> Result<Vec<Availability>> {
        if names.is_empty() || names.iter().any(|n| n.trim().is_empty()) {
            return Err(ResellerError::invalid_parameter(
                "domain-name",
                "at least one non-empty name is required",
            ));
        }
        if tlds.is_empty() || tlds.iter().any(|t| t.trim_start_matches('.').trim().is_empty()) {
            return Err(ResellerError::invalid_parameter(
                "tlds",
                "at least one non-empty TLD is required",
            ));
        }

        let mut params = QueryParams::new();
        params.extend_repeated("domain-name", names.iter().map(|n| n.trim()));
        params.extend_repeated("tlds", tlds.iter().map(|t| t.trim().trim_start_matches('.')));

        let value: Value = self
            .client
            .get_with("domains/available.json", &params, ErrorContext::default())
            .await?;
        parse_availability(value)
    }

    /// Replace the nameservers of an order (1 to [`MAX_NAMESERVERS`]).
    pub async fn modify_nameservers(
        &self,
        order_id: &str,
        nameservers: &[String],
    ) -> Result<ApiMessage> {
        require("order-id", order_id)?;
        if nameservers.is_empty() || nameservers.len() > MAX_NAMESERVERS {
            return Err(ResellerError::invalid_parameter(
                "ns",
                format!(
                    "between 1 and {MAX_NAMESERVERS} nameservers are required, got {}",
                    nameservers.len()
                ),
            ));
        }
        if nameservers.iter().any(|ns| ns.trim().is_empty()) {
            return Err(ResellerError::invalid_parameter(
                "ns",
                "nameserver names must not be empty",
            ));
        }

        let mut params = QueryParams::new().with("order-id", order_id);
        params.extend_repeated("ns", nameservers.iter().map(|ns| ns.trim()));

        let value: Value = self
            .client
            .post_with("domains/modify-ns.json", &params, ErrorContext::domain(order_id))
            .await?;
        log::info!(
            "Set {} nameservers on order {order_id}",
            nameservers.len()
        );
        Ok(ApiMessage::from_value(&value))
    }
}

fn require(param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ResellerError::invalid_parameter(param, "must not be empty"));
    }
    Ok(())
}

/// Details bodies name the domain in `domainname`, `description` or both.
fn decode_details(value: Value) -> Result<DomainDetails> {
    let value = fill_missing_key(value, "domainname", "description");
    let details: DomainDetails = serde_json::from_value(value).map_err(ResellerError::parse)?;
    Ok(with_nameservers(details))
}

/// Move `ns1`..`nsN` out of `extra` into `nameservers`.
fn with_nameservers(mut details: DomainDetails) -> DomainDetails {
    if details.nameservers.is_empty() {
        details.nameservers = collect_nameservers(&details.extra);
    }
    details.extra.retain(|key, _| {
        key.strip_prefix("ns")
            .is_none_or(|n| n.parse::<u32>().is_err())
    });
    details
}

/// `{"example.com": {"status": "available", "classkey": "domcno"}, ...}`
fn parse_availability(value: Value) -> Result<Vec<Availability>> {
    let Value::Object(obj) = value else {
        return Err(ResellerError::parse(format!(
            "expected an availability object, got {value}"
        )));
    };

    let mut out: Vec<Availability> = obj
        .into_iter()
        .filter_map(|(domain, entry)| {
            let entry = entry.as_object()?;
            let status = entry.get("status")?.as_str()?.to_string();
            let class_key = entry
                .get("classkey")
                .and_then(Value::as_str)
                .map(ToString::to_string);
            Some(Availability {
                domain,
                status,
                class_key,
            })
        })
        .collect();
    out.sort_by(|a, b| a.domain.cmp(&b.domain));
    Ok(out)
}
