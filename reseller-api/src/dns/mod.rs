//! DNS façade: zone activation and record management.

mod types;

use serde_json::Value;

use crate::client::{QueryParams, ResellerClient};
use crate::error::{ResellerError, Result};
use crate::error_mapper::ErrorContext;
use crate::normalize::{fill_missing_key, flatten_numbered};
use crate::types::{ApiMessage, BatchFailure, BatchResult, BatchSuccess, Page};

pub use types::{
    AddRecordRequest, DeleteRecordRequest, DnsRecord, DnsRecordType, MIN_TTL, RecordSearchParams,
    SoaUpdate, UpdateRecordRequest,
};

/// `no-of-records` bounds of `search-records.json`
const MIN_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 50;

/// DNS operations, obtained from [`ResellerClient::dns`].
#[derive(Debug, Clone, Copy)]
pub struct DnsApi<'a> {
    client: &'a ResellerClient,
}

impl<'a> DnsApi<'a> {
    pub(crate) fn new(client: &'a ResellerClient) -> Self {
        Self { client }
    }

    /// Activate the DNS service of a domain order.
    pub async fn activate(&self, order_id: &str) -> Result<ApiMessage> {
        require("order-id", order_id)?;
        let params = QueryParams::new().with("order-id", order_id);
        let value: Value = self
            .client
            .post_with("dns/activate.json", &params, ErrorContext::domain(order_id))
            .await?;
        log::info!("Activated DNS for order {order_id}");
        Ok(ApiMessage::from_value(&value))
    }

    /// Search records of one type in a zone.
    pub async fn search_records(&self, query: &RecordSearchParams) -> Result<Page<DnsRecord>> {
        require("domain-name", &query.domain_name)?;
        let pagination = query.pagination.validated(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

        let mut params = QueryParams::new()
            .with("domain-name", &query.domain_name)
            .with("type", query.record_type.as_str())
            .with("no-of-records", pagination.page_size)
            .with("page-no", pagination.page);
        params.push_opt("host", query.host.as_deref());
        params.push_opt("value", query.value.as_deref());

        let value: Value = self
            .client
            .get_with(
                "dns/manage/search-records.json",
                &params,
                ErrorContext::domain(&query.domain_name),
            )
            .await?;

        flatten_numbered(value)?.into_page(pagination.page, pagination.page_size, |row| {
            fill_missing_key(row, "timetolive", "ttl")
        })
    }

    /// Add one record. SOA records cannot be added.
    pub async fn add_record(&self, req: &AddRecordRequest) -> Result<ApiMessage> {
        reject_soa(req.record_type, "added")?;
        require("domain-name", &req.domain_name)?;
        require("value", &req.value)?;
        validate_ttl(req.ttl)?;
        validate_extras(req.record_type, req.priority, req.port, req.weight)?;

        let mut params = QueryParams::new()
            .with("domain-name", &req.domain_name)
            .with("host", &req.host)
            .with("value", &req.value);
        params.push_opt("ttl", req.ttl);
        push_extras(&mut params, req.record_type, req.priority, req.port, req.weight);

        let path = format!(
            "dns/manage/add-{}-record.json",
            req.record_type.endpoint_segment()
        );
        let value: Value = self
            .client
            .post_with(&path, &params, ErrorContext::record(&req.domain_name, &req.host))
            .await?;
        log::info!(
            "Added {} record '{}' to {}",
            req.record_type,
            req.host,
            req.domain_name
        );
        Ok(ApiMessage::from_value(&value))
    }

    /// Add several records concurrently, collecting per-item outcomes.
    pub async fn add_records(&self, requests: &[AddRecordRequest]) -> BatchResult {
        let futures: Vec<_> = requests.iter().map(|req| self.add_record(req)).collect();
        let results = futures::future::join_all(futures).await;

        let mut succeeded = Vec::new();
        let mut failures = Vec::new();

        for (i, (req, result)) in requests.iter().zip(results).enumerate() {
            match result {
                Ok(message) => succeeded.push(BatchSuccess {
                    request_index: i,
                    host: req.host.clone(),
                    message,
                }),
                Err(e) => {
                    log::warn!("Batch add of '{}' failed: {e}", req.host);
                    failures.push(BatchFailure {
                        request_index: i,
                        host: req.host.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        BatchResult {
            success_count: succeeded.len(),
            failed_count: failures.len(),
            succeeded,
            failures,
        }
    }

    /// Replace the value of a record. SOA goes through [`update_soa`](Self::update_soa).
    pub async fn update_record(&self, req: &UpdateRecordRequest) -> Result<ApiMessage> {
        if req.record_type == DnsRecordType::Soa {
            return Err(ResellerError::UnsupportedRecordType {
                record_type: "SOA (use update_soa)".to_string(),
            });
        }
        require("domain-name", &req.domain_name)?;
        require("current-value", &req.current_value)?;
        require("new-value", &req.new_value)?;
        validate_ttl(req.ttl)?;
        validate_extras(req.record_type, req.priority, req.port, req.weight)?;

        let mut params = QueryParams::new()
            .with("domain-name", &req.domain_name)
            .with("host", &req.host)
            .with("current-value", &req.current_value)
            .with("new-value", &req.new_value);
        params.push_opt("ttl", req.ttl);
        push_extras(&mut params, req.record_type, req.priority, req.port, req.weight);

        let path = format!(
            "dns/manage/update-{}-record.json",
            req.record_type.endpoint_segment()
        );
        let value: Value = self
            .client
            .post_with(&path, &params, ErrorContext::record(&req.domain_name, &req.host))
            .await?;
        log::info!(
            "Updated {} record '{}' in {}",
            req.record_type,
            req.host,
            req.domain_name
        );
        Ok(ApiMessage::from_value(&value))
    }

    /// Change the SOA timers of a zone.
    pub async fn update_soa(&self, req: &SoaUpdate) -> Result<ApiMessage> {
        require("domain-name", &req.domain_name)?;
        require("responsible-person", &req.responsible_person)?;
        validate_ttl(Some(req.ttl))?;

        let params = QueryParams::new()
            .with("domain-name", &req.domain_name)
            .with("responsible-person", &req.responsible_person)
            .with("refresh", req.refresh)
            .with("retry", req.retry)
            .with("expire", req.expire)
            .with("ttl", req.ttl);

        let value: Value = self
            .client
            .post_with(
                "dns/manage/update-soa-record.json",
                &params,
                ErrorContext::domain(&req.domain_name),
            )
            .await?;
        log::info!("Updated SOA of {}", req.domain_name);
        Ok(ApiMessage::from_value(&value))
    }

    /// Delete one record. SOA records cannot be deleted.
    pub async fn delete_record(&self, req: &DeleteRecordRequest) -> Result<ApiMessage> {
        reject_soa(req.record_type, "deleted")?;
        require("domain-name", &req.domain_name)?;
        require("value", &req.value)?;
        if req.record_type == DnsRecordType::Srv {
            validate_extras(req.record_type, req.priority, req.port, req.weight)?;
        }

        let mut params = QueryParams::new()
            .with("domain-name", &req.domain_name)
            .with("host", &req.host)
            .with("value", &req.value);
        if req.record_type == DnsRecordType::Srv {
            push_extras(&mut params, req.record_type, req.priority, req.port, req.weight);
        }

        let path = format!(
            "dns/manage/delete-{}-record.json",
            req.record_type.endpoint_segment()
        );
        let value: Value = self
            .client
            .post_with(&path, &params, ErrorContext::record(&req.domain_name, &req.host))
            .await?;
        log::info!(
            "Deleted {} record '{}' from {}",
            req.record_type,
            req.host,
            req.domain_name
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

/// The zone has exactly one SOA, created and removed with the zone itself.
fn reject_soa(record_type: DnsRecordType, action: &str) -> Result<()> {
    if record_type == DnsRecordType::Soa {
        log::warn!("Refusing SOA record: SOA records cannot be {action}");
        return Err(ResellerError::UnsupportedRecordType {
            record_type: format!("SOA (SOA records cannot be {action})"),
        });
    }
    Ok(())
}

pub(crate) fn validate_ttl(ttl: Option<u32>) -> Result<()> {
    match ttl {
        Some(ttl) if ttl < MIN_TTL => Err(ResellerError::invalid_parameter(
            "ttl",
            format!("must be at least {MIN_TTL} seconds, got {ttl}"),
        )),
        _ => Ok(()),
    }
}

fn validate_extras(
    record_type: DnsRecordType,
    priority: Option<u16>,
    port: Option<u16>,
    weight: Option<u16>,
) -> Result<()> {
    if record_type.requires_priority() && priority.is_none() {
        return Err(ResellerError::invalid_parameter(
            "priority",
            format!("{record_type} records require a priority"),
        ));
    }
    if record_type == DnsRecordType::Srv {
        if port.is_none() {
            return Err(ResellerError::invalid_parameter(
                "port",
                "SRV records require a port",
            ));
        }
        if weight.is_none() {
            return Err(ResellerError::invalid_parameter(
                "weight",
                "SRV records require a weight",
            ));
        }
    }
    Ok(())
}

/// Only the parameters the record type's endpoint understands are sent.
fn push_extras(
    params: &mut QueryParams,
    record_type: DnsRecordType,
    priority: Option<u16>,
    port: Option<u16>,
    weight: Option<u16>,
) {
    match record_type {
        DnsRecordType::Mx => params.push_opt("priority", priority),
        DnsRecordType::Srv => {
            params.push_opt("priority", priority);
            params.push_opt("port", port);
            params.push_opt("weight", weight);
        }
        _ => {}
    }
}
