//! MCP Server implementation for the Reseller API.
//!
//! Exposes DNS, customer and domain façade calls as tools for AI agents.

use async_trait::async_trait;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tokio::time::{Duration, timeout};

use reseller_api::{
    AddRecordRequest, ApiMessage, Availability, Customer, CustomerSearchParams,
    DeleteRecordRequest, DnsRecord, DnsRecordType, DomainDetails, DomainSearchParams,
    DomainSummary, Page, PaginationParams, RecordSearchParams, ResellerClient, ResellerError,
    SoaUpdate, UpdateRecordRequest,
};

use crate::schemas::{
    CustomerIdParams, CustomerSearchToolParams, CustomerUsernameParams, DnsAddRecordParams,
    DnsDeleteRecordParams, DnsSearchRecordsParams, DnsUpdateRecordParams, DnsUpdateSoaParams,
    DomainAvailabilityParams, DomainModifyNameserversParams, DomainNameParams,
    DomainSearchToolParams, OrderIdParams,
};

type ApiResult<T> = reseller_api::Result<T>;

// Timeouts cover the client's own retries
const READ_TIMEOUT_SECS: u64 = 90;
const WRITE_TIMEOUT_SECS: u64 = 45;

/// DNS search pages are capped lower than customer and domain searches.
const DNS_DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Clone, Copy)]
struct ToolTimeouts {
    read: Duration,
    write: Duration,
}

impl Default for ToolTimeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(READ_TIMEOUT_SECS),
            write: Duration::from_secs(WRITE_TIMEOUT_SECS),
        }
    }
}

/// The façade calls the tools need, behind a trait so tests can swap the API out.
#[async_trait]
trait ResellerGateway: Send + Sync {
    async fn search_records(&self, query: &RecordSearchParams) -> ApiResult<Page<DnsRecord>>;
    async fn add_record(&self, req: &AddRecordRequest) -> ApiResult<ApiMessage>;
    async fn update_record(&self, req: &UpdateRecordRequest) -> ApiResult<ApiMessage>;
    async fn delete_record(&self, req: &DeleteRecordRequest) -> ApiResult<ApiMessage>;
    async fn update_soa(&self, req: &SoaUpdate) -> ApiResult<ApiMessage>;
    async fn activate_dns(&self, order_id: &str) -> ApiResult<ApiMessage>;

    async fn customer_by_username(&self, username: &str) -> ApiResult<Customer>;
    async fn customer_by_id(&self, customer_id: &str) -> ApiResult<Customer>;
    async fn search_customers(&self, query: &CustomerSearchParams) -> ApiResult<Page<Customer>>;

    async fn search_domains(&self, query: &DomainSearchParams) -> ApiResult<Page<DomainSummary>>;
    async fn domain_details(&self, order_id: &str) -> ApiResult<DomainDetails>;
    async fn domain_details_by_name(&self, domain_name: &str) -> ApiResult<DomainDetails>;
    async fn domain_order_id(&self, domain_name: &str) -> ApiResult<String>;
    async fn check_availability(
        &self,
        names: &[String],
        tlds: &[String],
    ) -> ApiResult<Vec<Availability>>;
    async fn modify_nameservers(
        &self,
        order_id: &str,
        nameservers: &[String],
    ) -> ApiResult<ApiMessage>;
}

struct ClientGateway {
    client: ResellerClient,
}

#[async_trait]
impl ResellerGateway for ClientGateway {
    async fn search_records(&self, query: &RecordSearchParams) -> ApiResult<Page<DnsRecord>> {
        self.client.dns().search_records(query).await
    }

    async fn add_record(&self, req: &AddRecordRequest) -> ApiResult<ApiMessage> {
        self.client.dns().add_record(req).await
    }

    async fn update_record(&self, req: &UpdateRecordRequest) -> ApiResult<ApiMessage> {
        self.client.dns().update_record(req).await
    }

    async fn delete_record(&self, req: &DeleteRecordRequest) -> ApiResult<ApiMessage> {
        self.client.dns().delete_record(req).await
    }

    async fn update_soa(&self, req: &SoaUpdate) -> ApiResult<ApiMessage> {
        self.client.dns().update_soa(req).await
    }

    async fn activate_dns(&self, order_id: &str) -> ApiResult<ApiMessage> {
        self.client.dns().activate(order_id).await
    }

    async fn customer_by_username(&self, username: &str) -> ApiResult<Customer> {
        self.client.customers().get_by_username(username).await
    }

    async fn customer_by_id(&self, customer_id: &str) -> ApiResult<Customer> {
        self.client.customers().get_by_id(customer_id).await
    }

    async fn search_customers(&self, query: &CustomerSearchParams) -> ApiResult<Page<Customer>> {
        self.client.customers().search(query).await
    }

    async fn search_domains(&self, query: &DomainSearchParams) -> ApiResult<Page<DomainSummary>> {
        self.client.domains().search(query).await
    }

    async fn domain_details(&self, order_id: &str) -> ApiResult<DomainDetails> {
        self.client.domains().details(order_id).await
    }

    async fn domain_details_by_name(&self, domain_name: &str) -> ApiResult<DomainDetails> {
        self.client.domains().details_by_name(domain_name).await
    }

    async fn domain_order_id(&self, domain_name: &str) -> ApiResult<String> {
        self.client.domains().order_id(domain_name).await
    }

    async fn check_availability(
        &self,
        names: &[String],
        tlds: &[String],
    ) -> ApiResult<Vec<Availability>> {
        self.client.domains().check_availability(names, tlds).await
    }

    async fn modify_nameservers(
        &self,
        order_id: &str,
        nameservers: &[String],
    ) -> ApiResult<ApiMessage> {
        self.client
            .domains()
            .modify_nameservers(order_id, nameservers)
            .await
    }
}

/// Sanitize error messages to prevent sensitive information leakage.
///
/// Logs the full error to stderr but returns a generic message to the client.
fn sanitize_internal_error(error: impl std::fmt::Display, context: &str) -> McpError {
    tracing::error!("{context} error: {error}");
    McpError::internal_error(
        format!("{context} failed - check server logs for details"),
        None,
    )
}

/// Caller mistakes and missing resources go back verbatim; everything else is sanitized.
fn map_api_error(context: &str, error: &ResellerError) -> McpError {
    if error.is_expected() {
        tracing::warn!("{context} rejected: {error}");
        McpError::invalid_params(error.to_string(), None)
    } else {
        sanitize_internal_error(error, context)
    }
}

fn parse_record_type(raw: &str) -> Result<DnsRecordType, McpError> {
    raw.parse::<DnsRecordType>()
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

fn pagination(page: Option<u32>, page_size: Option<u32>, default_size: u32) -> PaginationParams {
    PaginationParams::new(page.unwrap_or(1), page_size.unwrap_or(default_size))
}

/// Execute a façade call with timeout, error mapping, and JSON serialization.
async fn run_tool<T: serde::Serialize>(
    duration: Duration,
    future: impl std::future::Future<Output = ApiResult<T>>,
    tool_name: &str,
) -> Result<CallToolResult, McpError> {
    let result = timeout(duration, future)
        .await
        .map_err(|_| McpError::internal_error(format!("{tool_name} timeout"), None))?
        .map_err(|e| map_api_error(tool_name, &e))?;

    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| sanitize_internal_error(e, &format!("Serialize {tool_name} result")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// MCP Server for the Reseller API.
#[derive(Clone)]
pub struct ResellerMcp {
    gateway: Arc<dyn ResellerGateway>,
    timeouts: ToolTimeouts,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl ResellerMcp {
    #[must_use]
    pub fn new(client: ResellerClient) -> Self {
        Self::with_gateway(Arc::new(ClientGateway { client }), ToolTimeouts::default())
    }

    fn with_gateway(gateway: Arc<dyn ResellerGateway>, timeouts: ToolTimeouts) -> Self {
        Self {
            gateway,
            timeouts,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl ResellerMcp {
    #[tool(
        description = "Search DNS records of one type in a zone (A, AAAA, CNAME, MX, NS, TXT, SRV, SOA), with pagination"
    )]
    async fn dns_search_records(
        &self,
        Parameters(params): Parameters<DnsSearchRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = RecordSearchParams {
            domain_name: params.domain_name,
            record_type: parse_record_type(&params.record_type)?,
            host: params.host,
            value: params.value,
            pagination: pagination(params.page, params.page_size, DNS_DEFAULT_PAGE_SIZE),
        };
        run_tool(
            self.timeouts.read,
            self.gateway.search_records(&query),
            "DNS record search",
        )
        .await
    }

    #[tool(
        description = "Add a DNS record. TTL must be at least 7200 seconds; MX needs priority, SRV needs priority, port and weight. SOA cannot be added"
    )]
    async fn dns_add_record(
        &self,
        Parameters(params): Parameters<DnsAddRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = AddRecordRequest {
            domain_name: params.domain_name,
            record_type: parse_record_type(&params.record_type)?,
            host: params.host,
            value: params.value,
            ttl: params.ttl,
            priority: params.priority,
            port: params.port,
            weight: params.weight,
        };
        run_tool(self.timeouts.write, self.gateway.add_record(&req), "Add DNS record").await
    }

    #[tool(description = "Change the value (and optionally TTL) of an existing DNS record")]
    async fn dns_update_record(
        &self,
        Parameters(params): Parameters<DnsUpdateRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = UpdateRecordRequest {
            domain_name: params.domain_name,
            record_type: parse_record_type(&params.record_type)?,
            host: params.host,
            current_value: params.current_value,
            new_value: params.new_value,
            ttl: params.ttl,
            priority: params.priority,
            port: params.port,
            weight: params.weight,
        };
        run_tool(
            self.timeouts.write,
            self.gateway.update_record(&req),
            "Update DNS record",
        )
        .await
    }

    #[tool(description = "Delete a DNS record identified by host and value. SOA cannot be deleted")]
    async fn dns_delete_record(
        &self,
        Parameters(params): Parameters<DnsDeleteRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = DeleteRecordRequest {
            domain_name: params.domain_name,
            record_type: parse_record_type(&params.record_type)?,
            host: params.host,
            value: params.value,
            priority: params.priority,
            port: params.port,
            weight: params.weight,
        };
        run_tool(
            self.timeouts.write,
            self.gateway.delete_record(&req),
            "Delete DNS record",
        )
        .await
    }

    #[tool(description = "Update the SOA record (contact and timers) of a zone")]
    async fn dns_update_soa(
        &self,
        Parameters(params): Parameters<DnsUpdateSoaParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = SoaUpdate {
            domain_name: params.domain_name,
            responsible_person: params.responsible_person,
            refresh: params.refresh,
            retry: params.retry,
            expire: params.expire,
            ttl: params.ttl,
        };
        run_tool(self.timeouts.write, self.gateway.update_soa(&req), "Update SOA").await
    }

    #[tool(description = "Activate the DNS service for a domain order")]
    async fn dns_activate(
        &self,
        Parameters(params): Parameters<OrderIdParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.write,
            self.gateway.activate_dns(&params.order_id),
            "Activate DNS",
        )
        .await
    }

    #[tool(description = "Get a customer account by login e-mail")]
    async fn customer_get_by_username(
        &self,
        Parameters(params): Parameters<CustomerUsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.read,
            self.gateway.customer_by_username(&params.username),
            "Customer lookup",
        )
        .await
    }

    #[tool(description = "Get a customer account by customer id")]
    async fn customer_get_by_id(
        &self,
        Parameters(params): Parameters<CustomerIdParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.read,
            self.gateway.customer_by_id(&params.customer_id),
            "Customer lookup",
        )
        .await
    }

    #[tool(description = "Search customer accounts by name, company, city, country or status")]
    async fn customer_search(
        &self,
        Parameters(params): Parameters<CustomerSearchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = CustomerSearchParams {
            username: params.username,
            name: params.name,
            company: params.company,
            city: params.city,
            country: params.country,
            status: params.status,
            pagination: pagination(
                params.page,
                params.page_size,
                PaginationParams::default().page_size,
            ),
        };
        run_tool(
            self.timeouts.read,
            self.gateway.search_customers(&query),
            "Customer search",
        )
        .await
    }

    #[tool(description = "Search domain orders by name, customer id or status, with pagination")]
    async fn domain_search(
        &self,
        Parameters(params): Parameters<DomainSearchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = DomainSearchParams {
            domain_name: params.domain_name,
            customer_id: params.customer_id,
            status: params.status,
            pagination: pagination(
                params.page,
                params.page_size,
                PaginationParams::default().page_size,
            ),
        };
        run_tool(
            self.timeouts.read,
            self.gateway.search_domains(&query),
            "Domain search",
        )
        .await
    }

    #[tool(
        description = "Get full details of a domain order by order id (status, locks, dates, nameservers)"
    )]
    async fn domain_get_details(
        &self,
        Parameters(params): Parameters<OrderIdParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.read,
            self.gateway.domain_details(&params.order_id),
            "Domain details",
        )
        .await
    }

    #[tool(description = "Get full details of a domain order by domain name")]
    async fn domain_get_details_by_name(
        &self,
        Parameters(params): Parameters<DomainNameParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.read,
            self.gateway.domain_details_by_name(&params.domain_name),
            "Domain details",
        )
        .await
    }

    #[tool(description = "Get the order id of a registered domain name")]
    async fn domain_get_order_id(
        &self,
        Parameters(params): Parameters<DomainNameParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.read,
            self.gateway.domain_order_id(&params.domain_name),
            "Order id lookup",
        )
        .await
    }

    #[tool(description = "Check registration availability of names across TLDs")]
    async fn domain_check_availability(
        &self,
        Parameters(params): Parameters<DomainAvailabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.read,
            self.gateway.check_availability(&params.names, &params.tlds),
            "Availability check",
        )
        .await
    }

    #[tool(description = "Replace the nameservers of a domain order (1 to 13 hosts)")]
    async fn domain_modify_nameservers(
        &self,
        Parameters(params): Parameters<DomainModifyNameserversParams>,
    ) -> Result<CallToolResult, McpError> {
        run_tool(
            self.timeouts.write,
            self.gateway
                .modify_nameservers(&params.order_id, &params.nameservers),
            "Modify nameservers",
        )
        .await
    }
}

#[tool_handler]
impl ServerHandler for ResellerMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Domain reseller MCP Server - Manage DNS zones, customers and domain orders \
                 through a registrar's Reseller API. \
                 Use domain_search or domain_get_order_id to find orders, dns_search_records \
                 to inspect a zone, and the dns_* write tools to change it. \
                 TTLs below 7200 seconds are rejected; \
                 SOA records are changed only with dns_update_soa."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests;
