use super::*;

use serde_json::{Map, Value};
use tokio::sync::Mutex;

/// In-memory gateway that records the requests it receives.
#[derive(Default)]
pub struct MockGateway {
    search_queries: Mutex<Vec<RecordSearchParams>>,
    added: Mutex<Vec<AddRecordRequest>>,
    customer_queries: Mutex<Vec<CustomerSearchParams>>,
    domain_queries: Mutex<Vec<DomainSearchParams>>,
    nameserver_calls: Mutex<Vec<(String, Vec<String>)>>,
    delay: Mutex<Option<Duration>>,
    /// Returned (cloned) by every call while set.
    error: Mutex<Option<ResellerError>>,
}

impl MockGateway {
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().await = delay;
    }

    pub async fn set_error(&self, error: Option<ResellerError>) {
        *self.error.lock().await = error;
    }

    pub async fn search_queries(&self) -> Vec<RecordSearchParams> {
        self.search_queries.lock().await.clone()
    }

    pub async fn added(&self) -> Vec<AddRecordRequest> {
        self.added.lock().await.clone()
    }

    pub async fn customer_queries(&self) -> Vec<CustomerSearchParams> {
        self.customer_queries.lock().await.clone()
    }

    pub async fn domain_queries(&self) -> Vec<DomainSearchParams> {
        self.domain_queries.lock().await.clone()
    }

    pub async fn nameserver_calls(&self) -> Vec<(String, Vec<String>)> {
        self.nameserver_calls.lock().await.clone()
    }

    /// Sleep if a delay is set, then fail if an error is set.
    async fn respond<T>(&self, value: T) -> ApiResult<T> {
        if let Some(delay) = *self.delay.lock().await {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.error.lock().await.clone() {
            return Err(error);
        }
        Ok(value)
    }
}

pub fn test_customer(id: &str) -> Customer {
    Customer {
        customer_id: id.to_string(),
        username: format!("user{id}@example.com"),
        name: "Test Customer".to_string(),
        company: None,
        address1: None,
        address2: None,
        address3: None,
        city: Some("Leeds".to_string()),
        state: None,
        country: Some("GB".to_string()),
        zip: None,
        telnocc: None,
        telno: None,
        status: Some("Active".to_string()),
        lang_pref: Some("en".to_string()),
        extra: Map::new(),
    }
}

pub fn test_details(order_id: &str, domain_name: &str) -> DomainDetails {
    DomainDetails {
        order_id: order_id.to_string(),
        domain_name: domain_name.to_string(),
        status: Some("Active".to_string()),
        order_status: vec!["resellerlock".to_string()],
        customer_id: Some("13245721".to_string()),
        creation_time: Some("1700000000".to_string()),
        end_time: Some("1731622400".to_string()),
        nameservers: vec!["ns1.example.net".to_string(), "ns2.example.net".to_string()],
        extra: Map::new(),
    }
}

fn success() -> ApiMessage {
    ApiMessage {
        status: "Success".to_string(),
        message: Some("done".to_string()),
    }
}

#[async_trait]
impl ResellerGateway for MockGateway {
    async fn search_records(&self, query: &RecordSearchParams) -> ApiResult<Page<DnsRecord>> {
        self.search_queries.lock().await.push(query.clone());
        let record: DnsRecord = serde_json::from_value(serde_json::json!({
            "host": "www",
            "value": "192.0.2.1",
            "timetolive": "7200",
            "type": query.record_type.as_str(),
            "status": "Active",
        }))
        .unwrap();
        self.respond(Page::new(vec![record], 1, query.pagination.page_size, 1, 1))
            .await
    }

    async fn add_record(&self, req: &AddRecordRequest) -> ApiResult<ApiMessage> {
        self.added.lock().await.push(req.clone());
        self.respond(success()).await
    }

    async fn update_record(&self, _req: &UpdateRecordRequest) -> ApiResult<ApiMessage> {
        self.respond(success()).await
    }

    async fn delete_record(&self, _req: &DeleteRecordRequest) -> ApiResult<ApiMessage> {
        self.respond(success()).await
    }

    async fn update_soa(&self, _req: &SoaUpdate) -> ApiResult<ApiMessage> {
        self.respond(success()).await
    }

    async fn activate_dns(&self, _order_id: &str) -> ApiResult<ApiMessage> {
        self.respond(success()).await
    }

    async fn customer_by_username(&self, _username: &str) -> ApiResult<Customer> {
        self.respond(test_customer("7")).await
    }

    async fn customer_by_id(&self, customer_id: &str) -> ApiResult<Customer> {
        self.respond(test_customer(customer_id)).await
    }

    async fn search_customers(&self, query: &CustomerSearchParams) -> ApiResult<Page<Customer>> {
        self.customer_queries.lock().await.push(query.clone());
        self.respond(Page::new(vec![test_customer("7")], 1, 25, 1, 1))
            .await
    }

    async fn search_domains(&self, query: &DomainSearchParams) -> ApiResult<Page<DomainSummary>> {
        self.domain_queries.lock().await.push(query.clone());
        self.respond(Page::new(Vec::new(), 1, 25, 0, 0)).await
    }

    async fn domain_details(&self, order_id: &str) -> ApiResult<DomainDetails> {
        self.respond(test_details(order_id, "example.com")).await
    }

    async fn domain_details_by_name(&self, domain_name: &str) -> ApiResult<DomainDetails> {
        self.respond(test_details("562994", domain_name)).await
    }

    async fn domain_order_id(&self, _domain_name: &str) -> ApiResult<String> {
        self.respond("562994".to_string()).await
    }

    async fn check_availability(
        &self,
        names: &[String],
        tlds: &[String],
    ) -> ApiResult<Vec<Availability>> {
        let results = names
            .iter()
            .flat_map(|name| {
                tlds.iter().map(move |tld| Availability {
                    domain: format!("{name}.{tld}"),
                    status: "available".to_string(),
                    class_key: None,
                })
            })
            .collect();
        self.respond(results).await
    }

    async fn modify_nameservers(
        &self,
        order_id: &str,
        nameservers: &[String],
    ) -> ApiResult<ApiMessage> {
        self.nameserver_calls
            .lock()
            .await
            .push((order_id.to_string(), nameservers.to_vec()));
        self.respond(success()).await
    }
}

pub(super) fn build_server(gateway: Arc<MockGateway>, timeouts: ToolTimeouts) -> ResellerMcp {
    ResellerMcp::with_gateway(gateway, timeouts)
}

pub(super) fn result_json(result: &CallToolResult) -> Value {
    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("expected text content in result");
    serde_json::from_str(text).unwrap()
}
