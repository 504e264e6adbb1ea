//! Customer façade: account lookup, search and signup.

mod types;

use serde_json::Value;

use crate::client::{QueryParams, ResellerClient};
use crate::error::{ResellerError, Result};
use crate::error_mapper::ErrorContext;
use crate::normalize::{fill_missing_key, flatten_numbered, strip_key_prefix};
use crate::types::Page;

pub use types::{Customer, CustomerSearchParams, CustomerSignup};

const MIN_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 500;

const CUSTOMER_PREFIX: &str = "customer.";

/// Customer operations, obtained from [`ResellerClient::customers`].
#[derive(Debug, Clone, Copy)]
pub struct CustomerApi<'a> {
    client: &'a ResellerClient,
}

impl<'a> CustomerApi<'a> {
    pub(crate) fn new(client: &'a ResellerClient) -> Self {
        Self { client }
    }

    /// Look up a customer by login e-mail.
    pub async fn get_by_username(&self, username: &str) -> Result<Customer> {
        if username.trim().is_empty() {
            return Err(ResellerError::invalid_parameter("username", "must not be empty"));
        }
        let params = QueryParams::new().with("username", username);
        let value: Value = self
            .client
            .get_with("customers/details.json", &params, ErrorContext::customer(username))
            .await?;
        decode_customer(value)
    }

    /// Look up a customer by numeric id.
    pub async fn get_by_id(&self, customer_id: &str) -> Result<Customer> {
        if customer_id.trim().is_empty() {
            return Err(ResellerError::invalid_parameter("customer-id", "must not be empty"));
        }
        let params = QueryParams::new().with("customer-id", customer_id);
        let value: Value = self
            .client
            .get_with(
                "customers/details-by-id.json",
                &params,
                ErrorContext::customer(customer_id),
            )
            .await?;
        decode_customer(value)
    }

    pub async fn search(&self, query: &CustomerSearchParams) -> Result<Page<Customer>> {
        let pagination = query.pagination.validated(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

        let mut params = QueryParams::new()
            .with("no-of-records", pagination.page_size)
            .with("page-no", pagination.page);
        params.push_opt("username", query.username.as_deref());
        params.push_opt("name", query.name.as_deref());
        params.push_opt("company", query.company.as_deref());
        params.push_opt("city", query.city.as_deref());
        params.push_opt("country", query.country.as_deref());
        params.push_opt("status", query.status.as_deref());

        let value: Value = self
            .client
            .get_with("customers/search.json", &params, ErrorContext::default())
            .await?;

        let page = flatten_numbered(value)?.into_page(
            pagination.page,
            pagination.page_size,
            |row| with_status_key(strip_key_prefix(row, CUSTOMER_PREFIX)),
        )?;
        log::debug!(
            "Customer search returned {} of {} rows",
            page.items.len(),
            page.total_records
        );
        Ok(page)
    }

    /// Create a customer account, returning the new customer id.
    pub async fn signup(&self, signup: &CustomerSignup) -> Result<String> {
        for (param, value) in [
            ("username", &signup.username),
            ("passwd", &signup.password),
            ("name", &signup.name),
            ("country", &signup.country),
        ] {
            if value.trim().is_empty() {
                return Err(ResellerError::invalid_parameter(param, "must not be empty"));
            }
        }

        let params = QueryParams::new()
            .with("username", &signup.username)
            .with("passwd", &signup.password)
            .with("name", &signup.name)
            .with("company", &signup.company)
            .with("address-line-1", &signup.address_line_1)
            .with("city", &signup.city)
            .with("state", &signup.state)
            .with("country", &signup.country)
            .with("zipcode", &signup.zipcode)
            .with("phone-cc", &signup.phone_cc)
            .with("phone", &signup.phone)
            .with("lang-pref", &signup.lang_pref);

        let value: Value = self
            .client
            .post_with(
                "customers/v2/signup.json",
                &params,
                ErrorContext::customer(&signup.username),
            )
            .await?;

        let customer_id = scalar_id(&value).ok_or_else(|| {
            ResellerError::parse(format!("signup returned no customer id: {value}"))
        })?;
        log::info!("Created customer {customer_id} ({})", signup.username);
        Ok(customer_id)
    }
}

/// Search rows may carry `status` instead of `customerstatus`.
fn with_status_key(row: Value) -> Value {
    fill_missing_key(row, "customerstatus", "status")
}

fn decode_customer(value: Value) -> Result<Customer> {
    serde_json::from_value(with_status_key(value)).map_err(ResellerError::parse)
}

/// An id the API answers with as a bare number or string.
pub(crate) fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
