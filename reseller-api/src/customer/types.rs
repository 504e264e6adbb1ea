//! Customer types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalize::string_or_number;
use crate::types::PaginationParams;

/// A customer account.
///
/// Fields without a dedicated member are kept in [`extra`](Self::extra).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(rename = "customerid", deserialize_with = "string_or_number::deserialize")]
    pub customer_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub zip: Option<String>,
    /// Phone country code.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub telnocc: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize_opt"
    )]
    pub telno: Option<String>,
    /// Remote `customerstatus` (`Active`, `Suspended`, ...).
    #[serde(default, rename = "customerstatus", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "langpref", skip_serializing_if = "Option::is_none")]
    pub lang_pref: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters for `customers/search.json`. All filters are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerSearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// `Active`, `Suspended` or `Deleted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub pagination: PaginationParams,
}

/// A new customer account.
#[derive(Clone, Serialize, Deserialize)]
pub struct CustomerSignup {
    /// Login e-mail address.
    pub username: String,
    pub password: String,
    pub name: String,
    pub company: String,
    pub address_line_1: String,
    pub city: String,
    pub state: String,
    /// ISO 3166-1 alpha-2 code.
    pub country: String,
    pub zipcode: String,
    pub phone_cc: String,
    pub phone: String,
    /// Defaults to `en`.
    #[serde(default = "default_lang")]
    pub lang_pref: String,
}

fn default_lang() -> String {
    "en".to_string()
}

impl std::fmt::Debug for CustomerSignup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerSignup")
            .field("username", &self.username)
            .field("password", &"***")
            .field("name", &self.name)
            .field("company", &self.company)
            .field("country", &self.country)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_from_details() {
        let customer: Customer = serde_json::from_value(json!({
            "customerid": 13_245_721,
            "username": "jane@example.com",
            "name": "Jane Doe",
            "company": "Example Ltd",
            "city": "Leeds",
            "country": "GB",
            "zip": "LS1 1AA",
            "telnocc": "44",
            "telno": "1130000000",
            "customerstatus": "Active",
            "langpref": "en",
            "resellerid": "600001",
            "totalreceipts": "0.00",
        }))
        .unwrap();

        assert_eq!(customer.customer_id, "13245721");
        assert_eq!(customer.status.as_deref(), Some("Active"));
        assert_eq!(customer.lang_pref.as_deref(), Some("en"));
        assert_eq!(customer.extra["resellerid"], "600001");
        assert!(!customer.extra.contains_key("username"));
    }

    #[test]
    fn both_status_keys_decode() {
        let customer: Customer = serde_json::from_value(json!({
            "customerid": "7",
            "username": "a@example.com",
            "name": "A",
            "customerstatus": "Active",
            "status": "Active",
        }))
        .unwrap();
        assert_eq!(customer.status.as_deref(), Some("Active"));
        assert_eq!(customer.extra["status"], "Active");
    }

    #[test]
    fn signup_debug_hides_password() {
        let signup: CustomerSignup = serde_json::from_value(json!({
            "username": "new@example.com",
            "password": "hunter22",
            "name": "New",
            "company": "N/A",
            "address_line_1": "1 Road",
            "city": "Leeds",
            "state": "West Yorkshire",
            "country": "GB",
            "zipcode": "LS1 1AA",
            "phone_cc": "44",
            "phone": "1130000000",
        }))
        .unwrap();
        assert_eq!(signup.lang_pref, "en");
        assert!(!format!("{signup:?}").contains("hunter22"));
    }
}
