//! Customer façade against a mock API server.

mod common;

use common::mock_client;
use reseller_api::{CustomerSearchParams, CustomerSignup, PaginationParams, ResellerError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signup() -> CustomerSignup {
    CustomerSignup {
        username: "new@example.com".to_string(),
        password: "Secr3tPass".to_string(),
        name: "New Customer".to_string(),
        company: "N/A".to_string(),
        address_line_1: "1 High Street".to_string(),
        city: "Leeds".to_string(),
        state: "West Yorkshire".to_string(),
        country: "GB".to_string(),
        zipcode: "LS1 1AA".to_string(),
        phone_cc: "44".to_string(),
        phone: "1130000000".to_string(),
        lang_pref: "en".to_string(),
    }
}

#[tokio::test]
async fn get_by_username_decodes_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/details.json"))
        .and(query_param("username", "jane@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customerid": "13245721",
            "username": "jane@example.com",
            "name": "Jane Doe",
            "company": "Example Ltd",
            "customerstatus": "Active",
            "langpref": "en",
            "pin": "1234",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let customer = client
        .customers()
        .get_by_username("jane@example.com")
        .await
        .unwrap();
    assert_eq!(customer.customer_id, "13245721");
    assert_eq!(customer.company.as_deref(), Some("Example Ltd"));
    assert_eq!(customer.extra["pin"], "1234");
}

#[tokio::test]
async fn get_by_id_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/details-by-id.json"))
        .and(query_param("customer-id", "999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "message": "No Entity found for customer id 999",
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.customers().get_by_id("999").await.unwrap_err();
    assert!(matches!(
        err,
        ResellerError::CustomerNotFound { ref customer, .. } if customer == "999"
    ));
}

#[tokio::test]
async fn invalid_customer_id_is_customer_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/details-by-id.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "message": "Customer-id is invalid",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.customers().get_by_id("99").await.unwrap_err();
    assert!(matches!(
        err,
        ResellerError::CustomerNotFound { ref customer, .. } if customer == "99"
    ));
    assert!(err.is_expected());
}

#[tokio::test]
async fn search_strips_customer_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/search.json"))
        .and(query_param("no-of-records", "500"))
        .and(query_param("page-no", "2"))
        .and(query_param("country", "GB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recsonpage": "1",
            "recsindb": "501",
            "1": {
                "customer.customerid": "7",
                "customer.username": "a@example.com",
                "customer.name": "A",
                "customer.customerstatus": "Active",
                "customer.totalreceipts": "0.00",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let query = CustomerSearchParams {
        country: Some("GB".to_string()),
        pagination: PaginationParams::new(2, 10_000),
        ..Default::default()
    };
    let page = client.customers().search(&query).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].customer_id, "7");
    assert_eq!(page.items[0].status.as_deref(), Some("Active"));
    assert_eq!(page.items[0].extra["totalreceipts"], "0.00");
    assert_eq!(page.page_size, 500);
    assert!(!page.has_more);
}

#[tokio::test]
async fn signup_returns_new_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/customers/v2/signup.json"))
        .and(query_param("username", "new@example.com"))
        .and(query_param("passwd", "Secr3tPass"))
        .and(query_param("address-line-1", "1 High Street"))
        .and(query_param("phone-cc", "44"))
        .and(query_param("lang-pref", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string("13245722"))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let id = client.customers().signup(&signup()).await.unwrap();
    assert_eq!(id, "13245722");
}

#[tokio::test]
async fn signup_requires_username() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    let mut req = signup();
    req.username = "  ".to_string();
    let err = client.customers().signup(&req).await.unwrap_err();
    assert!(matches!(
        err,
        ResellerError::InvalidParameter { ref param, .. } if param == "username"
    ));
}
