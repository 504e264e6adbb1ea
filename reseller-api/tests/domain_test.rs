//! Domain façade against a mock API server.

mod common;

use common::mock_client;
use reseller_api::{DomainSearchParams, ResellerError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_strips_entity_and_order_prefixes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains/search.json"))
        .and(query_param("no-of-records", "10"))
        .and(query_param("page-no", "1"))
        .and(query_param("customer-id", "13245721"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recsonpage": "2",
            "recsindb": "2",
            "1": {
                "orders.orderid": "562994",
                "entity.description": "example.com",
                "entity.currentstatus": "Active",
                "entity.customerid": "13245721",
                "orders.creationtime": "1700000000",
                "orders.endtime": "1731622400",
            },
            "2": {
                "orders.orderid": "562995",
                "entity.description": "example.net",
                "entity.currentstatus": "InActive",
                "entity.customerid": "13245721",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let query = DomainSearchParams {
        customer_id: Some("13245721".to_string()),
        ..Default::default()
    };
    let page = client.domains().search(&query).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].order_id, "562994");
    assert_eq!(page.items[0].domain_name, "example.com");
    assert_eq!(page.items[1].status.as_deref(), Some("InActive"));
    assert!(page.items[0].expires_at().is_some());
    assert!(page.items[1].expires_at().is_none());
}

#[tokio::test]
async fn details_collects_nameservers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains/details.json"))
        .and(query_param("order-id", "562994"))
        .and(query_param("options", "All"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orderid": "562994",
            "domainname": "example.com",
            "currentstatus": "Active",
            "orderstatus": ["resellerlock"],
            "customerid": "13245721",
            "creationtime": "1700000000",
            "endtime": "1731622400",
            "noOfNameServers": "2",
            "ns2": "ns2.example.net",
            "ns1": "ns1.example.net",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let details = client.domains().details("562994").await.unwrap();

    assert_eq!(details.nameservers, vec!["ns1.example.net", "ns2.example.net"]);
    assert_eq!(details.order_status, vec!["resellerlock"]);
    assert_eq!(details.created_at().unwrap().timestamp(), 1_700_000_000);
    assert!(!details.extra.contains_key("ns1"));
}

#[tokio::test]
async fn details_by_name_accepts_both_name_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains/details-by-name.json"))
        .and(query_param("domain-name", "example.com"))
        .and(query_param("options", "All"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orderid": "562994",
            "description": "example.com",
            "domainname": "example.com",
            "currentstatus": "Active",
            "ns1": "ns1.example.net",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let details = client
        .domains()
        .details_by_name("example.com")
        .await
        .unwrap();
    assert_eq!(details.order_id, "562994");
    assert_eq!(details.domain_name, "example.com");
    assert_eq!(details.nameservers, vec!["ns1.example.net"]);
}

#[tokio::test]
async fn details_by_name_unknown_domain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains/details-by-name.json"))
        .and(query_param("domain-name", "nothere.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "message": "The domain name nothere.com is not registered",
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client
        .domains()
        .details_by_name("nothere.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResellerError::DomainNotFound { ref domain, .. } if domain == "nothere.com"
    ));
}

#[tokio::test]
async fn order_id_from_bare_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains/orderid.json"))
        .and(query_param("domain-name", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("562994"))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let id = client.domains().order_id("example.com").await.unwrap();
    assert_eq!(id, "562994");
}

#[tokio::test]
async fn check_availability_repeats_names_and_tlds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains/available.json"))
        .and(query_param("domain-name", "example"))
        .and(query_param("tlds", "com"))
        .and(query_param("tlds", "net"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "example.com": { "classkey": "domcno", "status": "regthroughothers" },
            "example.net": { "classkey": "dotnet", "status": "available" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let result = client
        .domains()
        .check_availability(
            &["example".to_string()],
            &[".com".to_string(), "net".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
    assert!(!result[0].is_available());
    assert!(result[1].is_available());
}

#[tokio::test]
async fn modify_nameservers_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/domains/modify-ns.json"))
        .and(query_param("order-id", "562994"))
        .and(query_param("ns", "ns1.example.net"))
        .and(query_param("ns", "ns2.example.net"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "actiontypedesc": "Modification of Nameservers",
            "actionstatus": "Success",
            "status": "Success",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let domains = client.domains();

    let ok = domains
        .modify_nameservers(
            "562994",
            &["ns1.example.net".to_string(), "ns2.example.net".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(ok.status, "Success");

    let err = domains.modify_nameservers("562994", &[]).await.unwrap_err();
    assert!(matches!(err, ResellerError::InvalidParameter { ref param, .. } if param == "ns"));

    let too_many: Vec<String> = (1..=14).map(|i| format!("ns{i}.example.net")).collect();
    assert!(domains.modify_nameservers("562994", &too_many).await.is_err());
}
