//! Shared test helpers

#![allow(dead_code)]

use std::env;

use reseller_api::{Environment, ResellerClient, ResellerConfig};
use wiremock::MockServer;

pub const TEST_USER_ID: &str = "600001";
pub const TEST_API_KEY: &str = "test-api-key";

/// Skip a test when environment variables are missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Client pointed at a mock server, with fast retries.
pub fn mock_client(server: &MockServer) -> ResellerClient {
    mock_client_with_retries(server, 2)
}

pub fn mock_client_with_retries(server: &MockServer, max_retries: u32) -> ResellerClient {
    let config = ResellerConfig::builder(TEST_USER_ID, TEST_API_KEY)
        .base_url(server.uri())
        .max_retries(max_retries)
        .build()
        .expect("valid test config");
    ResellerClient::new(config).expect("client builds")
}

/// Client against the sandbox API, from `RESELLER_AUTH_USERID` / `RESELLER_API_KEY`.
pub fn sandbox_client() -> Option<ResellerClient> {
    let user = env::var("RESELLER_AUTH_USERID").ok()?;
    let key = env::var("RESELLER_API_KEY").ok()?;
    let config = ResellerConfig::builder(user, key)
        .environment(Environment::Sandbox)
        .build()
        .ok()?;
    ResellerClient::new(config).ok()
}

/// Unique host label for records created by live tests.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}
