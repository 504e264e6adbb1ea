//! Reseller API client: authentication, request dispatch and response envelopes.

use std::sync::Arc;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ResellerConfig;
use crate::customer::CustomerApi;
use crate::dns::DnsApi;
use crate::domain::DomainApi;
use crate::error::{ResellerError, Result};
use crate::error_mapper::{ErrorContext, RawApiError, map_api_error};
use crate::http_client::HttpUtils;
use crate::utils::log_sanitizer::truncate_for_log;

/// Ordered query parameters. Keys may repeat (`ns`, `tlds`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter.
    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    /// Append a parameter when present.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append the same key once per value.
    pub fn extend_repeated<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.push(key, value);
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Client for the reseller HTTP API.
///
/// Cloning is cheap; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct ResellerClient {
    http: Client,
    config: Arc<ResellerConfig>,
}

impl ResellerClient {
    pub fn new(config: ResellerConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ResellerError::Configuration {
                detail: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Shortcut for [`ResellerConfig::from_env`] + [`new`](Self::new).
    pub fn from_env() -> Result<Self> {
        Self::new(ResellerConfig::from_env()?)
    }

    pub fn config(&self) -> &ResellerConfig {
        &self.config
    }

    /// DNS zone and record operations.
    pub fn dns(&self) -> DnsApi<'_> {
        DnsApi::new(self)
    }

    /// Customer lookup and signup.
    pub fn customers(&self) -> CustomerApi<'_> {
        CustomerApi::new(self)
    }

    /// Domain order lookup and nameserver management.
    pub fn domains(&self) -> DomainApi<'_> {
        DomainApi::new(self)
    }

    /// GET `{base_url}/{path}` and deserialize the body.
    ///
    /// Transient failures are retried up to the configured `max_retries`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T> {
        self.get_with(path, params, ErrorContext::default()).await
    }

    /// POST `{base_url}/{path}` with the parameters in the query string.
    ///
    /// Never retried: the API has no idempotency keys.
    pub async fn post<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T> {
        self.post_with(path, params, ErrorContext::default()).await
    }

    pub(crate) async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        ctx: ErrorContext,
    ) -> Result<T> {
        let value = self
            .send(Method::GET, path, params, self.config.max_retries, ctx)
            .await?;
        decode(value)
    }

    pub(crate) async fn post_with<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        ctx: ErrorContext,
    ) -> Result<T> {
        let value = self.send(Method::POST, path, params, 0, ctx).await?;
        decode(value)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        max_retries: u32,
        ctx: ErrorContext,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.config.base_url, path.trim_start_matches('/'));

        let request = self
            .http
            .request(method.clone(), &url)
            .query(&[
                ("auth-userid", self.config.auth_user_id.as_str()),
                ("api-key", self.config.api_key.as_str()),
            ])
            .query(params.as_pairs());

        let (status, text) =
            HttpUtils::execute_request_with_retry(request, method.as_str(), path, max_retries)
                .await?;

        check_envelope(status, &text, ctx)
    }
}

/// Turn a raw response into JSON, mapping API-level failures to errors.
pub(crate) fn check_envelope(status: u16, text: &str, ctx: ErrorContext) -> Result<Value> {
    let success = (200..300).contains(&status);
    let parsed = serde_json::from_str::<Value>(text);

    match parsed {
        Ok(value) => {
            if let Some(message) = error_message(&value) {
                log::error!("API error (HTTP {status}): {}", truncate_for_log(&message));
                return Err(map_api_error(
                    RawApiError::with_code(status.to_string(), message),
                    ctx,
                ));
            }
            if !success {
                return Err(map_api_error(
                    RawApiError::with_code(status.to_string(), truncate_for_log(text)),
                    ctx,
                ));
            }
            Ok(value)
        }
        Err(_) if !success => {
            log::error!("API error (HTTP {status}): {}", truncate_for_log(text));
            Err(map_api_error(
                RawApiError::with_code(status.to_string(), truncate_for_log(text.trim())),
                ctx,
            ))
        }
        Err(e) => {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(text));
            Err(ResellerError::parse(e))
        }
    }
}

/// Error message of an `{"status": "ERROR", "message": ...}` style body.
fn error_message(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    let status = obj.get("status")?.as_str()?.to_ascii_lowercase();
    if !matches!(status.as_str(), "error" | "failed" | "failure") {
        return None;
    }

    let message = ["message", "msg", "error", "description"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map_or_else(|| value.to_string(), ToString::to_string);
    Some(message)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        log::error!("Unexpected response shape: {e}");
        ResellerError::parse(e)
    })
}
