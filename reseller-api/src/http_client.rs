//! Shared HTTP execution
//!
//! Sends a prepared `RequestBuilder`, classifies transport-level failures and
//! hands back the status code and body text. Envelope checks and
//! deserialization live in [`crate::client`].

use reqwest::RequestBuilder;
use std::time::Duration;

use crate::error::ResellerError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, query, headers)
    /// * `method_name` - request method name, for logs
    /// * `path` - API path without credentials, for logs
    ///
    /// # Errors
    /// * `Timeout` when the request timed out
    /// * `NetworkError` for transport failures and HTTP 502/503/504
    /// * `RateLimited` for HTTP 429
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> Result<(u16, String), ResellerError> {
        log::debug!("{method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            // The URL carries the API key, never let it reach the error text.
            let e = e.without_url();
            if e.is_timeout() {
                ResellerError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ResellerError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        // Extract Retry-After before consuming the body
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ResellerError::RateLimited {
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Server error (HTTP {status_code})");
            return Err(ResellerError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ResellerError::NetworkError {
                detail: format!("Failed to read response body: {}", e.without_url()),
            })?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Performs an HTTP request, retrying transient failures.
    ///
    /// # Retry strategy
    /// - Only `NetworkError`, `Timeout` and `RateLimited` are retried
    /// - Exponential backoff: 100ms, 200ms, 400ms, 800ms, ... (maximum 10 seconds)
    /// - `Retry-After` from a 429 is honoured, capped at 30 seconds
    /// - `max_retries == 0` sends the request exactly once
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ResellerError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method_name, path).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder can only be sent once
            let Some(req) = request_builder.try_clone() else {
                log::warn!("Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, method_name, path).await;
            };

            match Self::execute_request(req, method_name, path).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ResellerError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Use `Retry-After` (capped at 30s) for rate limits, exponential backoff otherwise.
fn retry_delay(error: &ResellerError, attempt: u32) -> Duration {
    if let ResellerError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, 800ms, 1.6s, ... capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
