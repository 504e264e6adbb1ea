//! Client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{ResellerError, Result};

/// Production API endpoint.
pub const LIVE_BASE_URL: &str = "https://httpapi.com/api";
/// Sandbox (test reseller account) endpoint.
pub const SANDBOX_BASE_URL: &str = "https://test.httpapi.com/api";

/// Default connection timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default number of retries for read requests
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Environment variable names read by [`ResellerConfig::from_env`].
pub mod env_vars {
    /// Reseller id (`auth-userid`).
    pub const AUTH_USERID: &str = "RESELLER_AUTH_USERID";
    /// API key (`api-key`).
    pub const API_KEY: &str = "RESELLER_API_KEY";
    /// `1`, `true` or `yes` (any case) selects the sandbox endpoint.
    pub const SANDBOX: &str = "RESELLER_SANDBOX";
    /// Full base URL override.
    pub const API_URL: &str = "RESELLER_API_URL";
    /// Request timeout in seconds.
    pub const TIMEOUT_SECS: &str = "RESELLER_TIMEOUT_SECS";
    /// Retry count for read requests.
    pub const MAX_RETRIES: &str = "RESELLER_MAX_RETRIES";
}

/// Which reseller API deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production API.
    #[default]
    Live,
    /// Test API, backed by a demo reseller account.
    Sandbox,
}

impl Environment {
    /// Base URL of this deployment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Live => LIVE_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

/// Everything the client needs to reach the API.
#[derive(Clone)]
pub struct ResellerConfig {
    pub(crate) auth_user_id: String,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) connect_timeout: Duration,
    pub(crate) max_retries: u32,
}

impl fmt::Debug for ResellerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResellerConfig")
            .field("auth_user_id", &self.auth_user_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl ResellerConfig {
    /// Start building a configuration for the given reseller credentials.
    pub fn builder(
        auth_user_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> ResellerConfigBuilder {
        ResellerConfigBuilder::new(auth_user_id.into(), api_key.into())
    }

    /// Load configuration from `RESELLER_*` environment variables.
    ///
    /// See [`env_vars`] for the variable names.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ResellerError::Configuration {
                    detail: format!("environment variable {key} is not set"),
                })
        };

        let mut builder = Self::builder(
            required(env_vars::AUTH_USERID)?,
            required(env_vars::API_KEY)?,
        );

        if lookup(env_vars::SANDBOX).is_some_and(|v| is_truthy(&v)) {
            builder = builder.environment(Environment::Sandbox);
        }
        if let Some(url) = lookup(env_vars::API_URL).filter(|v| !v.trim().is_empty()) {
            builder = builder.base_url(url);
        }
        if let Some(raw) = lookup(env_vars::TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ResellerError::Configuration {
                detail: format!(
                    "{} must be a number of seconds, got '{raw}'",
                    env_vars::TIMEOUT_SECS
                ),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = lookup(env_vars::MAX_RETRIES) {
            let retries = raw.trim().parse::<u32>().map_err(|_| ResellerError::Configuration {
                detail: format!(
                    "{} must be a non-negative integer, got '{raw}'",
                    env_vars::MAX_RETRIES
                ),
            })?;
            builder = builder.max_retries(retries);
        }

        builder.build()
    }

    /// Reseller id sent as `auth-userid`.
    pub fn auth_user_id(&self) -> &str {
        &self.auth_user_id
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retries applied to read requests.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// `1`, `true` or `yes`, in any case.
fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["1", "true", "yes"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}

/// Builder for [`ResellerConfig`].
#[derive(Debug, Clone)]
pub struct ResellerConfigBuilder {
    auth_user_id: String,
    api_key: String,
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
    max_retries: u32,
}

impl ResellerConfigBuilder {
    fn new(auth_user_id: String, api_key: String) -> Self {
        Self {
            auth_user_id,
            api_key,
            base_url: Environment::Live.base_url().to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.base_url().to_string();
        self
    }

    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn build(self) -> Result<ResellerConfig> {
        if self.auth_user_id.trim().is_empty() {
            return Err(ResellerError::invalid_parameter(
                "auth-userid",
                "reseller id must not be empty",
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ResellerError::invalid_parameter(
                "api-key",
                "API key must not be empty",
            ));
        }

        Ok(ResellerConfig {
            auth_user_id: self.auth_user_id.trim().to_string(),
            api_key: self.api_key.trim().to_string(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            max_retries: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn builder_defaults_to_live() {
        let config = ResellerConfig::builder("12345", "key").build().unwrap();
        assert_eq!(config.base_url(), LIVE_BASE_URL);
        assert_eq!(config.max_retries(), 2);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let config = ResellerConfig::builder("1", "k")
            .base_url("http://127.0.0.1:9000/api/")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn builder_rejects_empty_credentials() {
        let err = ResellerConfig::builder("", "k").build().unwrap_err();
        assert!(matches!(
            err,
            ResellerError::InvalidParameter { ref param, .. } if param == "auth-userid"
        ));
        let err = ResellerConfig::builder("1", "  ").build().unwrap_err();
        assert!(matches!(
            err,
            ResellerError::InvalidParameter { ref param, .. } if param == "api-key"
        ));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ResellerConfig::builder("1", "super-secret").build().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn from_lookup_reads_sandbox_and_overrides() {
        let config = ResellerConfig::from_lookup(lookup(&[
            (env_vars::AUTH_USERID, "42"),
            (env_vars::API_KEY, "k"),
            (env_vars::SANDBOX, "true"),
            (env_vars::TIMEOUT_SECS, "5"),
            (env_vars::MAX_RETRIES, "0"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), SANDBOX_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries(), 0);
    }

    #[test]
    fn from_lookup_url_override_beats_sandbox() {
        let config = ResellerConfig::from_lookup(lookup(&[
            (env_vars::AUTH_USERID, "42"),
            (env_vars::API_KEY, "k"),
            (env_vars::SANDBOX, "1"),
            (env_vars::API_URL, "http://localhost:8080/api"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn from_lookup_missing_key_is_configuration_error() {
        let err =
            ResellerConfig::from_lookup(lookup(&[(env_vars::AUTH_USERID, "42")])).unwrap_err();
        assert!(matches!(
            err,
            ResellerError::Configuration { ref detail } if detail.contains(env_vars::API_KEY)
        ));
    }

    #[test]
    fn from_lookup_bad_timeout() {
        let err = ResellerConfig::from_lookup(lookup(&[
            (env_vars::AUTH_USERID, "42"),
            (env_vars::API_KEY, "k"),
            (env_vars::TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ResellerError::Configuration { .. }));
    }

    #[test]
    fn sandbox_flag_is_case_insensitive() {
        for flag in ["True", "TRUE", "yes", " 1 "] {
            let config = ResellerConfig::from_lookup(lookup(&[
                (env_vars::AUTH_USERID, "42"),
                (env_vars::API_KEY, "k"),
                (env_vars::SANDBOX, flag),
            ]))
            .unwrap();
            assert_eq!(config.base_url(), SANDBOX_BASE_URL, "flag {flag:?}");
        }
        assert!(!is_truthy("false"));
        assert!(!is_truthy("0"));
    }
}
