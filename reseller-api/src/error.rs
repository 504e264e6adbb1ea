use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all reseller API operations.
///
/// All variants are serializable for structured error reporting (the tool
/// server forwards them to agents as JSON).
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// Read calls are retried with exponential backoff; write calls never are.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ResellerError {
    /// A network-level error occurred (DNS resolution failure, connection refused, HTTP 502-504).
    #[error("Network error: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    #[error("Rate limited{}", retry_after.map(|s| format!(" (retry after {s}s)")).unwrap_or_default())]
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The reseller id / API key pair was rejected.
    #[error("Invalid credentials{}", suffix(raw_message.as_deref()))]
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated reseller lacks permission for the requested operation
    /// (usually the calling IP is not whitelisted).
    #[error("Permission denied{}", suffix(raw_message.as_deref()))]
    PermissionDenied {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g. TTL below the minimum, missing MX priority).
    #[error("Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The requested record type cannot be used with this operation.
    #[error("Unsupported record type: {record_type}")]
    UnsupportedRecordType {
        /// The unsupported record type string.
        record_type: String,
    },

    /// A DNS record with the same host/value already exists.
    #[error("Record '{host}' already exists")]
    RecordExists {
        /// Host of the conflicting record.
        host: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified DNS record was not found.
    #[error("Record '{host}' not found")]
    RecordNotFound {
        /// Host of the record that was not found.
        host: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified domain (or its order / DNS zone) was not found.
    #[error("Domain '{domain}' not found{}", suffix(raw_message.as_deref()))]
    DomainNotFound {
        /// Domain name or order id that was not found.
        domain: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified customer was not found.
    #[error("Customer '{customer}' not found{}", suffix(raw_message.as_deref()))]
    CustomerNotFound {
        /// Username or customer id that was not found.
        customer: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    #[error("Parse error: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize request data.
    #[error("Serialization error: {detail}")]
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// The client could not be configured (missing credentials, bad TLS setup, ...).
    #[error("Configuration error: {detail}")]
    Configuration {
        /// Details about the configuration problem.
        detail: String,
    },

    /// An unrecognized error from the API.
    ///
    /// This is a catch-all for messages not yet mapped to a specific variant.
    #[error("{raw_message}")]
    Unknown {
        /// HTTP status or API error code, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

fn suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl ResellerError {
    /// Whether the error is expected behaviour (bad user input, missing resource, ...).
    ///
    /// Expected errors are logged at `warn`, the rest at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::InvalidParameter { .. }
                | Self::UnsupportedRecordType { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::DomainNotFound { .. }
                | Self::CustomerNotFound { .. }
        )
    }

    /// Whether the error is transient and the request may be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    pub(crate) fn invalid_parameter(param: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn parse(detail: impl ToString) -> Self {
        Self::ParseError {
            detail: detail.to_string(),
        }
    }
}

/// Convenience type alias for `Result<T, ResellerError>`.
pub type Result<T> = std::result::Result<T, ResellerError>;
