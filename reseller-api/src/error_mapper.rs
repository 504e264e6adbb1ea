//! Maps raw API failures onto [`ResellerError`].
//!
//! The reseller API does not return machine-readable error codes, only a
//! `status` of `ERROR`/`Failed` and a human readable message, so the mapping
//! is done on message text.

use crate::error::ResellerError;

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code, as a string
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Identifiers of the request that failed, used to fill in error variants.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record host (`RecordExists`, `RecordNotFound`)
    pub host: Option<String>,
    /// Domain name or order id (`DomainNotFound`)
    pub domain: Option<String>,
    /// Username or customer id (`CustomerNotFound`)
    pub customer: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    pub fn record(domain: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            domain: Some(domain.into()),
            customer: None,
        }
    }

    pub fn customer(customer: impl Into<String>) -> Self {
        Self {
            customer: Some(customer.into()),
            ..Self::default()
        }
    }
}

/// Parameters the API names in "invalid ..." messages, matched as whole words.
const KNOWN_PARAMS: &[&str] = &[
    "host",
    "value",
    "priority",
    "port",
    "weight",
    "domain-name",
    "order-id",
    "customer-id",
    "username",
    "ns",
    "page-no",
    "no-of-records",
];

/// The longest known parameter named in `msg`.
///
/// A name only counts when it is not part of a longer word, so `ns` does not
/// match inside `dns` and `value` does not shadow `priority`.
fn named_param(msg: &str) -> Option<&'static str> {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    KNOWN_PARAMS
        .iter()
        .filter(|param| {
            msg.match_indices(**param).any(|(start, _)| {
                let end = start + param.len();
                let before = msg[..start].chars().next_back();
                let after = msg[end..].chars().next();
                !before.is_some_and(is_word) && !after.is_some_and(is_word)
            })
        })
        .max_by_key(|param| param.len())
        .copied()
}

fn unknown_target(value: Option<String>) -> String {
    value.unwrap_or_else(|| "<unknown>".to_string())
}

/// Map a raw API error onto the unified error type.
pub(crate) fn map_api_error(raw: RawApiError, context: ErrorContext) -> ResellerError {
    let msg = raw.message.to_lowercase();
    let has = |needle: &str| msg.contains(needle);
    let missing = has("not found")
        || has("no entity")
        || has("does not exist")
        || has("no such")
        || has("not registered");

    if has("invalid auth")
        || has("authentication")
        || has("invalid api key")
        || has("invalid api-key")
        || has("auth-userid")
    {
        return ResellerError::InvalidCredentials {
            raw_message: Some(raw.message),
        };
    }

    if has("access denied") || has("not authorized") || has("permission") {
        return ResellerError::PermissionDenied {
            raw_message: Some(raw.message),
        };
    }

    if has("rate limit") || has("too many requests") {
        return ResellerError::RateLimited {
            retry_after: None,
            raw_message: Some(raw.message),
        };
    }

    if has("already exists") || has("duplicate") {
        return ResellerError::RecordExists {
            host: unknown_target(context.host),
            raw_message: Some(raw.message),
        };
    }

    if has("customer") && (missing || has("invalid")) {
        return ResellerError::CustomerNotFound {
            customer: unknown_target(context.customer),
            raw_message: Some(raw.message),
        };
    }

    if has("record") && missing {
        return ResellerError::RecordNotFound {
            host: unknown_target(context.host),
            raw_message: Some(raw.message),
        };
    }

    if (has("domain") || has("order") || has("zone")) && missing {
        return ResellerError::DomainNotFound {
            domain: unknown_target(context.domain),
            raw_message: Some(raw.message),
        };
    }

    if has("ttl") {
        return ResellerError::InvalidParameter {
            param: "ttl".to_string(),
            detail: raw.message,
        };
    }

    if has("invalid") || has("required") {
        let param = named_param(&msg).unwrap_or("general");
        return ResellerError::InvalidParameter {
            param: param.to_string(),
            detail: raw.message,
        };
    }

    // Status-only fallbacks, when the body carried nothing recognisable.
    match raw.code.as_deref() {
        Some("401") => ResellerError::InvalidCredentials {
            raw_message: Some(raw.message),
        },
        Some("403") => ResellerError::PermissionDenied {
            raw_message: Some(raw.message),
        },
        Some("404") if context.domain.is_some() => ResellerError::DomainNotFound {
            domain: unknown_target(context.domain),
            raw_message: Some(raw.message),
        },
        _ => ResellerError::Unknown {
            raw_code: raw.code,
            raw_message: raw.message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(message: &str) -> ResellerError {
        map_api_error(RawApiError::new(message), ErrorContext::default())
    }

    #[test]
    fn auth_failures() {
        assert!(matches!(
            map("Invalid Auth-userid/Api-key"),
            ResellerError::InvalidCredentials { .. }
        ));
        assert!(matches!(
            map("Authentication failed"),
            ResellerError::InvalidCredentials { .. }
        ));
    }

    #[test]
    fn ip_not_whitelisted_is_permission_denied() {
        assert!(matches!(
            map("Access Denied: You are not authorized to perform this action"),
            ResellerError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn duplicate_record_uses_context_host() {
        let err = map_api_error(
            RawApiError::new("Record already exists"),
            ErrorContext::record("example.com", "www"),
        );
        assert!(matches!(err, ResellerError::RecordExists { ref host, .. } if host == "www"));
    }

    #[test]
    fn missing_record() {
        let err = map_api_error(
            RawApiError::new("Record does not exist"),
            ErrorContext::record("example.com", "mail"),
        );
        assert!(matches!(err, ResellerError::RecordNotFound { ref host, .. } if host == "mail"));
    }

    #[test]
    fn missing_domain_uses_context_domain() {
        let err = map_api_error(
            RawApiError::new("No Entity found for the domain"),
            ErrorContext::domain("example.com"),
        );
        assert!(matches!(
            err,
            ResellerError::DomainNotFound { ref domain, .. } if domain == "example.com"
        ));
    }

    #[test]
    fn missing_customer_wins_over_generic_not_found() {
        let err = map_api_error(
            RawApiError::new("Customer not found"),
            ErrorContext::customer("alice"),
        );
        assert!(matches!(
            err,
            ResellerError::CustomerNotFound { ref customer, .. } if customer == "alice"
        ));
    }

    #[test]
    fn ttl_messages_are_invalid_ttl() {
        assert!(matches!(
            map("TTL should be greater than 7200"),
            ResellerError::InvalidParameter { ref param, .. } if param == "ttl"
        ));
    }

    #[test]
    fn invalid_named_parameter() {
        assert!(matches!(
            map("domain-name is required"),
            ResellerError::InvalidParameter { ref param, .. } if param == "domain-name"
        ));
        assert!(matches!(
            map("Invalid ns"),
            ResellerError::InvalidParameter { ref param, .. } if param == "ns"
        ));
    }

    #[test]
    fn parameter_names_match_whole_words() {
        assert_eq!(named_param("invalid dns settings"), None);
        assert_eq!(named_param("transfer is invalid"), None);
        assert_eq!(named_param("invalid hostname"), None);
        assert_eq!(named_param("ns is required"), Some("ns"));
    }

    #[test]
    fn longest_parameter_name_wins() {
        assert!(matches!(
            map("Invalid value for priority"),
            ResellerError::InvalidParameter { ref param, .. } if param == "priority"
        ));
        assert_eq!(named_param("invalid value for no-of-records"), Some("no-of-records"));
    }

    #[test]
    fn invalid_customer_is_customer_not_found() {
        let err = map_api_error(
            RawApiError::new("Customer-id is invalid"),
            ErrorContext::customer("99"),
        );
        assert!(
            matches!(err, ResellerError::CustomerNotFound { ref customer, .. } if customer == "99")
        );
    }

    #[test]
    fn required_parameter_message() {
        assert!(matches!(
            map("Value is required"),
            ResellerError::InvalidParameter { ref param, .. } if param == "value"
        ));
        assert!(matches!(
            map("Invalid DNS configuration"),
            ResellerError::InvalidParameter { ref param, .. } if param == "general"
        ));
    }

    #[test]
    fn rate_limit_message() {
        assert!(matches!(
            map("Too many requests, slow down"),
            ResellerError::RateLimited { .. }
        ));
    }

    #[test]
    fn http_status_fallbacks() {
        let unauthorized = map_api_error(
            RawApiError::with_code("401", "nope"),
            ErrorContext::default(),
        );
        let forbidden = map_api_error(
            RawApiError::with_code("403", "nope"),
            ErrorContext::default(),
        );
        assert!(matches!(
            unauthorized,
            ResellerError::InvalidCredentials { .. }
        ));
        assert!(matches!(forbidden, ResellerError::PermissionDenied { .. }));
    }

    #[test]
    fn unrecognised_message_is_unknown() {
        let err = map_api_error(
            RawApiError::with_code("500", "something odd happened"),
            ErrorContext::default(),
        );
        assert!(matches!(
            err,
            ResellerError::Unknown { raw_code: Some(ref c), .. } if c == "500"
        ));
    }
}
