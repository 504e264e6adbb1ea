//! Log sanitization
//!
//! Response bodies can be large and error pages sometimes echo the request
//! URL, which carries the `api-key` query parameter. Everything that ends up
//! in a log line or an error detail goes through [`truncate_for_log`].

/// Maximum number of bytes kept from a logged body.
const TRUNCATE_LIMIT: usize = 256;

/// Query parameters whose values never reach the logs.
const SECRET_PARAMS: &[&str] = &["api-key=", "passwd="];

const REDACTED: &str = "***";

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Replace the value of every secret query parameter with `***`.
pub fn redact_secrets(s: &str) -> String {
    let mut out = s.to_string();
    for param in SECRET_PARAMS {
        let mut search_from = 0;
        while let Some(pos) = out[search_from..].find(param) {
            let value_start = search_from + pos + param.len();
            let value_end = out[value_start..]
                .find(|c: char| c == '&' || c == '"' || c.is_whitespace())
                .map_or(out.len(), |n| value_start + n);
            out.replace_range(value_start..value_end, REDACTED);
            search_from = value_start + REDACTED.len();
        }
    }
    out
}

/// Redact secrets, then cut to [`TRUNCATE_LIMIT`] bytes on a char boundary.
pub fn truncate_for_log(s: &str) -> String {
    let s = redact_secrets(s);
    if s.len() <= TRUNCATE_LIMIT {
        s
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(&s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        let s = r#"{"status":"Success"}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn long_body_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_cut_stays_on_boundary() {
        let s = "é".repeat(200);
        assert!(truncate_for_log(&s).contains("... [truncated"));
    }

    #[test]
    fn api_key_redacted() {
        let s = "GET /api/domains/search.json?auth-userid=1&api-key=s3cr3t&page-no=1 failed";
        let out = truncate_for_log(s);
        assert!(!out.contains("s3cr3t"));
        assert!(out.contains("api-key=***&page-no=1"));
    }

    #[test]
    fn password_redacted_at_end_and_repeated() {
        let out = redact_secrets("passwd=a b passwd=c");
        assert_eq!(out, "passwd=*** b passwd=***");
    }
}
