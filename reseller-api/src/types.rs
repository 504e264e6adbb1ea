use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Pagination ============

/// One page of a search endpoint.
///
/// # Type Parameters
///
/// * `T` — The item type (e.g. [`DnsRecord`](crate::DnsRecord), [`Customer`](crate::Customer)).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Requested page number (1-indexed).
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Rows the API says are on this page (`recsonpage`).
    pub records_on_page: u32,
    /// Rows matching the query across all pages (`recsindb`).
    pub total_records: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a page, computing [`has_more`](Self::has_more).
    pub fn new(
        items: Vec<T>,
        page: u32,
        page_size: u32,
        records_on_page: u32,
        total_records: u32,
    ) -> Self {
        let has_more = u64::from(page) * u64::from(page_size) < u64::from(total_records);
        Self {
            items,
            page,
            page_size,
            records_on_page,
            total_records,
            has_more,
        }
    }
}

/// Page number and size for search endpoints.
///
/// Pages are 1-indexed. The default is `page = 1, page_size = 25`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 25,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Clamp values to what an endpoint accepts.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `min_page_size..=max_page_size`
    #[must_use]
    pub fn validated(&self, min_page_size: u32, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(min_page_size, max_page_size),
        }
    }
}

// ============ Write results ============

/// Outcome of a write call (`{"status": "Success", "msg": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    /// `status` as sent by the API (`Success`, `OK`, ...).
    pub status: String,
    /// Human readable message, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiMessage {
    /// Normalize a write response.
    ///
    /// Bodies without a `status` (some endpoints answer with a bare value)
    /// count as success and carry their JSON text as message.
    pub(crate) fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self {
                status: "Success".to_string(),
                message: match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                },
            };
        };

        let status = obj
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("Success")
            .to_string();
        let message = ["msg", "message", "description", "actionstatusdesc"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str))
            .map(ToString::to_string);

        Self { status, message }
    }
}

// ============ Batch ============

/// Result of a batch write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub succeeded: Vec<BatchSuccess>,
    pub failures: Vec<BatchFailure>,
}

/// A successful item of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSuccess {
    /// Index in the submitted slice.
    pub request_index: usize,
    pub host: String,
    pub message: ApiMessage,
}

/// A failed item of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// Index in the submitted slice.
    pub request_index: usize,
    pub host: String,
    pub reason: String,
}
