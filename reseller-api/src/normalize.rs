//! Response-shape normalization
//!
//! The API answers list endpoints with a single object keyed by row number
//! (`"1"`, `"2"`, ...) next to `recsonpage` / `recsindb` counters, and
//! prefixes columns with their table name (`entity.description`,
//! `customer.username`). These helpers turn that into plain arrays of plain
//! objects before typed deserialization.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ResellerError, Result};
use crate::types::Page;

/// Counter: rows in this page.
pub const RECORDS_ON_PAGE_KEY: &str = "recsonpage";
/// Counter: rows matching the query.
pub const RECORDS_IN_DB_KEY: &str = "recsindb";

/// A numbered-key page flattened into an array.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedPage {
    /// Rows ordered by their numeric key.
    pub items: Vec<Value>,
    /// `recsonpage`, or the row count when absent.
    pub records_on_page: u32,
    /// `recsindb`, or the row count when absent.
    pub total_records: u32,
}

impl NumberedPage {
    /// Apply `f` to every row and deserialize it into `T`.
    pub fn decode_items<T, F>(self, f: F) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(Value) -> Value,
    {
        self.items
            .into_iter()
            .map(|item| serde_json::from_value(f(item)).map_err(ResellerError::parse))
            .collect()
    }

    /// [`decode_items`](Self::decode_items) wrapped into a [`Page`].
    pub fn into_page<T, F>(self, page: u32, page_size: u32, f: F) -> Result<Page<T>>
    where
        T: DeserializeOwned,
        F: Fn(Value) -> Value,
    {
        let records_on_page = self.records_on_page;
        let total_records = self.total_records;
        let items = self.decode_items(f)?;
        Ok(Page::new(items, page, page_size, records_on_page, total_records))
    }
}

/// Rename keys that start with `prefix`, dropping the prefix.
///
/// An unprefixed key that already exists keeps its value. Non-objects are
/// returned unchanged.
pub fn strip_key_prefix(value: Value, prefix: &str) -> Value {
    strip_key_prefixes(value, &[prefix])
}

/// [`strip_key_prefix`] for several prefixes at once.
pub fn strip_key_prefixes(value: Value, prefixes: &[&str]) -> Value {
    let Value::Object(obj) = value else {
        return value;
    };

    let mut plain = Map::with_capacity(obj.len());
    let mut stripped = Vec::new();

    for (key, val) in obj {
        match prefixes.iter().find_map(|p| key.strip_prefix(p)) {
            Some(rest) if !rest.is_empty() => stripped.push((rest.to_string(), val)),
            _ => {
                plain.insert(key, val);
            }
        }
    }

    for (key, val) in stripped {
        plain.entry(key).or_insert(val);
    }

    Value::Object(plain)
}

/// Copy `fallback` into `key` when only `fallback` is present.
///
/// Endpoints disagree on column names (`domainname` / `description`,
/// `customerstatus` / `status`) and some send both. The fallback key stays in
/// place so nothing is lost to a typed field.
pub fn fill_missing_key(value: Value, key: &str, fallback: &str) -> Value {
    let Value::Object(mut obj) = value else {
        return value;
    };
    if let Some(val) = obj.get(fallback).cloned() {
        obj.entry(key).or_insert(val);
    }
    Value::Object(obj)
}

/// Flatten a numbered-key object into a [`NumberedPage`].
///
/// A JSON array is taken as the row list directly, `null` as an empty page.
pub fn flatten_numbered(value: Value) -> Result<NumberedPage> {
    let obj = match value {
        Value::Object(obj) => obj,
        Value::Array(items) => {
            let count = count_u32(items.len());
            return Ok(NumberedPage {
                items,
                records_on_page: count,
                total_records: count,
            });
        }
        Value::Null => {
            return Ok(NumberedPage {
                items: Vec::new(),
                records_on_page: 0,
                total_records: 0,
            });
        }
        other => {
            return Err(ResellerError::parse(format!(
                "expected a numbered-key object, got {other}"
            )));
        }
    };

    let records_on_page = obj.get(RECORDS_ON_PAGE_KEY).and_then(counter);
    let total_records = obj.get(RECORDS_IN_DB_KEY).and_then(counter);

    let mut rows: Vec<(u64, Value)> = obj
        .into_iter()
        .filter_map(|(key, val)| key.parse::<u64>().ok().map(|n| (n, val)))
        .collect();
    rows.sort_by_key(|(n, _)| *n);

    let items: Vec<Value> = rows.into_iter().map(|(_, v)| v).collect();
    let count = count_u32(items.len());

    Ok(NumberedPage {
        records_on_page: records_on_page.unwrap_or(count),
        total_records: total_records.unwrap_or(count),
        items,
    })
}

/// `ns1`, `ns2`, ... in numeric order, skipping empty values.
pub fn collect_nameservers(obj: &Map<String, Value>) -> Vec<String> {
    let mut servers: Vec<(u32, String)> = obj
        .iter()
        .filter_map(|(key, val)| {
            let n = key.strip_prefix("ns")?.parse::<u32>().ok()?;
            let name = val.as_str()?.trim();
            (!name.is_empty()).then(|| (n, name.to_string()))
        })
        .collect();
    servers.sort_by_key(|(n, _)| *n);
    servers.into_iter().map(|(_, s)| s).collect()
}

/// A counter sent as `"12"` or `12`.
fn counter(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Serde helpers for numeric fields the API sends as strings.
///
/// Values are kept as the string the API sent; numbers are rendered with
/// `to_string`. Use with `#[serde(with = "...")]` / `deserialize_with`.
pub mod string_or_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        U64(u64),
        I64(i64),
        F64(f64),
        Bool(bool),
    }

    impl Raw {
        fn into_string(self) -> String {
            match self {
                Self::String(s) => s,
                Self::U64(n) => n.to_string(),
                Self::I64(n) => n.to_string(),
                Self::F64(n) => n.to_string(),
                Self::Bool(b) => b.to_string(),
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Raw::deserialize(deserializer).map(Raw::into_string)
    }

    /// Optional variant; `null` and missing become `None`.
    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Raw>::deserialize(deserializer)?.map(Raw::into_string))
    }
}
