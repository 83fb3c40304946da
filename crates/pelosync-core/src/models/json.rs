// ABOUTME: Small helpers for pulling typed fields out of loosely-shaped service JSON
// ABOUTME: Tolerates null, missing, and integer-or-float encodings the service mixes freely
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ModelError;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// Borrow the record as an object
pub(crate) fn object<'a>(
    value: &'a Value,
    kind: &'static str,
) -> Result<&'a Map<String, Value>, ModelError> {
    value.as_object().ok_or(ModelError::NotAnObject { kind })
}

/// Required identifier; numeric ids are stringified
pub(crate) fn required_id(
    record: &Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<String, ModelError> {
    match record.get(field) {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        Some(Value::Null) | None => Err(ModelError::missing(kind, field)),
        Some(other) => Err(ModelError::invalid(
            kind,
            field,
            format!("expected string id, found {other}"),
        )),
    }
}

pub(crate) fn opt_string(record: &Map<String, Value>, field: &str) -> Option<String> {
    record.get(field).and_then(Value::as_str).map(str::to_owned)
}

pub(crate) fn opt_i64(record: &Map<String, Value>, field: &str) -> Option<i64> {
    record.get(field).and_then(as_i64_lenient)
}

pub(crate) fn opt_u64(record: &Map<String, Value>, field: &str) -> Option<u64> {
    record.get(field).and_then(Value::as_u64)
}

pub(crate) fn opt_f64(record: &Map<String, Value>, field: &str) -> Option<f64> {
    record.get(field).and_then(Value::as_f64)
}

pub(crate) fn opt_bool(record: &Map<String, Value>, field: &str) -> Option<bool> {
    record.get(field).and_then(Value::as_bool)
}

pub(crate) fn f64_list(record: &Map<String, Value>, field: &str) -> Vec<f64> {
    record
        .get(field)
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default()
}

/// Integer that may have been encoded as a float or numeric string
pub(crate) fn as_i64_lenient(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn opt_time(value: Option<DateTime<FixedOffset>>) -> Value {
    value.map_or(Value::Null, |time| Value::String(time.to_rfc3339()))
}
