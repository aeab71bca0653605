//! Field-level parsing shared by the forms

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;

use super::errors::{FieldError, FieldReason};

pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub(crate) fn required(field: &'static str, value: Option<&str>) -> Result<String, FieldError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(FieldError::new(field, FieldReason::Required)),
    }
}

/// Untrimmed value of at least `min` characters
pub(crate) fn min_chars(
    field: &'static str,
    value: Option<&str>,
    min: usize,
) -> Result<String, FieldError> {
    match value {
        Some(v) if v.chars().count() >= min => Ok(v.to_string()),
        Some(v) if !v.is_empty() => Err(FieldError::new(field, FieldReason::TooShort { min })),
        _ => Err(FieldError::new(field, FieldReason::Required)),
    }
}

pub(crate) fn email(field: &'static str, value: Option<&str>) -> Result<String, FieldError> {
    match value {
        Some(v) if valid_email(v) => Ok(v.to_string()),
        Some(v) if !v.is_empty() => Err(FieldError::new(field, FieldReason::InvalidEmail)),
        _ => Err(FieldError::new(field, FieldReason::Required)),
    }
}

/// Trimmed value, with empty treated as missing
pub(crate) fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) and `YYYY-MM-DD` (midnight UTC)
pub(crate) fn date(field: &'static str, value: &str) -> Result<DateTime<Utc>, FieldError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| FieldError::new(field, FieldReason::InvalidDate))
}

pub(crate) fn optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, FieldError> {
    normalize(value).map(|v| date(field, &v)).transpose()
}

/// A form field carrying a JSON document
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum JsonField {
    /// Key missing or blank
    Missing,
    /// Literal `null`
    Null,
    Value(serde_json::Value),
}

pub(crate) fn json_field(field: &'static str, raw: Option<&str>) -> Result<JsonField, FieldError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(JsonField::Missing);
    };
    match serde_json::from_str(raw) {
        Ok(serde_json::Value::Null) => Ok(JsonField::Null),
        Ok(value) => Ok(JsonField::Value(value)),
        Err(e) => {
            tracing::debug!(field, error = %e, "Rejected malformed JSON field");
            Err(FieldError::new(field, FieldReason::InvalidFormat))
        }
    }
}

pub(crate) fn from_json<T: DeserializeOwned>(
    field: &'static str,
    value: serde_json::Value,
) -> Result<T, FieldError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(field, error = %e, "JSON field has the wrong shape");
        FieldError::new(field, FieldReason::InvalidFormat)
    })
}
