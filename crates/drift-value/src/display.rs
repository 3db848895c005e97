//! Human-readable rendering of values.
//!
//! `serialize` produces the one-line form used by diff output and by the
//! `Debug`/`Display` impls on [`Value`]. It is a *presentation* of the
//! value, never an equality key; canonical forms live in
//! [`crate::normalize`].

use chrono::{DateTime, SecondsFormat};

use crate::value::Value;

/// Render a value as a one-line string.
///
/// Scalars render as their literal form, strings are JSON-quoted, and
/// composites render as compact JSON with cycles replaced by
/// [`crate::CIRCULAR_SENTINEL`]. Extended kinds use readable forms:
/// function source text as written, dates as ISO-8601 UTC, regexes as
/// `/source/flags`, symbols as `Symbol(description)`.
pub fn serialize(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(_) | Value::Object(_) => value.to_json().to_string(),
        Value::Function(function) => function.source().to_string(),
        Value::Date(date) => format_date(date.epoch_ms()),
        Value::Regex(regex) => format!("/{}/{}", regex.source(), regex.flags()),
        Value::Symbol(symbol) => symbol.display_form(),
    }
}

/// JSON string quoting, shared with the encoded form so the same text
/// renders identically inside and outside composites.
fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// ISO-8601 UTC with millisecond precision. Instants beyond chrono's
/// calendar range fall back to a `Date(ms)` form rather than failing.
fn format_date(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(instant) => instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => format!("Date({epoch_ms})"),
    }
}
