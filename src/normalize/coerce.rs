//! Named coercions from the all-string wire format.
//!
//! | wire value                      | result                        |
//! |---------------------------------|-------------------------------|
//! | `"3"`                           | `Some(3)`                     |
//! | absent, `""`, `"-1"`, `"2.5"`   | `None` (caller's default)     |
//! | `"true"`                        | `true`                        |
//! | anything else                   | `false`                       |
//! | `"2025-05-01T12:00:00Z"`        | `2025-05-01T12:00:00+00:00`   |

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use thiserror::Error;

use crate::normalize::tree::Node;

/// Why a record could not be built.
#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("record is not a mapping")]
    NotARecord,

    #[error("missing required field {0}")]
    MissingField(&'static str),

    #[error("field {field} has invalid value '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Decimal non-negative integer, `None` when absent or unparseable.
pub fn to_non_negative_int(node: Option<&Node>) -> Option<u64> {
    node.and_then(Node::text)
        .and_then(|text| text.trim().parse::<u64>().ok())
}

/// `true` only for the exact lowercase string `"true"`.
pub fn to_bool(node: Option<&Node>) -> bool {
    matches!(node.and_then(Node::text), Some("true"))
}

/// Text content, empty when absent.
pub fn to_text(node: Option<&Node>) -> String {
    node.and_then(Node::text).unwrap_or_default().to_string()
}

/// Parse a wire timestamp and express it at a `+00:00` offset.
///
/// Accepts RFC 3339 (`Z` or numeric offset) and offset-less ISO-8601, which
/// is taken as UTC.
pub fn to_utc_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, CoercionError> {
    let raw = raw.trim();
    let utc = match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(rfc_error) => match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(naive) => Utc.from_utc_datetime(&naive),
            Err(_) => {
                return Err(CoercionError::InvalidTimestamp {
                    value: raw.to_string(),
                    source: rfc_error,
                })
            }
        },
    };
    Ok(utc.with_timezone(&Utc.fix()))
}
