//! ISO-8601 date handling.
//!
//! The backend only ever emits UTC timestamps of the form
//! `YYYY-MM-DDThh:mm:ssZ` or `YYYY-MM-DDThh:mm:ss.fffZ`; anything else is not
//! treated as a date.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Timelike, Utc};
use serde_json::Value;

use crate::error::Result;
use crate::validate;

const WITH_MILLIS: &[u8] = b"dddd-dd-ddTdd:dd:dd.dddZ";
const WITHOUT_MILLIS: &[u8] = b"dddd-dd-ddTdd:dd:ddZ";

/// Parse `text` if it is a strict ISO-8601 UTC timestamp.
///
/// Returns `None` for anything that does not match the pattern or names an
/// impossible calendar date; malformed input never produces an error.
pub fn try_parse_iso_date(text: &str) -> Option<DateTime<Utc>> {
    let bytes = text.as_bytes();
    let has_millis = match bytes.len() {
        len if len == WITH_MILLIS.len() => true,
        len if len == WITHOUT_MILLIS.len() => false,
        _ => return None,
    };
    let shape = if has_millis { WITH_MILLIS } else { WITHOUT_MILLIS };

    let matches = bytes.iter().zip(shape).all(|(c, expected)| match expected {
        b'd' => c.is_ascii_digit(),
        _ => c == expected,
    });
    // chrono reads second 60 as a leap second and folds it into :59.
    if !matches || &text[17..19] == "60" {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(&text[..19], "%Y-%m-%dT%H:%M:%S").ok()?;
    let naive = if has_millis {
        let millis: u32 = text[20..23].parse().ok()?;
        naive.with_nanosecond(millis * 1_000_000)?
    } else {
        naive
    };

    Some(Utc.from_utc_datetime(&naive))
}

/// Like [`try_parse_iso_date`], for values pulled out of a JSON document.
///
/// # Errors
///
/// Returns [`PlatformError::Validation`](crate::PlatformError::Validation) if
/// `value` is not a JSON string.
pub fn try_parse_iso_date_value(value: &Value) -> Result<Option<DateTime<Utc>>> {
    let text = validate::is_string(value, "text")?;
    Ok(try_parse_iso_date(text))
}

/// Format `date` the way the backend expects: UTC with millisecond precision.
pub fn format_iso_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
