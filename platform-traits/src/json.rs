//! JSON conversion hooks.
//!
//! Serialization goes through these functions rather than `serde_json`
//! directly so hosts share one place to hook custom conversions.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Convert a value into JSON text.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Parse JSON text into `T`.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// Hand back the value the platform keeps after an update.
///
/// Hosts that cannot mutate caller-owned objects in place return `updated`
/// and leave `original` untouched.
pub fn allow_platform_to_mutate_original(_original: &Value, updated: Value) -> Value {
    updated
}

/// `#[serde(with = "platform_traits::json::iso8601")]` for `DateTime<Utc>`
/// fields, using the backend's millisecond-precision UTC format.
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::date::{format_iso_date, try_parse_iso_date};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso_date(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        try_parse_iso_date(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 date: {}", text)))
    }
}
