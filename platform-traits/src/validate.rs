//! Parameter contract checks.
//!
//! Each check raises [`PlatformError::Validation`] synchronously; callers
//! behind an async boundary rely on the adapter to funnel it into a rejection.

use serde_json::Value;

use crate::error::{PlatformError, Result};
use crate::resources::format_resource;

/// Require `value` to be present.
pub fn not_null<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| {
        PlatformError::Validation(format_resource("Validate_NotNullError", &[name]))
    })
}

/// Require `value` to be a JSON string.
pub fn is_string<'a>(value: &'a Value, name: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        PlatformError::Validation(format_resource(
            "Validate_TypeCheckError",
            &[name, "string", json_type_name(value)],
        ))
    })
}

/// Require `value` to be non-empty.
pub fn not_empty(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PlatformError::Validation(format_resource(
            "Validate_StringNotEmptyError",
            &[name],
        )));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_null() {
        assert_eq!(not_null(Some(3), "count").unwrap(), 3);
        let err = not_null::<u8>(None, "count").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: count cannot be null.");
    }

    #[test]
    fn test_is_string() {
        assert_eq!(is_string(&json!("x"), "text").unwrap(), "x");

        let err = is_string(&json!(42), "text").unwrap_err();
        assert!(matches!(err, PlatformError::Validation(ref m)
            if m == "Expected text to be of type string but found number."));
    }

    #[test]
    fn test_not_empty() {
        assert!(not_empty("movies", "table").is_ok());
        assert!(matches!(
            not_empty("", "table"),
            Err(PlatformError::Validation(_))
        ));
    }
}
