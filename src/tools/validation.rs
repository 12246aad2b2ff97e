//! Validate tool call arguments against a synthesized schema before execution.

use super::schema::TypeHint;
use crate::error::{Result, ToolError};

/// Validate call arguments against a JSON Schema object.
///
/// Top-level only: required field presence and property type checks.
/// Untyped properties accept anything, and `null` is accepted wherever the
/// property's declared default is `null`. Arguments absent from `properties`
/// are left for binding to reject. Returns the first violation found as
/// [`ToolError::Validation`].
pub fn validate_arguments(
    args: &serde_json::Map<String, serde_json::Value>,
    schema: &serde_json::Value,
) -> Result<()> {
    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for name in required.iter().filter_map(|v| v.as_str()) {
            if !args.contains_key(name) {
                return Err(ToolError::Validation(format!(
                    "missing required field '{name}'"
                )));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) else {
        return Ok(());
    };

    for (key, value) in args {
        let Some(property) = properties.get(key) else {
            continue;
        };
        if value.is_null() && property.get("default").is_some_and(|d| d.is_null()) {
            continue;
        }
        let Some(expected) = property.get("type").and_then(|v| v.as_str()) else {
            continue;
        };
        if !accepts(TypeHint::parse(expected), value) {
            return Err(ToolError::Validation(format!(
                "field '{key}' expected type '{expected}', got {}",
                shape_of(value)
            )));
        }
    }

    Ok(())
}

fn accepts(hint: TypeHint, value: &serde_json::Value) -> bool {
    match hint {
        TypeHint::Integer => value.is_i64() || value.is_u64(),
        TypeHint::Number => value.is_number(),
        TypeHint::String => value.is_string(),
        TypeHint::Boolean => value.is_boolean(),
        TypeHint::Array => value.is_array(),
        TypeHint::Object => value.is_object(),
        TypeHint::Untyped => true,
    }
}

/// Name of the JSON shape of `value`, in schema vocabulary.
fn shape_of(value: &serde_json::Value) -> String {
    let hint = match value {
        serde_json::Value::Null => return "null".to_string(),
        serde_json::Value::Bool(_) => TypeHint::Boolean,
        serde_json::Value::Number(_) => TypeHint::Number,
        serde_json::Value::String(_) => TypeHint::String,
        serde_json::Value::Array(_) => TypeHint::Array,
        serde_json::Value::Object(_) => TypeHint::Object,
    };
    hint.to_string()
}
