//! Schema conformance checking for structured model output
//!
//! Constrained decoding steers generation toward the schema but does
//! not guarantee conformance. Payloads are re-checked here before
//! deserialization so a bad reply reports every divergence at once
//! instead of stopping at the first serde error.

use serde_json::Value;
use tracing::debug;

/// A single point where a payload diverges from its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path into the payload ("$.days", "$.flights[2].price")
    pub path: String,

    /// What was wrong at that path
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check a payload against a schema, collecting every violation
pub fn check(schema: &Value, payload: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_value(schema, payload, "$", &mut violations);
    debug!(violation_count = violations.len(), "check: done");
    violations
}

fn check_value(schema: &Value, payload: &Value, path: &str, out: &mut Vec<Violation>) {
    if payload.is_null() {
        if schema.get("nullable").and_then(Value::as_bool) != Some(true) {
            out.push(Violation {
                path: path.to_string(),
                message: "unexpected null".to_string(),
            });
        }
        return;
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array)
        && !allowed.contains(payload)
    {
        out.push(Violation {
            path: path.to_string(),
            message: format!("{payload} is not one of the allowed values"),
        });
        return;
    }

    let Some(expected) = schema.get("type").and_then(Value::as_str) else {
        return;
    };

    match expected {
        "object" => check_object(schema, payload, path, out),
        "array" => check_array(schema, payload, path, out),
        "string" => {
            if !payload.is_string() {
                out.push(type_mismatch(path, "string", payload));
            }
        }
        "integer" => {
            if !payload.is_i64() && !payload.is_u64() {
                out.push(type_mismatch(path, "integer", payload));
            }
        }
        "number" => {
            if !payload.is_number() {
                out.push(type_mismatch(path, "number", payload));
            }
        }
        "boolean" => {
            if !payload.is_boolean() {
                out.push(type_mismatch(path, "boolean", payload));
            }
        }
        _ => {}
    }
}

fn check_object(schema: &Value, payload: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(object) = payload.as_object() else {
        out.push(type_mismatch(path, "object", payload));
        return;
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(name) {
                out.push(Violation {
                    path: format!("{path}.{name}"),
                    message: "missing required field".to_string(),
                });
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, field_schema) in properties {
            if let Some(field) = object.get(name) {
                check_value(field_schema, field, &format!("{path}.{name}"), out);
            }
        }
    }
}

fn check_array(schema: &Value, payload: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(items) = payload.as_array() else {
        out.push(type_mismatch(path, "array", payload));
        return;
    };

    if let Some(item_schema) = schema.get("items") {
        for (index, item) in items.iter().enumerate() {
            check_value(item_schema, item, &format!("{path}[{index}]"), out);
        }
    }
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> Violation {
    Violation {
        path: path.to_string(),
        message: format!("expected {expected}, got {}", type_name(actual)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
