//! Basic per-field validation of submitted strings.
//!
//! This is the binding step that runs before normalization: each field is
//! checked on its own against its kind and choice set. A field that fails
//! here is left out of the intermediate result and later receives its
//! default.

use crate::models::{FieldDefinition, FieldError, FieldKind, FieldValue};

pub fn bind(def: &FieldDefinition, raw: Option<&str>) -> Result<FieldValue, FieldError> {
    let value = raw.unwrap_or_default().trim();
    match def.kind {
        FieldKind::Text => Ok(FieldValue::Text(value.to_string())),
        FieldKind::Choice => bind_choice(def, value),
        FieldKind::Boolean => bind_boolean(def, value),
        FieldKind::Integer => bind_integer(def, value),
    }
}

fn bind_choice(def: &FieldDefinition, value: &str) -> Result<FieldValue, FieldError> {
    // An empty choice is not validated against the set here.
    if value.is_empty() || def.allows(value) {
        Ok(FieldValue::Text(value.to_string()))
    } else {
        Err(FieldError::InvalidChoice {
            field: def.name.to_string(),
            value: value.to_string(),
        })
    }
}

fn bind_boolean(def: &FieldDefinition, value: &str) -> Result<FieldValue, FieldError> {
    match value.to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "off" | "no" => Ok(FieldValue::Bool(false)),
        "true" | "1" | "on" | "yes" => Ok(FieldValue::Bool(true)),
        _ => Err(invalid_type(def, value)),
    }
}

fn bind_integer(def: &FieldDefinition, value: &str) -> Result<FieldValue, FieldError> {
    if value.is_empty() {
        return Ok(FieldValue::Int(None));
    }
    value
        .parse::<i64>()
        .map(|n| FieldValue::Int(Some(n)))
        .map_err(|_| invalid_type(def, value))
}

fn invalid_type(def: &FieldDefinition, value: &str) -> FieldError {
    FieldError::InvalidType {
        field: def.name.to_string(),
        value: value.to_string(),
        expected: def.kind.describe(),
    }
}
