//! Validation engine for submitted form values.
//!
//! Stateless and total: every input produces a (possibly empty) list of
//! [`ValidationError`] values. Nothing here panics or returns `Err`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::FieldId;
use crate::types::{Field, FieldKind, FormData};

/// One constraint violation, addressed to the field that caused it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field_id: FieldId,
    pub message: String,
}

impl ValidationError {
    fn new(field: &Field, message: impl std::fmt::Display) -> Self {
        Self {
            field_id: field.id,
            message: format!("{} {}", field.label, message),
        }
    }
}

/// A value is empty when it is absent, null, or a blank string.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Check `values` against every field, in the order the fields are given.
///
/// Label fields are skipped. A required field with an empty value yields a
/// single "is required" error and no further checks; an optional empty field
/// yields nothing.
pub fn validate_form<'a, I>(fields: I, values: &FormData) -> Vec<ValidationError>
where
    I: IntoIterator<Item = &'a Field>,
{
    let mut errors = Vec::new();
    for field in fields {
        check_field(field, values.get(&field.id), &mut errors);
    }
    errors
}

/// Validate a single value against a single field, returning the first error.
pub fn validate_field(field: &Field, value: Option<&Value>) -> Option<ValidationError> {
    let mut errors = Vec::new();
    check_field(field, value, &mut errors);
    errors.into_iter().next()
}

fn check_field(field: &Field, value: Option<&Value>, errors: &mut Vec<ValidationError>) {
    if !field.is_submittable() {
        return;
    }

    if is_empty_value(value) {
        if field.required() {
            errors.push(ValidationError::new(field, "is required"));
        }
        return;
    }
    let Some(value) = value else {
        return;
    };

    match &field.kind {
        FieldKind::Label { .. } => {}
        FieldKind::Number { min, max, .. } => match coerce_number(value) {
            None => errors.push(ValidationError::new(field, "must be a valid number")),
            Some(n) => {
                if let Some(min) = min {
                    if n < *min {
                        errors.push(ValidationError::new(
                            field,
                            format_args!("must be at least {min}"),
                        ));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        errors.push(ValidationError::new(
                            field,
                            format_args!("must be at most {max}"),
                        ));
                    }
                }
            }
        },
        FieldKind::Text { .. } => {
            if !value.is_string() {
                errors.push(ValidationError::new(field, "must be text"));
            }
        }
        FieldKind::Enum { options, .. } => {
            let matches = value
                .as_str()
                .is_some_and(|v| options.iter().any(|o| o.value == v));
            if !matches {
                errors.push(ValidationError::new(
                    field,
                    "must be one of the available options",
                ));
            }
        }
        FieldKind::Boolean { .. } => {
            if !value.is_boolean() {
                errors.push(ValidationError::new(field, "must be true or false"));
            }
        }
    }
}

/// Numbers pass through; strings are trimmed and parsed. Anything that does
/// not end up finite is rejected.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
