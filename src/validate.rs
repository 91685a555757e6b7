//! Per-step validation producing field-level error messages.

use indexmap::IndexMap;
use regex::Regex;

use crate::core::data::FormData;
use crate::core::path::FieldPath;
use crate::core::value::Value;
use crate::schema::{Field, FieldType};

/// Field name -> single human-readable message. Recomputed in full on every
/// validation pass, never merged incrementally.
pub type Errors = IndexMap<String, String>;

/// Validate the visible fields of one step. Hidden fields are never passed
/// in and therefore never validated. Rules short-circuit per field in
/// priority order: required, then pattern, then min.
pub fn validate_step(fields: &[&Field], data: &FormData) -> Errors {
    let mut errors = Errors::new();
    for field in fields {
        if let Some(message) = validate_field(field, data) {
            errors.insert(field.name.clone(), message);
        }
    }
    errors
}

fn validate_field(field: &Field, data: &FormData) -> Option<String> {
    let value = data
        .get(&FieldPath::parse_lossy(&field.name))
        .cloned()
        .unwrap_or(Value::Null);

    if field.required {
        if value.is_missing() {
            return Some(format!("{} is required", field.label));
        }
        if field.field_type == FieldType::Checkbox && !value.is_truthy() {
            return Some("You must accept this declaration".to_string());
        }
    }

    let validation = field.validation.as_ref()?;

    if let Some(pattern) = validation.pattern.as_deref() {
        if value.is_truthy() {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(value.to_display_string().as_str()) {
                        return Some(validation.pattern_message.clone().unwrap_or_else(|| {
                            format!("Invalid {}", field.label.to_lowercase())
                        }));
                    }
                }
                Err(err) => {
                    // Malformed schema is the caller's precondition; degrade
                    // instead of failing the step.
                    tracing::warn!(field = %field.name, %err, "skipping uncompilable pattern");
                }
            }
        }
    }

    if let Some(min) = validation.min {
        let defined = !matches!(value, Value::Null) && value.as_text() != Some("");
        if defined {
            if let Some(number) = value.as_f64() {
                if number < min {
                    return Some(format!("Minimum value is {}", format_grouped(min)));
                }
            }
        }
    }

    None
}

/// Locale-style thousands grouping for the minimum-value message, e.g.
/// `10000` -> `"10,000"`.
pub fn format_grouped(n: f64) -> String {
    let negative = n < 0.0;
    let abs = n.abs();
    let int_part = abs.trunc() as u64;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = abs.fract();
    if fraction > 0.0 {
        let formatted = format!("{fraction:.3}");
        let trimmed = formatted
            .trim_start_matches('0')
            .trim_end_matches('0')
            .trim_end_matches('.');
        // A fraction that rounded up to 1.000 trims to nothing.
        if trimmed.starts_with('.') {
            grouped.push_str(trimmed);
        }
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
