//! Inbound request validation.
//!
//! Turns an arbitrary JSON body into a [`GenerationRequest`], applying
//! defaults for absent fields and collecting every violated constraint
//! instead of stopping at the first one. Runs before any provider is
//! contacted and has no side effects.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{GenerationRequest, ImageModel, ImageSize, Provider, Style};

/// Minimum prompt length in characters, after trimming.
pub const MIN_PROMPT_CHARS: usize = 5;

/// Maximum prompt length in characters, after trimming.
pub const MAX_PROMPT_CHARS: usize = 2000;

/// Smallest number of panels a request may ask for.
pub const MIN_COUNT: i64 = 1;

/// Largest number of panels a request may ask for.
pub const MAX_COUNT: i64 = 4;

/// Validate a raw request body.
///
/// Unknown fields are ignored. Enum fields must match one of the allowed
/// values exactly; nothing is coerced.
pub fn validate(body: &Value) -> Result<GenerationRequest, ValidationError> {
    let mut errors = ValidationError::default();

    let Some(obj) = body.as_object() else {
        errors.form(format!("Expected object, received {}", type_name(body)));
        return Err(errors);
    };

    let prompt = validate_prompt(obj, &mut errors);
    let count = validate_count(obj, &mut errors);
    let provider = validate_enum(obj, "provider", &Provider::ALL, Provider::as_str, &mut errors);
    let model = validate_enum(obj, "model", &ImageModel::ALL, ImageModel::as_str, &mut errors);
    let size = validate_enum(obj, "size", &ImageSize::ALL, ImageSize::as_str, &mut errors);
    let style = validate_enum(obj, "style", &Style::ALL, Style::as_str, &mut errors);

    match (prompt, count, provider, model, size, style) {
        (Some(prompt), Some(count), Some(provider), Some(model), Some(size), Some(style))
            if errors.is_empty() =>
        {
            Ok(GenerationRequest {
                prompt,
                count,
                provider,
                model,
                size,
                style,
            })
        }
        _ => Err(errors),
    }
}

fn validate_prompt(obj: &Map<String, Value>, errors: &mut ValidationError) -> Option<String> {
    let value = match obj.get("prompt") {
        Some(value) => value,
        None => {
            errors.field("prompt", "Required");
            return None;
        }
    };

    let Some(raw) = value.as_str() else {
        errors.field(
            "prompt",
            format!("Expected string, received {}", type_name(value)),
        );
        return None;
    };

    let prompt = raw.trim();
    let chars = prompt.chars().count();
    if chars < MIN_PROMPT_CHARS {
        errors.field("prompt", "Prompt too short");
        return None;
    }
    if chars > MAX_PROMPT_CHARS {
        errors.field("prompt", "Prompt too long");
        return None;
    }
    Some(prompt.to_string())
}

fn validate_count(obj: &Map<String, Value>, errors: &mut ValidationError) -> Option<usize> {
    let value = match obj.get("count") {
        Some(value) => value,
        None => return Some(GenerationRequest::DEFAULT_COUNT),
    };

    let Value::Number(number) = value else {
        errors.field(
            "count",
            format!("Expected number, received {}", type_name(value)),
        );
        return None;
    };

    // Integers past i64::MAX are still integers, just far too large.
    if number.as_i64().is_none() && number.as_u64().is_some() {
        errors.field(
            "count",
            format!("Number must be less than or equal to {MAX_COUNT}"),
        );
        return None;
    }

    // Integral floats such as 2.0 count as integers.
    let count = match number.as_i64() {
        Some(n) => n,
        None => match number.as_f64() {
            // Saturating cast; out-of-range values fail the bounds below.
            Some(f) if f.fract() == 0.0 => f as i64,
            _ => {
                errors.field("count", "Expected integer, received float");
                return None;
            }
        },
    };

    if count < MIN_COUNT {
        errors.field(
            "count",
            format!("Number must be greater than or equal to {MIN_COUNT}"),
        );
        return None;
    }
    if count > MAX_COUNT {
        errors.field(
            "count",
            format!("Number must be less than or equal to {MAX_COUNT}"),
        );
        return None;
    }
    Some(count as usize)
}

fn validate_enum<T: Copy + Default>(
    obj: &Map<String, Value>,
    field: &'static str,
    allowed: &[T],
    name: fn(&T) -> &'static str,
    errors: &mut ValidationError,
) -> Option<T> {
    let value = match obj.get(field) {
        Some(value) => value,
        None => return Some(T::default()),
    };

    let expected = allowed
        .iter()
        .map(|v| format!("'{}'", name(v)))
        .collect::<Vec<_>>()
        .join(" | ");

    let Some(raw) = value.as_str() else {
        errors.field(
            field,
            format!("Expected {expected}, received {}", type_name(value)),
        );
        return None;
    };

    match allowed.iter().find(|v| name(v) == raw) {
        Some(v) => Some(*v),
        None => {
            errors.field(
                field,
                format!("Invalid enum value. Expected {expected}, received '{raw}'"),
            );
            None
        }
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
