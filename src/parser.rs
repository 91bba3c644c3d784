//! Validation of the model's raw output. A body failing any check is rejected
//! whole; nothing is coerced or partially accepted.

use serde_json::{Map, Value};

use crate::error::{GenerationError, Result};
use crate::models::ProductDescription;

pub fn parse_description(raw: &str) -> Result<ProductDescription> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| GenerationError::MalformedResponse(format!("not valid JSON: {e}")))?;
    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(GenerationError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )))
        }
    };

    let title = string_field(&fields, "title")?;
    let long_description = string_field(&fields, "longDescription")?;
    let short_description = string_field(&fields, "shortDescription")?;
    let tags = tags_field(&fields)?;

    for (field, text) in [
        ("title", title),
        ("longDescription", long_description),
        ("shortDescription", short_description),
    ] {
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyField { field });
        }
    }
    if tags.is_empty() {
        return Err(GenerationError::EmptyField { field: "tags" });
    }

    Ok(ProductDescription {
        title: title.to_string(),
        long_description: long_description.to_string(),
        short_description: short_description.to_string(),
        tags,
    })
}

fn string_field<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Result<&'a str> {
    match fields.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(GenerationError::SchemaMismatch {
            field,
            reason: format!("expected a string, got {}", type_name(other)),
        }),
        None => Err(GenerationError::SchemaMismatch { field, reason: "missing".into() }),
    }
}

fn tags_field(fields: &Map<String, Value>) -> Result<Vec<String>> {
    let items = match fields.get("tags") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(GenerationError::SchemaMismatch {
                field: "tags",
                reason: format!("expected an array of strings, got {}", type_name(other)),
            })
        }
        None => return Err(GenerationError::SchemaMismatch { field: "tags", reason: "missing".into() }),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(GenerationError::SchemaMismatch {
                field: "tags",
                reason: format!("element {i} is {}, expected a string", type_name(other)),
            }),
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
