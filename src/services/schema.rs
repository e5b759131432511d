use schemars::generate::SchemaSettings;
use serde_json::Value;
use thiserror::Error;

use crate::models::EvaluationResult;
use crate::services::llm::{JsonSchemaFormat, ResponseFormat};

pub const EVALUATION_SCHEMA_NAME: &str = "evaluation_result";

#[derive(Debug, Error)]
pub enum SchemaViolation {
    #[error("evaluation payload does not match schema: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// JSON Schema of [`EvaluationResult`], closed and inlined so providers in
/// strict structured-output mode accept it.
pub fn evaluation_schema() -> Value {
    let generator = SchemaSettings::draft2020_12()
        .with(|s| s.inline_subschemas = true)
        .into_generator();
    let mut schema = generator
        .into_root_schema_for::<EvaluationResult>()
        .to_value();
    close_schema(&mut schema);
    schema
}

pub fn evaluation_response_format() -> ResponseFormat {
    ResponseFormat::JsonSchema {
        json_schema: JsonSchemaFormat {
            name: EVALUATION_SCHEMA_NAME.to_string(),
            schema: evaluation_schema(),
            strict: true,
        },
    }
}

/// Accepts a candidate payload only if it has every field with the right
/// type, a known `similarity` and a score within `0..=100`.
pub fn validate(candidate: Value) -> Result<EvaluationResult, SchemaViolation> {
    Ok(serde_json::from_value(candidate)?)
}

// Strict mode wants every property required, no extra properties and no
// keywords it does not understand.
fn close_schema(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };
    map.remove("$schema");
    map.remove("title");
    map.remove("format");

    if let Some(Value::Object(properties)) = map.get_mut("properties") {
        let required: Vec<Value> = properties.keys().cloned().map(Value::String).collect();
        for property in properties.values_mut() {
            close_schema(property);
        }
        map.insert("required".to_string(), Value::Array(required));
        map.insert("additionalProperties".to_string(), Value::Bool(false));
    }
    if let Some(items) = map.get_mut("items") {
        close_schema(items);
    }
}
