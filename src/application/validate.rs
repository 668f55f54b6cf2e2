use crate::domain::types::ToolDescriptor;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("arguments must be a JSON object")]
    NotAnObject,
    #[error("missing required argument(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// A value that was present but does not have the shape the handler needs.
/// Surfaces as a backend-call failure rather than a validation failure: the
/// validator is strict on presence and lenient on shape.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("argument '{key}' must be a {expected}")]
pub struct ArgumentError {
    pub key: String,
    pub expected: &'static str,
}

impl ArgumentError {
    fn new(key: &str, expected: &'static str) -> Self {
        Self {
            key: key.to_string(),
            expected,
        }
    }
}

/// Argument object that passed the presence check for its descriptor.
/// Unknown keys are retained but never read.
#[derive(Debug, PartialEq)]
pub struct ValidatedArguments {
    fields: Map<String, Value>,
}

impl ValidatedArguments {
    pub fn text(&self, key: &str) -> Result<Option<&str>, ArgumentError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(ArgumentError::new(key, "string")),
        }
    }

    pub fn require_text(&self, key: &str) -> Result<&str, ArgumentError> {
        self.text(key)?
            .ok_or_else(|| ArgumentError::new(key, "string"))
    }

    pub fn integer(&self, key: &str) -> Result<Option<i64>, ArgumentError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number
                .as_i64()
                .map(Some)
                .ok_or_else(|| ArgumentError::new(key, "whole number")),
            Some(_) => Err(ArgumentError::new(key, "whole number")),
        }
    }

    pub fn require_integer(&self, key: &str) -> Result<i64, ArgumentError> {
        self.integer(key)?
            .ok_or_else(|| ArgumentError::new(key, "whole number"))
    }

    pub fn flag(&self, key: &str) -> Result<Option<bool>, ArgumentError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(ArgumentError::new(key, "boolean")),
        }
    }
}

/// Checks a raw invocation payload against the tool's declared contract.
/// Every missing required key is reported at once; unknown keys pass through
/// untouched; no type coercion happens here.
pub fn validate(
    descriptor: &ToolDescriptor,
    raw: Option<&Value>,
) -> Result<ValidatedArguments, ValidationError> {
    let fields = match raw {
        Some(Value::Object(map)) => map.clone(),
        _ => return Err(ValidationError::NotAnObject),
    };

    let missing: Vec<String> = descriptor
        .input_contract
        .iter()
        .filter(|spec| spec.required && !fields.contains_key(spec.key))
        .map(|spec| spec.key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(ValidatedArguments { fields })
}
