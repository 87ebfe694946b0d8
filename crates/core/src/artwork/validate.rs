//! Boundary validation for artwork request bodies.
use serde_json::{Map, Value};
use thiserror::Error;

use super::model::{ArtworkFields, ArtworkPatch, CALLER_FIELDS, SERVER_FIELDS};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{0}` is managed by the server and cannot be set")]
    ReadOnlyField(String),
    #[error("invalid field value: {0}")]
    InvalidValue(String),
    #[error("price must be a non-negative number")]
    NegativePrice,
    #[error("update must set at least one field")]
    EmptyPatch,
    #[error("userEmail is required")]
    MissingUserEmail,
}

/// Validate a create body.
///
/// Server-managed keys are dropped so the record always starts from its
/// initial counters; anything else outside the schema is rejected.
pub fn new_artwork(body: Value) -> Result<ArtworkFields, ValidationError> {
    let mut map = into_object(body)?;
    map.retain(|key, _| !SERVER_FIELDS.contains(&key.as_str()));
    parse_fields(map)
}

/// Validate an update body into a shallow patch.
pub fn artwork_patch(body: Value) -> Result<ArtworkPatch, ValidationError> {
    let map = into_object(body)?;
    if let Some(key) = map.keys().find(|k| SERVER_FIELDS.contains(&k.as_str())) {
        return Err(ValidationError::ReadOnlyField(key.clone()));
    }
    let patch = ArtworkPatch(parse_fields(map)?);
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }
    Ok(patch)
}

/// Validate the user identifier carried by a favorite request.
pub fn user_email(raw: &str) -> Result<&str, ValidationError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingUserEmail);
    }
    Ok(email)
}

fn into_object(body: Value) -> Result<Map<String, Value>, ValidationError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::NotAnObject),
    }
}

fn parse_fields(map: Map<String, Value>) -> Result<ArtworkFields, ValidationError> {
    if let Some(key) = map.keys().find(|k| !CALLER_FIELDS.contains(&k.as_str())) {
        return Err(ValidationError::UnknownField(key.clone()));
    }
    let fields: ArtworkFields = serde_json::from_value(Value::Object(map))
        .map_err(|e| ValidationError::InvalidValue(e.to_string()))?;
    match fields.price {
        Some(price) if !price.is_finite() || price < 0.0 => Err(ValidationError::NegativePrice),
        _ => Ok(fields),
    }
}
