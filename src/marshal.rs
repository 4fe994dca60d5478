//! Marshalling entry points producing collection-validator documents

use serde_json::{json, Value};
use tracing::warn;

use crate::error::{FieldWarning, Result, SchemaError};
use crate::schema::build_schema;
use crate::shape::{SchemaShape, Shape};
use crate::Document;

/// Title used when the caller does not provide one.
pub const DEFAULT_TITLE: &str = "Schema Validation";

/// A marshalled collection validator.
#[derive(Debug, Clone, PartialEq)]
pub struct Marshaled {
    /// The full `{"validator": {"$jsonSchema": {...}}}` document.
    pub document: Value,
    /// Fields dropped from the schema, with the reason each was dropped.
    /// Warnings degrade single fields; they never indicate overall failure.
    pub warnings: Vec<FieldWarning>,
}

/// Builds the bare top-level `$jsonSchema` envelope, without properties.
///
/// This is what remains of a validator when marshalling fails because the
/// input shape is not a struct.
pub fn envelope(title: &str, additional_properties: bool) -> Document {
    let title = if title.is_empty() { DEFAULT_TITLE } else { title };

    let mut schema = Document::new();
    schema.insert("bsonType".to_string(), Value::String("object".to_string()));
    schema.insert("title".to_string(), Value::String(title.to_string()));
    schema.insert(
        "additionalProperties".to_string(),
        Value::Bool(additional_properties),
    );
    schema
}

/// Builds a collection validator document from a struct shape.
///
/// The shape is a template only: scalar contents never matter, but every
/// array must carry at least one element to act as its nested template.
/// One level of optional indirection is stripped from the top-level shape;
/// what remains must be a struct.
///
/// Fields that cannot be processed are dropped and reported in
/// [`Marshaled::warnings`] (and through `tracing`); sibling fields are
/// unaffected.
pub fn marshal(shape: &Shape, title: &str, additional_properties: bool) -> Result<Marshaled> {
    let mut schema = envelope(title, additional_properties);

    let Shape::Struct(fields) = shape.deref_optional() else {
        return Err(SchemaError::NotAStruct);
    };

    let (properties, required, warnings) = build_schema(fields, 0);
    for warning in &warnings {
        warn!(
            name = warning.name(),
            tag = %warning.tag(),
            error = %warning.error(),
            "field dropped from schema"
        );
    }

    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert(
        "required".to_string(),
        Value::Array(required.into_iter().map(Value::String).collect()),
    );

    Ok(Marshaled {
        document: json!({"validator": {"$jsonSchema": schema}}),
        warnings,
    })
}

/// [`marshal`] for any type that registers its own [`SchemaShape`].
pub fn marshal_type<T: SchemaShape>(title: &str, additional_properties: bool) -> Result<Marshaled> {
    marshal(&T::shape(), title, additional_properties)
}
