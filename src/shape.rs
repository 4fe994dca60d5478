//! Shape descriptors for schema structs
//!
//! Rust has no runtime struct reflection, so the traversal works off an
//! explicit descriptor tree: each schema struct is registered as a
//! [`Shape`] listing its fields, their directive tags, and their nested
//! shapes. Descriptors are plain serde data and can also be loaded from
//! JSON files (see the `mongo-schema-gen` binary).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{BsonType, Kind};

/// The shape of a single value as seen by the traversal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// A scalar leaf of the given native kind.
    Scalar(Kind),
    /// A structured record with named, tagged fields.
    Struct(Vec<Field>),
    /// A slice or array; the first element acts as the nested shape template,
    /// so an array that should describe structs must not be empty.
    Array(Vec<Shape>),
    /// One level of nullable indirection around an inner shape. Whether a
    /// value is actually present never matters for shape purposes.
    Optional(Box<Shape>),
}

impl Shape {
    /// A structured record shape.
    pub fn record(fields: Vec<Field>) -> Self {
        Shape::Struct(fields)
    }

    /// An array shape with a single element template.
    pub fn array_of(element: impl Into<Shape>) -> Self {
        Shape::Array(vec![element.into()])
    }

    /// An array shape without an element template. Marshalling drops such
    /// a field with a warning; this exists to describe that degenerate case.
    pub fn empty_array() -> Self {
        Shape::Array(Vec::new())
    }

    /// One level of nullable indirection.
    pub fn optional(inner: impl Into<Shape>) -> Self {
        Shape::Optional(Box::new(inner.into()))
    }

    /// Strips at most one level of optional indirection.
    pub(crate) fn deref_optional(&self) -> &Shape {
        match self {
            Shape::Optional(inner) => inner,
            other => other,
        }
    }

    /// The BSON type this shape maps to when no `type` tag overrides it.
    pub(crate) fn inferred_type(&self) -> Result<BsonType> {
        match self {
            Shape::Scalar(kind) => kind.bson_type(),
            Shape::Struct(_) => Ok(BsonType::Object),
            Shape::Array(_) => Ok(BsonType::Array),
            Shape::Optional(inner) => inner.inferred_type(),
        }
    }
}

impl From<Kind> for Shape {
    fn from(kind: Kind) -> Self {
        Shape::Scalar(kind)
    }
}

/// Raw per-field directive strings, mirroring struct-tag metadata.
///
/// All tags default to empty, which means "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tags {
    /// Explicit property name, optionally inline flagged (`"name,inline"`).
    pub field: String,
    /// Alternate property name; its first comma-segment is the fallback.
    pub bson: String,
    /// Comma-separated BSON type override (`"string,decimal"`).
    #[serde(rename = "type")]
    pub type_tag: String,
    /// BSON type override for array elements.
    pub items_type: String,
    /// Validation directives for the field itself (`"required,min=1"`).
    pub validation: String,
    /// Validation directives for array elements.
    pub items: String,
    /// Free-form description attached to the fragment.
    pub description: String,
    /// Comma-separated allowed string values.
    #[serde(rename = "enum")]
    pub enum_values: String,
}

/// A named, tagged member of a struct shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Declared (source-level) field name.
    pub name: String,
    /// Directive strings attached to the field.
    #[serde(default)]
    pub tags: Tags,
    /// Shape of the field's value.
    pub shape: Shape,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        Self {
            name: name.into(),
            tags: Tags::default(),
            shape: shape.into(),
        }
    }

    /// Sets the explicit `field` tag (`"name"` or `"name,inline"`).
    pub fn field_tag(mut self, value: impl Into<String>) -> Self {
        self.tags.field = value.into();
        self
    }

    /// Sets the alternate `bson` name tag.
    pub fn bson_tag(mut self, value: impl Into<String>) -> Self {
        self.tags.bson = value.into();
        self
    }

    /// Sets the comma-separated BSON type override.
    pub fn type_tag(mut self, value: impl Into<String>) -> Self {
        self.tags.type_tag = value.into();
        self
    }

    /// Sets the BSON type override for array elements.
    pub fn items_type(mut self, value: impl Into<String>) -> Self {
        self.tags.items_type = value.into();
        self
    }

    /// Sets the validation directives for the field itself.
    pub fn validation(mut self, value: impl Into<String>) -> Self {
        self.tags.validation = value.into();
        self
    }

    /// Sets the validation directives for array elements.
    pub fn items(mut self, value: impl Into<String>) -> Self {
        self.tags.items = value.into();
        self
    }

    /// Sets the description attached to the field's fragment.
    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.tags.description = value.into();
        self
    }

    /// Sets the comma-separated allowed string values.
    pub fn enum_values(mut self, value: impl Into<String>) -> Self {
        self.tags.enum_values = value.into();
        self
    }
}

/// Implemented by types that can describe their own schema shape.
///
/// This is the registration seam: hand-written impls today, derive macros
/// or build-time generation later.
pub trait SchemaShape {
    /// Descriptor tree for the implementing type.
    fn shape() -> Shape;
}
