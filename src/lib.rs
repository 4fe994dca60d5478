//! MongoDB collection validator schemas from typed shape descriptors
//!
//! Builds `$jsonSchema` validation documents for MongoDB collections by
//! recursively walking a [`Shape`] descriptor tree. Descriptors stand in
//! for runtime struct reflection: each field carries compact directive
//! tags controlling its property name, BSON types, validation constraints,
//! enum values, and nesting behavior.
//!
//! ## Features
//!
//! - **Tag-driven naming**: explicit `field`/`bson` tags with a
//!   first-char-lowered fallback to the declared name
//! - **Type inference**: declared `type` tags validated against the
//!   canonical BSON alias set, or inferred from the native kind
//! - **Constraint mini-language**: `"required,min=1,max=64"` style
//!   directives mapped onto the right schema keys per BSON type
//! - **Structural nesting**: nested structs, inline-merged structs, arrays
//!   of scalars, and arrays of structs
//! - **Non-fatal degradation**: malformed fields are dropped with a
//!   warning instead of failing the whole schema
//!
//! ## Example
//!
//! ```
//! use mongo_schema::{marshal, Field, Kind, Shape};
//!
//! let shape = Shape::record(vec![
//!     Field::new("Title", Kind::Str).validation("required,min=1,max=64"),
//!     Field::new("Order", Kind::I32).validation("min=1"),
//! ]);
//!
//! let out = marshal(&shape, "Task Validation", false).unwrap();
//! assert!(out.warnings.is_empty());
//! let schema = &out.document["validator"]["$jsonSchema"];
//! assert_eq!(schema["required"], serde_json::json!(["title"]));
//! ```

pub mod error;
pub mod marshal;
pub mod schema;
pub mod shape;
pub mod tags;
pub mod types;
pub mod validation;

pub use error::{FieldWarning, Result, SchemaError};
pub use marshal::{envelope, marshal, marshal_type, Marshaled, DEFAULT_TITLE};
pub use schema::MAX_DEPTH;
pub use shape::{Field, SchemaShape, Shape, Tags};
pub use types::{BsonType, Kind};
pub use validation::Validation;

/// A `$jsonSchema` document fragment: string keys to nested JSON values.
pub type Document = serde_json::Map<String, serde_json::Value>;
