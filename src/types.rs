//! Canonical BSON type aliases and native-kind inference

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::shape::Shape;
use crate::tags::split_trim;

/// The canonical BSON type aliases accepted by `$jsonSchema`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BsonType {
    String,
    Double,
    Object,
    Array,
    BinData,
    Undefined,
    ObjectId,
    Bool,
    Date,
    Null,
    Regex,
    DbPointer,
    Javascript,
    Symbol,
    JavascriptWithScope,
    Int,
    Timestamp,
    Long,
    Decimal,
    MinKey,
    MaxKey,
}

impl BsonType {
    /// The alias string used inside `bsonType` arrays.
    pub fn as_str(&self) -> &'static str {
        match self {
            BsonType::String => "string",
            BsonType::Double => "double",
            BsonType::Object => "object",
            BsonType::Array => "array",
            BsonType::BinData => "binData",
            BsonType::Undefined => "undefined",
            BsonType::ObjectId => "objectId",
            BsonType::Bool => "bool",
            BsonType::Date => "date",
            BsonType::Null => "null",
            BsonType::Regex => "regex",
            BsonType::DbPointer => "dbPointer",
            BsonType::Javascript => "javascript",
            BsonType::Symbol => "symbol",
            BsonType::JavascriptWithScope => "javascriptWithScope",
            BsonType::Int => "int",
            BsonType::Timestamp => "timestamp",
            BsonType::Long => "long",
            BsonType::Decimal => "decimal",
            BsonType::MinKey => "minKey",
            BsonType::MaxKey => "maxKey",
        }
    }
}

impl fmt::Display for BsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BsonType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "string" => BsonType::String,
            "double" => BsonType::Double,
            "object" => BsonType::Object,
            "array" => BsonType::Array,
            "binData" => BsonType::BinData,
            "undefined" => BsonType::Undefined,
            "objectId" => BsonType::ObjectId,
            "bool" => BsonType::Bool,
            "date" => BsonType::Date,
            "null" => BsonType::Null,
            "regex" => BsonType::Regex,
            "dbPointer" => BsonType::DbPointer,
            "javascript" => BsonType::Javascript,
            "symbol" => BsonType::Symbol,
            "javascriptWithScope" => BsonType::JavascriptWithScope,
            "int" => BsonType::Int,
            "timestamp" => BsonType::Timestamp,
            "long" => BsonType::Long,
            "decimal" => BsonType::Decimal,
            "minKey" => BsonType::MinKey,
            "maxKey" => BsonType::MaxKey,
            other => return Err(SchemaError::InvalidTypes(vec![other.to_string()])),
        })
    }
}

/// Native scalar kinds a shape descriptor can declare for a leaf value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Str,
    Bool,
    /// A map with arbitrary keys; becomes a plain object, never recursed.
    Map,
    /// An untyped value; defaults to an object id.
    Any,
}

impl Kind {
    /// Fixed kind to BSON type mapping, used when a field carries no `type` tag.
    ///
    /// 128-bit integers have no BSON representation and are rejected.
    pub fn bson_type(self) -> Result<BsonType> {
        Ok(match self {
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::U8 | Kind::U16 | Kind::U32 => BsonType::Int,
            Kind::I64 | Kind::U64 => BsonType::Long,
            Kind::F32 => BsonType::Double,
            Kind::F64 => BsonType::Decimal,
            Kind::Str => BsonType::String,
            Kind::Bool => BsonType::Bool,
            Kind::Map => BsonType::Object,
            Kind::Any => BsonType::ObjectId,
            Kind::I128 | Kind::U128 => return Err(SchemaError::UnsupportedKind(self)),
        })
    }
}

/// Resolves a field's BSON type list from its `type` tag, falling back to
/// the shape's native kind when the tag is empty.
///
/// Every tag segment is validated against the canonical alias set; the
/// error names all invalid segments at once. An explicit declaration always
/// wins over inference, even when it is partially invalid.
pub fn resolve_types(type_tag: &str, shape: &Shape) -> Result<Vec<BsonType>> {
    let mut out = Vec::new();
    let mut invalid = Vec::new();

    for segment in split_trim(type_tag, ',') {
        if segment.is_empty() {
            continue;
        }
        match segment.parse::<BsonType>() {
            Ok(bson_type) => out.push(bson_type),
            Err(_) => invalid.push(segment.to_string()),
        }
    }

    if !invalid.is_empty() {
        return Err(SchemaError::InvalidTypes(invalid));
    }
    if !out.is_empty() {
        return Ok(out);
    }

    Ok(vec![shape.inferred_type()?])
}
