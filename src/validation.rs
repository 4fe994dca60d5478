//! The validation constraint mini-language
//!
//! A `validation` tag is a comma-separated list of `key` or `key=value`
//! directives (`"required,min=1,max=64"`). Parsing produces a
//! [`Validation`] set; applying it writes the schema keys appropriate for
//! each BSON type in a field's type list.

use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::tags::split_trim;
use crate::types::BsonType;
use crate::Document;

/// Parsed form of a field's `validation` tag.
///
/// Optional constraints distinguish "absent" from "present with a value";
/// an absent constraint never emits a schema key. The two flags are plain
/// bools because `uniqueItems` is always written for array types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    pub required: bool,
    pub unique_items: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
    pub pattern_properties: Option<String>,
    pub multiple_of: Option<f64>,
}

impl Validation {
    /// Parses a `validation` tag.
    ///
    /// `required` and `uniqueItems` must carry no value; every other
    /// directive must carry exactly one. After the full pass, min larger
    /// than max is rejected as an invariant violation.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut out = Validation::default();

        for item in split_trim(tag, ',') {
            if item.is_empty() {
                continue;
            }

            let parts = split_trim(item, '=');
            let key = parts[0];
            if key.is_empty() {
                continue;
            }

            if key == "required" || key == "uniqueItems" {
                if parts.len() != 1 {
                    return Err(SchemaError::UnexpectedValue(key.to_string()));
                }
            } else if parts.len() != 2 {
                return Err(SchemaError::MissingValue(key.to_string()));
            }

            match key {
                "required" => out.required = true,
                "uniqueItems" => out.unique_items = true,
                "min" => out.min = Some(parse_number(key, parts[1])?),
                "max" => out.max = Some(parse_number(key, parts[1])?),
                "multipleOf" => out.multiple_of = Some(parse_number(key, parts[1])?),
                "pattern" => out.pattern = Some(parts[1].to_string()),
                "patternProperties" => out.pattern_properties = Some(parts[1].to_string()),
                other => return Err(SchemaError::UnknownDirective(other.to_string())),
            }
        }

        if let (Some(min), Some(max)) = (out.min, out.max) {
            if max < min {
                return Err(SchemaError::MinAboveMax { min, max });
            }
        }

        Ok(out)
    }

    /// Writes the schema keys for this set that apply to each type in `types`.
    ///
    /// Numeric bounds go out verbatim; length, item and property counts are
    /// truncated to integers. `patternProperties` is meaningless without a
    /// `pattern` and is silently dropped when one is not set. `uniqueItems`
    /// is written for array types no matter what. Multiple types apply all
    /// matching branches additively into the same document.
    pub fn apply(&self, types: &[BsonType], doc: &mut Document) {
        for bson_type in types {
            match bson_type {
                BsonType::Double | BsonType::Int | BsonType::Long | BsonType::Decimal => {
                    set_number(doc, "maximum", self.max);
                    set_number(doc, "minimum", self.min);
                    set_number(doc, "multipleOf", self.multiple_of);
                }
                BsonType::String => {
                    set_integer(doc, "maxLength", self.max);
                    set_integer(doc, "minLength", self.min);
                    set_string(doc, "pattern", &self.pattern);
                    if self.pattern.is_some() {
                        set_string(doc, "patternProperties", &self.pattern_properties);
                    }
                }
                BsonType::Array => {
                    set_integer(doc, "maxItems", self.max);
                    set_integer(doc, "minItems", self.min);
                    doc.insert("uniqueItems".to_string(), Value::Bool(self.unique_items));
                }
                BsonType::Object => {
                    set_integer(doc, "maxProperties", self.max);
                    set_integer(doc, "minProperties", self.min);
                }
                _ => {}
            }
        }
    }
}

fn parse_number(directive: &str, raw: &str) -> Result<f64> {
    raw.parse().map_err(|source| SchemaError::InvalidNumber {
        directive: directive.to_string(),
        source,
    })
}

fn set_number(doc: &mut Document, key: &str, val: Option<f64>) {
    if let Some(v) = val {
        doc.insert(key.to_string(), Value::from(v));
    }
}

// Truncation toward zero, not rounding.
fn set_integer(doc: &mut Document, key: &str, val: Option<f64>) {
    if let Some(v) = val {
        doc.insert(key.to_string(), Value::from(v as i64));
    }
}

fn set_string(doc: &mut Document, key: &str, val: &Option<String>) {
    if let Some(v) = val {
        doc.insert(key.to_string(), Value::String(v.clone()));
    }
}
