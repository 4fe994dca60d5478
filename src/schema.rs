//! Recursive schema construction for struct shapes
//!
//! Walks the fields of a struct shape in declaration order, builds a
//! resolved configuration per field, and composes the `properties` map,
//! the required-tag list, and the per-field warnings of a `$jsonSchema`
//! fragment. Fields that cannot be processed are dropped with a warning;
//! they never abort the traversal.

use serde_json::Value;

use crate::error::{FieldWarning, Result, SchemaError};
use crate::shape::{Field, Shape};
use crate::tags::{resolve_name, split_trim};
use crate::types::{resolve_types, BsonType};
use crate::validation::Validation;
use crate::Document;

/// Maximum struct nesting depth before traversal refuses to recurse.
///
/// Descriptor trees are finite by construction, but generated `SchemaShape`
/// impls for self-referential types would otherwise recurse without bound.
pub const MAX_DEPTH: usize = 64;

/// Fully resolved per-field configuration.
#[derive(Debug, Default)]
struct FieldConfig {
    tag: String,
    bson_type: Vec<BsonType>,
    validation: Validation,
    description: Option<String>,
    enum_values: Option<Vec<String>>,
    items_bson_type: Vec<BsonType>,
    items_validation: Validation,
    is_array: bool,
    is_array_of_struct: bool,
    is_struct: bool,
    is_inline: bool,
}

/// Resolves every tag of a field against its (optional-stripped) shape.
fn field_config(field: &Field, shape: &Shape, tag: String, inline: bool) -> Result<FieldConfig> {
    let is_struct = matches!(shape, Shape::Struct(_));
    let mut cfg = FieldConfig {
        tag,
        is_struct,
        // inline only means something for struct-shaped fields
        is_inline: is_struct && inline,
        ..FieldConfig::default()
    };

    if !field.tags.description.is_empty() {
        cfg.description = Some(field.tags.description.clone());
    }

    let enum_values: Vec<String> = split_trim(&field.tags.enum_values, ',')
        .into_iter()
        .map(str::to_string)
        .collect();
    if !enum_values.is_empty() {
        cfg.enum_values = Some(enum_values);
    }

    cfg.bson_type = resolve_types(&field.tags.type_tag, shape)?;

    cfg.validation = Validation::parse(&field.tags.validation)?;
    // an inline-merged object cannot itself be a required property
    cfg.validation.required = !cfg.is_inline && cfg.validation.required;

    let Shape::Array(elements) = shape else {
        return Ok(cfg);
    };
    cfg.is_array = true;

    // the first element is the template for everything nested
    let Some(element) = elements.first() else {
        return Err(SchemaError::EmptySlice);
    };
    let element = element.deref_optional();

    if matches!(element, Shape::Struct(_)) {
        cfg.is_array_of_struct = true;
        return Ok(cfg);
    }

    cfg.items_bson_type = resolve_types(&field.tags.items_type, element)?;
    cfg.items_validation = Validation::parse(&field.tags.items)?;

    Ok(cfg)
}

/// Builds the `properties` fragment for every field of a struct shape.
///
/// Returns the property map, the tags of required fields in declaration
/// order, and a warning for each dropped field.
pub(crate) fn build_schema(
    fields: &[Field],
    depth: usize,
) -> (Document, Vec<String>, Vec<FieldWarning>) {
    let mut properties = Document::new();
    let mut required = Vec::new();
    let mut warnings = Vec::new();

    for field in fields {
        let shape = field.shape.deref_optional();
        let (tag, inline) = resolve_name(&field.tags.field, &field.tags.bson, &field.name);

        let cfg = match field_config(field, shape, tag.clone(), inline) {
            Ok(cfg) => cfg,
            Err(err) => {
                warnings.push(FieldWarning::new(tag, field.name.clone(), err));
                continue;
            }
        };

        if (cfg.is_struct || cfg.is_array_of_struct) && depth >= MAX_DEPTH {
            warnings.push(FieldWarning::new(
                cfg.tag,
                field.name.clone(),
                SchemaError::DepthExceeded(MAX_DEPTH),
            ));
            continue;
        }

        let mut obj = Document::new();
        obj.insert("bsonType".to_string(), type_list(&cfg.bson_type));
        cfg.validation.apply(&cfg.bson_type, &mut obj);
        if cfg.validation.required {
            required.push(cfg.tag.clone());
        }

        // inline struct: nested fields merge into the parent by their own tags
        if cfg.is_inline {
            if let Shape::Struct(nested) = shape {
                let (props, reqs, errs) = build_schema(nested, depth + 1);
                properties.extend(props);
                required.extend(reqs);
                warnings.extend(errs);
            }
            continue;
        }

        // nested struct: recursion result wraps under the field's tag
        if cfg.is_struct {
            if let Shape::Struct(nested) = shape {
                let (props, reqs, errs) = build_schema(nested, depth + 1);
                obj.insert("properties".to_string(), Value::Object(props));
                obj.insert("required".to_string(), string_list(reqs));
                warnings.extend(errs);
            }
            properties.insert(cfg.tag, Value::Object(obj));
            continue;
        }

        // array of structs: first element recursed as the items template
        if cfg.is_array_of_struct {
            if let Shape::Array(elements) = shape {
                if let Some(Shape::Struct(nested)) =
                    elements.first().map(Shape::deref_optional)
                {
                    let (props, reqs, errs) = build_schema(nested, depth + 1);
                    let mut items = Document::new();
                    items.insert("bsonType".to_string(), type_list(&[BsonType::Object]));
                    items.insert("required".to_string(), string_list(reqs));
                    items.insert("properties".to_string(), Value::Object(props));
                    obj.insert("items".to_string(), Value::Object(items));
                    warnings.extend(errs);
                }
            }
            properties.insert(cfg.tag, Value::Object(obj));
            continue;
        }

        if cfg.is_array {
            let mut items = Document::new();
            items.insert("bsonType".to_string(), type_list(&cfg.items_bson_type));
            if let Some(values) = &cfg.enum_values {
                items.insert("enum".to_string(), string_list(values.clone()));
            }
            cfg.items_validation.apply(&cfg.items_bson_type, &mut items);
            if let Some(description) = &cfg.description {
                items.insert("description".to_string(), Value::String(description.clone()));
            }
            obj.insert("items".to_string(), Value::Object(items));
        } else {
            if let Some(description) = &cfg.description {
                obj.insert("description".to_string(), Value::String(description.clone()));
            }
            if let Some(values) = &cfg.enum_values {
                obj.insert("enum".to_string(), string_list(values.clone()));
            }
        }

        properties.insert(cfg.tag, Value::Object(obj));
    }

    (properties, required, warnings)
}

fn type_list(types: &[BsonType]) -> Value {
    Value::Array(
        types
            .iter()
            .map(|t| Value::String(t.as_str().to_string()))
            .collect(),
    )
}

fn string_list(values: Vec<String>) -> Value {
    Value::Array(values.into_iter().map(Value::String).collect())
}
