//! End-to-end marshalling tests
//!
//! Builds full validator documents from realistic shape descriptors and
//! compares them against their expected `$jsonSchema` output.

use mongo_schema::{
    envelope, marshal, marshal_type, Field, Kind, SchemaError, SchemaShape, Shape,
};
use serde_json::{json, Value};

fn audit_shape() -> Shape {
    Shape::record(vec![
        Field::new("CreatedAt", Shape::optional(Kind::Any))
            .bson_tag("createdAt")
            .type_tag("date")
            .validation("required"),
        Field::new("CreatedBy", Kind::Str)
            .bson_tag("createdBy")
            .validation("required"),
        Field::new("UpdatedAt", Shape::optional(Kind::Any))
            .bson_tag("updatedAt")
            .type_tag("date"),
        Field::new("UpdatedBy", Kind::Str).bson_tag("updatedBy"),
    ])
}

fn tag_shape() -> Shape {
    Shape::record(vec![
        Field::new("ID", Kind::Any).bson_tag("_id"),
        Field::new("BoardID", Kind::Any)
            .bson_tag("boardId")
            .validation("required"),
        Field::new("Name", Kind::Str)
            .bson_tag("name")
            .validation("required,min=1,max=64"),
        Field::new("Color", Kind::Str)
            .bson_tag("color")
            .validation("required"),
        Field::new("Audit", audit_shape())
            .field_tag(",inline")
            .bson_tag("audit"),
    ])
}

fn attachment_shape() -> Shape {
    Shape::record(vec![
        Field::new("ID", Kind::Any).bson_tag("_id"),
        Field::new("Name", Kind::Str).bson_tag("title"),
        Field::new("Type", Kind::Str)
            .bson_tag("type")
            .enum_values("document,image,other"),
        Field::new("Url", Kind::Str)
            .bson_tag("url")
            .validation("required,pattern=^(ftp|http|https)://[^ \"]+$"),
        Field::new("Audit", audit_shape())
            .field_tag(",inline")
            .bson_tag("audit"),
    ])
}

fn board_item_shape() -> Shape {
    Shape::record(vec![
        Field::new("ID", Kind::Any).bson_tag("_id"),
        Field::new("BoardID", Kind::Any)
            .bson_tag("boardId")
            .validation("required"),
        Field::new("StatusID", Kind::Any)
            .bson_tag("statusId")
            .validation("required"),
        Field::new("Assignee", Kind::Str).bson_tag("assignee"),
        Field::new("Reporter", Kind::Str).bson_tag("reporter"),
        Field::new("Title", Kind::Str)
            .bson_tag("title")
            .validation("required,min=1,max=256"),
        Field::new("Content", Kind::Str).bson_tag("content"),
        Field::new("Order", Kind::I32)
            .bson_tag("order")
            .validation("required,min=1"),
        Field::new("Tag", tag_shape()).validation("required"),
        Field::new("Attachments", Shape::array_of(attachment_shape())).bson_tag("attachments"),
        Field::new("Test", Shape::array_of(Kind::Str))
            .bson_tag("test")
            .validation("required,min=1")
            .items("max=20"),
        Field::new("TagIDs", Shape::array_of(Kind::Any)).bson_tag("tagIDs"),
        Field::new("Audit", audit_shape())
            .field_tag(",inline")
            .bson_tag("audit"),
    ])
}

fn audit_properties() -> Value {
    json!({
        "createdAt": {"bsonType": ["date"]},
        "createdBy": {"bsonType": ["string"]},
        "updatedAt": {"bsonType": ["date"]},
        "updatedBy": {"bsonType": ["string"]}
    })
}

fn board_item_document(title: &str) -> Value {
    let mut tag_properties = json!({
        "_id": {"bsonType": ["objectId"]},
        "boardId": {"bsonType": ["objectId"]},
        "name": {"bsonType": ["string"], "minLength": 1, "maxLength": 64},
        "color": {"bsonType": ["string"]}
    });
    merge(&mut tag_properties, audit_properties());

    let mut attachment_properties = json!({
        "_id": {"bsonType": ["objectId"]},
        "title": {"bsonType": ["string"]},
        "type": {"bsonType": ["string"], "enum": ["document", "image", "other"]},
        "url": {"bsonType": ["string"], "pattern": "^(ftp|http|https)://[^ \"]+$"}
    });
    merge(&mut attachment_properties, audit_properties());

    let mut properties = json!({
        "_id": {"bsonType": ["objectId"]},
        "boardId": {"bsonType": ["objectId"]},
        "statusId": {"bsonType": ["objectId"]},
        "assignee": {"bsonType": ["string"]},
        "reporter": {"bsonType": ["string"]},
        "title": {"bsonType": ["string"], "minLength": 1, "maxLength": 256},
        "content": {"bsonType": ["string"]},
        "order": {"bsonType": ["int"], "minimum": 1.0},
        "tag": {
            "bsonType": ["object"],
            "properties": tag_properties,
            "required": ["boardId", "name", "color", "createdAt", "createdBy"]
        },
        "attachments": {
            "bsonType": ["array"],
            "items": {
                "bsonType": ["object"],
                "required": ["url", "createdAt", "createdBy"],
                "properties": attachment_properties
            },
            "uniqueItems": false
        },
        "test": {
            "bsonType": ["array"],
            "items": {"bsonType": ["string"], "maxLength": 20},
            "minItems": 1,
            "uniqueItems": false
        },
        "tagIDs": {
            "bsonType": ["array"],
            "items": {"bsonType": ["objectId"]},
            "uniqueItems": false
        }
    });
    merge(&mut properties, audit_properties());

    json!({"validator": {"$jsonSchema": {
        "bsonType": "object",
        "title": title,
        "additionalProperties": true,
        "properties": properties,
        "required": [
            "boardId", "statusId", "title", "order", "tag", "test",
            "createdAt", "createdBy"
        ]
    }}})
}

fn merge(target: &mut Value, extra: Value) {
    let (Value::Object(target), Value::Object(extra)) = (target, extra) else {
        panic!("merge expects objects");
    };
    target.extend(extra);
}

#[test]
fn test_marshal() {
    let out = marshal(&board_item_shape(), "Schema Test", true).unwrap();

    assert!(out.warnings.is_empty(), "warnings: {:?}", out.warnings);
    assert_eq!(out.document, board_item_document("Schema Test"));
}

#[test]
fn test_marshal_strips_one_optional_level() {
    let direct = marshal(&board_item_shape(), "Schema Test", true).unwrap();
    let indirect = marshal(&Shape::optional(board_item_shape()), "Schema Test", true).unwrap();

    assert_eq!(direct.document, indirect.document);
}

#[test]
fn test_marshal_is_deterministic() {
    let first = marshal(&board_item_shape(), "Schema Test", true).unwrap();
    let second = marshal(&board_item_shape(), "Schema Test", true).unwrap();

    assert_eq!(first.document, second.document);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_marshal_rejects_non_structs() {
    let err = marshal(&Shape::Scalar(Kind::Str), "", false).unwrap_err();
    assert_eq!(err, SchemaError::NotAStruct);

    // callers fall back to the bare envelope, with the default title
    assert_eq!(
        Value::Object(envelope("", false)),
        json!({
            "bsonType": "object",
            "title": "Schema Validation",
            "additionalProperties": false
        })
    );
}

#[test]
fn test_marshal_inline_required_propagation() {
    let shape = Shape::record(vec![
        Field::new("Name", Kind::Str)
            .bson_tag("name")
            .validation("required,min=1,max=64"),
        Field::new("Audit", Shape::record(vec![Field::new(
            "CreatedAt",
            Shape::optional(Kind::Any),
        )
        .bson_tag("createdAt")
        .type_tag("date")
        .validation("required")]))
        .field_tag(",inline")
        .bson_tag("audit"),
    ]);

    let out = marshal(&shape, "", false).unwrap();
    assert!(out.warnings.is_empty());

    let schema = &out.document["validator"]["$jsonSchema"];
    assert_eq!(schema["required"], json!(["name", "createdAt"]));
    // the inline struct itself never becomes a property
    assert_eq!(
        schema["properties"],
        json!({
            "name": {"bsonType": ["string"], "minLength": 1, "maxLength": 64},
            "createdAt": {"bsonType": ["date"]}
        })
    );
}

#[test]
fn test_marshal_empty_struct_array_is_dropped() {
    let shape = Shape::record(vec![
        Field::new("Name", Kind::Str).bson_tag("name").validation("required"),
        Field::new("Attachments", Shape::empty_array()).bson_tag("attachments"),
    ]);

    let out = marshal(&shape, "", false).unwrap();

    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.warnings[0].name(), "Attachments");
    assert_eq!(out.warnings[0].tag(), "attachments");
    assert_eq!(out.warnings[0].error(), &SchemaError::EmptySlice);

    let schema = &out.document["validator"]["$jsonSchema"];
    assert_eq!(schema["required"], json!(["name"]));
    assert_eq!(
        schema["properties"],
        json!({"name": {"bsonType": ["string"]}})
    );
}

#[test]
fn test_marshal_multi_type_without_constraints() {
    let shape = Shape::record(vec![Field::new("Amount", Kind::Str).type_tag("string,decimal")]);

    let out = marshal(&shape, "", false).unwrap();
    assert!(out.warnings.is_empty());

    let schema = &out.document["validator"]["$jsonSchema"];
    assert_eq!(
        schema["properties"],
        json!({"amount": {"bsonType": ["string", "decimal"]}})
    );
}

struct BoardItem;

impl SchemaShape for BoardItem {
    fn shape() -> Shape {
        board_item_shape()
    }
}

#[test]
fn test_marshal_type() {
    let out = marshal_type::<BoardItem>("Schema Test", true).unwrap();

    assert!(out.warnings.is_empty());
    assert_eq!(out.document, board_item_document("Schema Test"));
}
