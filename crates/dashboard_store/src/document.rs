//! Conversion between stored JSON documents and typed records.
//!
//! Every JSON type survives a read followed by a write: `null`, booleans,
//! arrays and objects come back exactly as stored, and keys outside the
//! schema ride along in `Record::extra`. Missing fields stay missing.

use dashboard_core::{Column, FieldValue, Record};
use serde_json::{Map, Value};

/// Key under which a document's identifier is kept; never part of the body.
const ID_KEY: &str = "_id";

pub fn record_from_document(id: Option<String>, document: &Map<String, Value>) -> Record {
    let mut record = Record {
        id,
        ..Record::default()
    };
    for (key, value) in document {
        match Column::from_name(key).filter(|c| !c.is_hidden()) {
            Some(column) => record.set(column, Some(field_from_json(value))),
            None if key == ID_KEY => {}
            None => {
                record.extra.insert(key.clone(), value.clone());
            }
        }
    }
    record
}

/// Document body without the identifier, which is stored separately.
pub fn record_to_document(record: &Record) -> Map<String, Value> {
    let mut document = record.extra.clone();
    document.remove(ID_KEY);
    for column in Column::visible() {
        if let Some(value) = record.get(column) {
            document.insert(column.name().to_string(), field_to_json(value));
        }
    }
    document
}

fn field_from_json(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::String(text) => FieldValue::Text(text.clone()),
        Value::Number(number) => FieldValue::Number(number.clone()),
        Value::Bool(flag) => FieldValue::Bool(*flag),
        Value::Array(_) | Value::Object(_) => FieldValue::Nested(value.clone()),
    }
}

fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text.clone()),
        FieldValue::Number(number) => Value::Number(number.clone()),
        FieldValue::Bool(flag) => Value::Bool(*flag),
        FieldValue::Null => Value::Null,
        FieldValue::Nested(nested) => nested.clone(),
    }
}
