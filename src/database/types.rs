use serde_json::{Map, Value};

/// One result row: column name to value, in the query's column order.
pub type DatabaseRow = Map<String, Value>;

/// Binary column contents: text when the bytes are UTF-8, lowercase hex otherwise.
pub fn blob_value(bytes: Vec<u8>) -> Value {
    match String::from_utf8(bytes) {
        Ok(text) => Value::String(text),
        Err(error) => Value::String(hex::encode(error.into_bytes())),
    }
}
