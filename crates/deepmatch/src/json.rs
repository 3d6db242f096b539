//! Building values from JSON.
//!
//! JSON maps onto the value model directly: objects become plain records
//! (keys in the order `serde_json` yields them), arrays become arrays, and
//! numbers keep their integer or floating point representation.

use serde_json::Value as Json;

use crate::error::Result;
use crate::object::Record;
use crate::value::{Number, Value};

/// Parses a JSON document into a [`Value`].
///
/// ```
/// use deepmatch::{json, strict_subset};
///
/// let subject = json::from_str(r#"{"a": 1, "b": {"c": [1, 2, 3]}}"#).unwrap();
/// let filter = json::from_str(r#"{"b": {"c": [1, 2]}}"#).unwrap();
/// assert!(strict_subset(&subject, &filter));
/// ```
pub fn from_str(input: &str) -> Result<Value> {
    let json: Json = serde_json::from_str(input)?;
    Ok(from_json(&json))
}

/// Converts a parsed JSON value.
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => Value::Number(number(n)),
        Json::String(s) => Value::from(s.as_str()),
        Json::Array(items) => Value::array(items.iter().map(from_json)),
        Json::Object(fields) => {
            let mut record = Record::new();
            for (key, value) in fields {
                record.insert(key, from_json(value));
            }
            Value::from(record)
        }
    }
}

fn number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::I64(i)
    } else if let Some(u) = n.as_u64() {
        Number::U64(u)
    } else {
        Number::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        from_json(json)
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        from_json(&json)
    }
}
