//! Conversions between [`Value`] and `serde_json::Value`.
use crate::number::Number;
use crate::value::{Mapping, Value};

impl Value {
    /// Converts a parsed JSON value. Object key order is preserved.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                let number = Number::parse(&n.to_string())
                    .unwrap_or_else(|| Number::Float(n.as_f64().unwrap_or(f64::NAN)));
                Value::Number(number)
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(obj) => {
                let mut map = Mapping::with_capacity(obj.len());
                for (key, value) in obj {
                    map.insert(key, Value::from_json(value));
                }
                Value::Mapping(map)
            }
        }
    }

    /// Converts to JSON. Leaves without a JSON form (bytes, XML, opaque values)
    /// become strings holding their textual rendering.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Mapping(map) => {
                let mut obj = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    obj.insert(key.clone(), value.to_json());
                }
                serde_json::Value::Object(obj)
            }
            Value::Bytes(_) | Value::Xml(_) | Value::Opaque(_) => {
                serde_json::Value::String(self.to_string())
            }
        }
    }
}

fn number_to_json(n: &Number) -> serde_json::Value {
    if let Some(i) = n.as_i64() {
        return serde_json::Value::from(i);
    }
    match n {
        Number::Decimal(d) => d
            .normalize()
            .to_string()
            .parse::<serde_json::Number>()
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Number::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use serde_json::json;

    #[test]
    fn test_object_key_order_is_kept() {
        let v = Value::from_json(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&str> = v.as_mapping().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_round_trip_through_json() {
        let source = json!({"a": [1, 2.5, true, null, "x"], "b": {"c": -3}});
        let v = Value::from_json(source.clone());
        assert_eq!(v.to_json(), source);
    }

    #[test]
    fn test_integer_and_float_json_numbers_classify_alike() {
        let a = Value::parse_json("1").unwrap();
        let b = Value::parse_json("1.0").unwrap();
        assert_eq!(a.kind(), Kind::Number);
        assert_eq!(a, b);
    }
}
