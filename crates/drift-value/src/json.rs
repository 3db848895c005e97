//! JSON bridge for values.
//!
//! Plain kinds map to their JSON forms. Extended kinds have no JSON source
//! form, so they encode as single-key tagged objects (`{"$date": ms}` and
//! friends) that decoding recognizes and folds back. Encoding is
//! cycle-guarded: a composite already on the active encoding path becomes
//! the [`crate::CIRCULAR_SENTINEL`] string instead of recursing.

use std::collections::HashSet;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value as Json};

use crate::value::Value;
use crate::CIRCULAR_SENTINEL;

const TAG_UNDEFINED: &str = "$undefined";
const TAG_FUNCTION: &str = "$fn";
const TAG_DATE: &str = "$date";
const TAG_REGEX: &str = "$regex";
const TAG_SYMBOL: &str = "$symbol";

impl Value {
    /// Encode as a `serde_json::Value`.
    ///
    /// Total: cycles become sentinel strings and non-finite numbers fall
    /// back to their display text, so encoding never fails or hangs.
    pub fn to_json(&self) -> Json {
        let mut on_path = HashSet::new();
        encode(self, &mut on_path)
    }

    /// Build a value from parsed JSON, structurally.
    ///
    /// JSON null maps to [`Value::Null`]; nothing maps to `Undefined` or
    /// the extended kinds. Tag recognition is a property of the
    /// [`Deserialize`] impl, not of this conversion.
    pub fn from_json(json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::array(items.into_iter().map(Value::from_json)),
            Json::Object(entries) => {
                Value::object(entries.into_iter().map(|(key, item)| (key, Value::from_json(item))))
            }
        }
    }
}

/// Tagged encoding wrapped by [`Value::to_json`]. `on_path` holds the
/// `ptr_id` of every composite between the encoding root and here.
fn encode(value: &Value, on_path: &mut HashSet<usize>) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Undefined => tag(TAG_UNDEFINED, Json::Null),
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => encode_number(*n),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(array) => {
            if !on_path.insert(array.ptr_id()) {
                return Json::String(CIRCULAR_SENTINEL.to_string());
            }
            let items = array.borrow().iter().map(|item| encode(item, on_path)).collect();
            on_path.remove(&array.ptr_id());
            Json::Array(items)
        }
        Value::Object(object) => {
            if !on_path.insert(object.ptr_id()) {
                return Json::String(CIRCULAR_SENTINEL.to_string());
            }
            let mut entries = Map::new();
            for (key, item) in object.borrow().iter() {
                entries.insert(key.clone(), encode(item, on_path));
            }
            on_path.remove(&object.ptr_id());
            Json::Object(entries)
        }
        Value::Function(function) => tag(TAG_FUNCTION, Json::String(function.source().to_string())),
        Value::Date(date) => tag(TAG_DATE, Json::Number(date.epoch_ms().into())),
        Value::Regex(regex) => {
            let mut fields = Map::new();
            fields.insert("source".to_string(), Json::String(regex.source().to_string()));
            fields.insert("flags".to_string(), Json::String(regex.flags().to_string()));
            tag(TAG_REGEX, Json::Object(fields))
        }
        Value::Symbol(symbol) => {
            let description = match symbol.description() {
                Some(text) => Json::String(text.to_string()),
                None => Json::Null,
            };
            tag(TAG_SYMBOL, description)
        }
    }
}

fn tag(key: &str, payload: Json) -> Json {
    let mut entry = Map::with_capacity(1);
    entry.insert(key.to_string(), payload);
    Json::Object(entry)
}

/// Integral doubles encode as JSON integers, matching how the dynamic
/// values being modeled print their numbers. NaN and the infinities have
/// no JSON form and fall back to their display text.
fn encode_number(n: f64) -> Json {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        return Json::Number((n as i64).into());
    }
    match serde_json::Number::from_f64(n) {
        Some(number) => Json::Number(number),
        None => Json::String(n.to_string()),
    }
}

/// Decode with tag recognition: single-key `$`-tagged objects fold back
/// into the extended kinds, everything else decodes structurally.
fn from_tagged(json: Json) -> Value {
    match json {
        Json::Object(entries) => {
            if entries.len() == 1 {
                if let Some((key, payload)) = entries.iter().next() {
                    if let Some(decoded) = decode_tag(key, payload) {
                        return decoded;
                    }
                }
            }
            Value::object(entries.into_iter().map(|(key, item)| (key, from_tagged(item))))
        }
        Json::Array(items) => Value::array(items.into_iter().map(from_tagged)),
        other => Value::from_json(other),
    }
}

/// A tag with a malformed payload is not a tag; the caller keeps the
/// object as plain structure.
fn decode_tag(key: &str, payload: &Json) -> Option<Value> {
    match key {
        TAG_UNDEFINED if payload.is_null() => Some(Value::Undefined),
        TAG_FUNCTION => payload.as_str().map(Value::function),
        TAG_DATE => payload.as_i64().map(Value::date),
        TAG_REGEX => {
            let source = payload.get("source")?.as_str()?;
            let flags = payload.get("flags")?.as_str()?;
            Some(Value::regex(source, flags))
        }
        TAG_SYMBOL => match payload {
            Json::Null => Some(Value::anonymous_symbol()),
            Json::String(description) => Some(Value::symbol(description.clone())),
            _ => None,
        },
        _ => None,
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Json::deserialize(deserializer)?;
        Ok(from_tagged(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_kinds_encode_as_plain_json() {
        assert_eq!(Value::Null.to_json(), json!(null));
        assert_eq!(Value::from(true).to_json(), json!(true));
        assert_eq!(Value::from(3.5).to_json(), json!(3.5));
        assert_eq!(Value::from(2), Value::from(2.0));
        assert_eq!(Value::from(2.0).to_json(), json!(2));
        assert_eq!(Value::from(-7).to_json(), json!(-7));
        assert_eq!(Value::from("hi").to_json(), json!("hi"));
        assert_eq!(
            Value::object([("k", Value::array([Value::from(1)]))]).to_json(),
            json!({"k": [1]})
        );
    }

    #[test]
    fn extended_kinds_encode_tagged() {
        assert_eq!(Value::Undefined.to_json(), json!({"$undefined": null}));
        assert_eq!(Value::function("() => 1").to_json(), json!({"$fn": "() => 1"}));
        assert_eq!(Value::date(1000).to_json(), json!({"$date": 1000}));
        assert_eq!(
            Value::regex("a+", "gi").to_json(),
            json!({"$regex": {"source": "a+", "flags": "gi"}})
        );
        assert_eq!(Value::symbol("tag").to_json(), json!({"$symbol": "tag"}));
        assert_eq!(Value::anonymous_symbol().to_json(), json!({"$symbol": null}));
    }

    #[test]
    fn non_finite_numbers_encode_as_text() {
        assert_eq!(Value::Number(f64::NAN).to_json(), json!("NaN"));
        assert_eq!(Value::Number(f64::INFINITY).to_json(), json!("inf"));
    }

    #[test]
    fn cycle_encodes_as_sentinel() {
        let object = crate::ObjectRef::empty();
        object.insert("me", Value::Object(object.clone()));
        assert_eq!(
            Value::Object(object).to_json(),
            json!({"me": CIRCULAR_SENTINEL})
        );
    }

    #[test]
    fn aliased_sibling_is_not_a_cycle() {
        let shared = Value::array([Value::from(1)]);
        let value = Value::object([("a", shared.clone()), ("b", shared)]);
        assert_eq!(value.to_json(), json!({"a": [1], "b": [1]}));
    }

    #[test]
    fn from_json_is_purely_structural() {
        let value = Value::from_json(json!({"$date": 1000}));
        match &value {
            Value::Object(object) => match object.get("$date") {
                Some(Value::Number(n)) => assert_eq!(n, 1000.0),
                other => panic!("expected number, got {:?}", other),
            },
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn deserialize_recognizes_tags() {
        let value: Value = serde_json::from_str(r#"{"$date": 1700000000000}"#).unwrap();
        assert_eq!(value, Value::date(1_700_000_000_000));

        let value: Value = serde_json::from_str(r#"{"$symbol": null}"#).unwrap();
        assert_eq!(value, Value::anonymous_symbol());
    }

    #[test]
    fn malformed_tag_stays_structural() {
        let value: Value = serde_json::from_str(r#"{"$date": "soon"}"#).unwrap();
        match &value {
            Value::Object(object) => assert!(object.get("$date").is_some()),
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn tagged_round_trip_preserves_structure() {
        let original = Value::object([
            ("fn", Value::function("x => x")),
            ("when", Value::date(86_400_000)),
            ("pattern", Value::regex("\\w+", "g")),
            ("sym", Value::symbol("id")),
            ("missing", Value::Undefined),
            ("plain", Value::array([Value::Null, Value::from(2), Value::from("s")])),
        ]);
        let text = serde_json::to_string(&original).unwrap();
        let decoded: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded.to_json(), original.to_json());
    }
}
