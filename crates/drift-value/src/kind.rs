use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The nine structural kinds a value can classify as.
///
/// This is a closed set: every [`Value`] maps to exactly one kind, and the
/// diff engine dispatches exhaustively over it, so a new kind cannot be
/// added without the compiler flagging every dispatch site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Primitive,
    Object,
    Array,
    Function,
    Date,
    Regexp,
    Undefined,
    Null,
    Symbol,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Primitive => "primitive",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Function => "function",
            ValueKind::Date => "date",
            ValueKind::Regexp => "regexp",
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Symbol => "symbol",
        };
        write!(f, "{name}")
    }
}

/// Classify a value into its structural kind.
///
/// Total and pure. The precedence the kinds are checked in (null, undefined,
/// symbol, function, date, regexp, array, object, then the scalar
/// primitives) is encoded by the `Value` enum itself; the match below is
/// exhaustive with no default arm.
pub fn classify(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Undefined => ValueKind::Undefined,
        Value::Symbol(_) => ValueKind::Symbol,
        Value::Function(_) => ValueKind::Function,
        Value::Date(_) => ValueKind::Date,
        Value::Regex(_) => ValueKind::Regexp,
        Value::Array(_) => ValueKind::Array,
        Value::Object(_) => ValueKind::Object,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => ValueKind::Primitive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_classifies() {
        assert_eq!(classify(&Value::Null), ValueKind::Null);
        assert_eq!(classify(&Value::Undefined), ValueKind::Undefined);
        assert_eq!(classify(&Value::from(true)), ValueKind::Primitive);
        assert_eq!(classify(&Value::from(1.5)), ValueKind::Primitive);
        assert_eq!(classify(&Value::from("s")), ValueKind::Primitive);
        assert_eq!(classify(&Value::array([])), ValueKind::Array);
        assert_eq!(classify(&Value::Object(crate::ObjectRef::empty())), ValueKind::Object);
        assert_eq!(classify(&Value::function("() => 1")), ValueKind::Function);
        assert_eq!(classify(&Value::date(0)), ValueKind::Date);
        assert_eq!(classify(&Value::regex("a", "g")), ValueKind::Regexp);
        assert_eq!(classify(&Value::symbol("tag")), ValueKind::Symbol);
    }

    #[test]
    fn kind_method_matches_classify() {
        let value = Value::date(123);
        assert_eq!(value.kind(), classify(&value));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ValueKind::Regexp).unwrap();
        assert_eq!(json, "\"regexp\"");
        let parsed: ValueKind = serde_json::from_str("\"undefined\"").unwrap();
        assert_eq!(parsed, ValueKind::Undefined);
    }

    #[test]
    fn display_matches_serde_names() {
        assert_eq!(ValueKind::Primitive.to_string(), "primitive");
        assert_eq!(ValueKind::Regexp.to_string(), "regexp");
    }
}
