//! Value: runtime instances written into view slots.
//!
//! The widget engines only ever produce three kinds: booleans for state
//! toggles (shown/hidden, active decorations), integers for animated numeric
//! displays, and text for literal string slots. Hosts render Int slots as
//! text content.

use serde::{Deserialize, Serialize};

/// Lightweight kind enum for pattern-matching and quick dispatch without
/// touching the payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Text,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Boolean state toggle (display on/off, decoration on/off)
    Bool(bool),

    /// Whole number rendered as the slot's text content
    Int(i64),

    /// Literal text content
    Text(String),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Convenience constructors
    pub fn b(v: bool) -> Self {
        Value::Bool(v)
    }

    pub fn i(v: i64) -> Self {
        Value::Int(v)
    }

    pub fn t(v: impl Into<String>) -> Self {
        Value::Text(v.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the value the way a host applies it to a text slot.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(Value::b(true).kind(), ValueKind::Bool);
        assert_eq!(Value::i(42).kind(), ValueKind::Int);
        assert_eq!(Value::t("hi").kind(), ValueKind::Text);
    }

    #[test]
    fn serde_tagged_shape() {
        let s = serde_json::to_string(&Value::Int(250)).unwrap();
        assert_eq!(s, r#"{"type":"int","data":250}"#);
        let v: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(v, Value::Int(250));
    }

    #[test]
    fn display_strings() {
        assert_eq!(Value::i(7).to_display_string(), "7");
        assert_eq!(Value::t("done").to_display_string(), "done");
    }
}
