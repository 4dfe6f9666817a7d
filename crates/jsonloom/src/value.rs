//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, which represents any valid JSON
//! value, and the insertion-ordered [`Map`] used for objects.
use alloc::{string::String, vec::Vec};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// The object representation: an insertion-ordered mapping from property
/// names to values. Duplicate inserts overwrite the value but keep the
/// original position.
pub type Map = IndexMap<String, Value, FxBuildHasher>;

/// The array representation.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// The parser mutates `Array` and `Object` nodes of this tree in place while
/// input streams in; the root is observable at every chunk boundary.
///
/// # Examples
///
/// ```
/// use jsonloom::{Map, Value};
///
/// let mut map = Map::default();
/// map.insert("key".into(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the string contents if this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Returns a reference to the elements if this value is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }

    /// Returns a reference to the properties if this value is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        if let Self::Object(m) = self {
            Some(m)
        } else {
            None
        }
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, and control characters up to the basic multilingual
/// plane are replaced with their JSON escape sequences.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            // Finite by construction; the plain decimal form round-trips.
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec, vec::Vec};

    use super::{Map, Value};

    #[test]
    fn display_escapes_controls_and_quotes() {
        let v = Value::String("a\"b\\c\nd".into());
        assert_eq!(v.to_string(), "\"a\\\"b\\\\c\\u000Ad\"");
    }

    #[test]
    fn display_nested() {
        let mut map = Map::default();
        map.insert("b".into(), Value::Array(vec![Value::Null, Value::Boolean(true)]));
        map.insert("a".into(), Value::Number(1.5));
        // Insertion order is preserved, "b" before "a".
        assert_eq!(Value::Object(map).to_string(), r#"{"b":[null,true],"a":1.5}"#);
    }

    #[test]
    fn map_overwrite_keeps_position() {
        let mut map = Map::default();
        map.insert("x".into(), Value::Number(1.0));
        map.insert("y".into(), Value::Number(2.0));
        map.insert("x".into(), Value::Number(3.0));
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, ["x", "y"]);
        assert_eq!(map["x"], Value::Number(3.0));
    }
}
