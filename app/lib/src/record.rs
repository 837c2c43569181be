//! In-memory record model shared by every format.
//!
//! A [`Dataset`] is an ordered list of [`Record`]s; each record is an
//! insertion-ordered mapping from field name to [`Value`]. Field order is
//! kept so that CSV headers come out in the same order they went in.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

/// One row/object/mapping: field name to value, in insertion order.
pub type Record = IndexMap<String, Value>;

/// Ordered sequence of records exchanged between loaders.
pub type Dataset = Vec<Record>;

/// A typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null (JSON `null`, YAML `~`).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Text, kept verbatim.
    String(String),
    /// Mapping or sequence. Only JSON and YAML can hold these.
    Nested(Nested),
}

/// Non-scalar payload of [`Value::Nested`].
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    /// A nested mapping.
    Map(Record),
    /// A nested sequence.
    List(Vec<Value>),
}

impl Value {
    /// Returns true for mappings and sequences.
    pub fn is_nested(&self) -> bool {
        matches!(self, Value::Nested(_))
    }

    /// Returns true for integers and floats.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Returns true if this value, or anything nested in it, is an
    /// infinite or NaN float.
    pub fn has_non_finite(&self) -> bool {
        match self {
            Value::Float(x) => !x.is_finite(),
            Value::Nested(Nested::Map(map)) => map.values().any(Value::has_non_finite),
            Value::Nested(Nested::List(items)) => items.iter().any(Value::has_non_finite),
            Value::Null | Value::Bool(_) | Value::Integer(_) | Value::String(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            // Debug keeps a '.' or exponent, so the text coerces back to Float.
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => f.write_str(s),
            Value::Nested(nested) => {
                let json = serde_json::to_string(nested).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Record> for Value {
    fn from(map: Record) -> Self {
        Value::Nested(Nested::Map(map))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Nested(Nested::List(items))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Nested(nested) => nested.serialize(serializer),
        }
    }
}

impl Serialize for Nested {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nested::Map(map) => serializer.collect_map(map),
            Nested::List(items) => serializer.collect_seq(items),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, mapping, or sequence")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Integer(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(match i64::try_from(n) {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Float(n as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> Result<Value, E> {
        Ok(Value::Float(x))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Nested(Nested::List(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Record::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Nested(Nested::Map(map)))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Returns the first (record index, field name) holding a nested value.
pub fn find_nested(records: &[Record]) -> Option<(usize, &str)> {
    records.iter().enumerate().find_map(|(idx, record)| {
        record
            .iter()
            .find(|(_, value)| value.is_nested())
            .map(|(field, _)| (idx, field.as_str()))
    })
}

/// Returns the first (record index, field name) holding an infinite or NaN
/// float, at any depth.
pub fn find_non_finite(records: &[Record]) -> Option<(usize, &str)> {
    records.iter().enumerate().find_map(|(idx, record)| {
        record
            .iter()
            .find(|(_, value)| value.has_non_finite())
            .map(|(field, _)| (idx, field.as_str()))
    })
}
