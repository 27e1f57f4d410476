//! Dynamic values and their source shapes.
//!
//! This module defines the data plane the accessors and encoders operate
//! over: a [`Value`] is a scalar, a list, or one of the two container
//! shapes: an ordered key-value [`Mapping`](Value::Mapping) or a
//! named-field [`Record`]. Containers are backed by `im`'s persistent
//! structures, so "copying" a container to change one entry shares all
//! untouched structure with the original.
//!
//! Absence is always expressed as `Option::None`, never as a data value;
//! [`Value::Null`] remains an ordinary value a field can legitimately hold.

use derive_more::Display;
use im::{OrdMap, Vector};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{ShapeError, ShapeResult};

/// Cached patterns for property-name classification
static FIELD_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
static NUMERIC_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Returns true when `name` is usable as a record field name.
pub fn is_field_name(name: &str) -> bool {
    FIELD_NAME_REGEX.is_match(name)
}

/// Returns true when `name` consists only of digits.
///
/// Numeric names are fine as mapping keys but are rejected when writing
/// record fields.
pub fn is_numeric_name(name: &str) -> bool {
    NUMERIC_NAME_REGEX.is_match(name)
}

/// Classification of a value for property access.
///
/// Shape is decided once at the write boundary; read paths tolerate every
/// shape and simply yield absent for [`SourceShape::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SourceShape {
    /// Ordered key-value mapping; any string key is accepted.
    #[display(fmt = "mapping")]
    Mapping,
    /// Named-field record; field names must be identifiers.
    #[display(fmt = "record")]
    Record,
    /// Scalars and lists: reads yield absent, writes are rejected.
    #[display(fmt = "scalar")]
    Other,
}

/// A named-field record value.
///
/// Unlike a mapping, a record enforces identifier discipline on its field
/// names: `user_name` is a field, `"42"` is not. Updates return a new
/// record sharing untouched fields with the original.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: OrdMap<String, Value>,
}

impl Record {
    /// Creates a blank record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(name, value)` pairs, validating each name.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidName`] for the first name that is not
    /// a valid identifier.
    pub fn from_fields<I, K, V>(fields: I) -> ShapeResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = Record::new();
        for (name, value) in fields {
            record = record.with_field(&name.into(), value.into())?;
        }
        Ok(record)
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns true when the record carries the named field.
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns a new record with `name` set to `value`.
    ///
    /// The original record is untouched; unchanged fields are shared
    /// between the two.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidName`] when `name` is not a valid
    /// identifier (numeric-only names included).
    pub fn with_field(&self, name: &str, value: Value) -> ShapeResult<Record> {
        if !is_field_name(name) {
            return Err(ShapeError::InvalidName {
                name: name.to_string(),
                shape: SourceShape::Record,
            });
        }
        Ok(self.with_field_unchecked(name, value))
    }

    /// Field update for callers that already validated the name.
    pub(crate) fn with_field_unchecked(&self, name: &str, value: Value) -> Record {
        Record {
            fields: self.fields.update(name.to_string(), value),
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

/// A dynamic value: scalar, list, or one of the two container shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vector<Value>),
    Mapping(OrdMap<String, Value>),
    Record(Record),
}

impl Value {
    /// Classifies this value for property access.
    pub fn shape(&self) -> SourceShape {
        match self {
            Value::Mapping(_) => SourceShape::Mapping,
            Value::Record(_) => SourceShape::Record,
            _ => SourceShape::Other,
        }
    }

    /// Looks up a property by name.
    ///
    /// Mappings look up the key, records look up the field; every other
    /// shape yields `None`. This never errors.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Mapping(entries) => entries.get(name),
            Value::Record(record) => record.get(name),
            _ => None,
        }
    }

    /// Returns true when the value carries the named property.
    ///
    /// Unsupported shapes report `false`, not absence.
    pub fn has(&self, name: &str) -> bool {
        match self {
            Value::Mapping(entries) => entries.contains_key(name),
            Value::Record(record) => record.has(name),
            _ => false,
        }
    }

    /// An empty ordered mapping, the usual encoder template.
    pub fn empty_mapping() -> Value {
        Value::Mapping(OrdMap::new())
    }

    /// Builds a mapping from `(key, value)` pairs.
    pub fn mapping_from<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vector<Value>> for Value {
    fn from(items: Vector<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into_iter().collect())
    }
}

impl From<OrdMap<String, Value>> for Value {
    fn from(entries: OrdMap<String, Value>) -> Self {
        Value::Mapping(entries)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<serde_json::Value> for Value {
    /// Lifts plain JSON into the dynamic plane; objects become mappings.
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    /// Lowers a dynamic value back to JSON; both container shapes become
    /// objects, non-finite floats have no JSON form and become null.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
            Value::Record(record) => serde_json::Value::Object(
                record
                    .fields
                    .into_iter()
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    /// Deserializes through JSON semantics; objects arrive as mappings
    /// (the wire cannot distinguish a record from a mapping).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_classification() {
        assert_eq!(Value::empty_mapping().shape(), SourceShape::Mapping);
        assert_eq!(Value::Record(Record::new()).shape(), SourceShape::Record);
        assert_eq!(Value::Int(1).shape(), SourceShape::Other);
        assert_eq!(Value::Null.shape(), SourceShape::Other);
        assert_eq!(Value::List(Vector::new()).shape(), SourceShape::Other);
    }

    #[test]
    fn test_field_name_classification() {
        assert!(is_field_name("user_name"));
        assert!(is_field_name("_private"));
        assert!(!is_field_name("42"));
        assert!(!is_field_name("4th"));
        assert!(!is_field_name(""));
        assert!(!is_field_name("with-dash"));

        assert!(is_numeric_name("0"));
        assert!(is_numeric_name("42"));
        assert!(!is_numeric_name("4x"));
    }

    #[test]
    fn test_mapping_get_and_has() {
        let source = Value::mapping_from([("id", 7i64)]);
        assert_eq!(source.get("id"), Some(&Value::Int(7)));
        assert_eq!(source.get("missing"), None);
        assert!(source.has("id"));
        assert!(!source.has("missing"));
    }

    #[test]
    fn test_scalar_reads_are_tolerated() {
        let scalar = Value::Str("hello".to_string());
        assert_eq!(scalar.get("anything"), None);
        assert!(!scalar.has("anything"));
    }

    #[test]
    fn test_record_rejects_numeric_field_names() {
        let record = Record::new();
        let err = record.with_field("42", Value::Int(1)).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidName {
                name: "42".to_string(),
                shape: SourceShape::Record,
            }
        );
    }

    #[test]
    fn test_record_update_preserves_original() {
        let original = Record::from_fields([("a", 1i64)]).unwrap();
        let updated = original.with_field("b", Value::Int(2)).unwrap();

        assert_eq!(original.len(), 1);
        assert!(!original.has("b"));
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.get("a"), Some(&Value::Int(1)));
        assert_eq!(updated.get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_json_lift_and_lower() {
        let raw = serde_json::json!({
            "id": 1,
            "name": "foo",
            "tags": ["a", "b"],
            "score": 1.5,
            "deleted": null
        });

        let lifted = Value::from(raw.clone());
        assert_eq!(lifted.shape(), SourceShape::Mapping);
        assert_eq!(lifted.get("id"), Some(&Value::Int(1)));
        assert_eq!(lifted.get("deleted"), Some(&Value::Null));

        let lowered = serde_json::Value::from(lifted);
        assert_eq!(lowered, raw);
    }

    #[test]
    fn test_record_lowers_to_json_object() {
        let record = Record::from_fields([("name", "foo")]).unwrap();
        let lowered = serde_json::Value::from(Value::Record(record));
        assert_eq!(lowered, serde_json::json!({ "name": "foo" }));
    }
}
