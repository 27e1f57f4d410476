//! Curried property accessors over dynamic values.
//!
//! Every function here takes its configuration up front and returns a
//! single-argument closure, so accessors drop straight into composed
//! pipelines. Reads tolerate absence: a missing key, a missing field, or
//! a scalar source all yield `None` rather than an error. Writes are the
//! strict side: [`set_property`] validates the target shape and the
//! property name once, at closure construction, and fails with a typed
//! [`ShapeError`] on misuse.

use itertools::Itertools;

use crate::error::{ShapeError, ShapeResult};
use crate::value::{is_field_name, Record, SourceShape, Value};
use im::OrdMap;

/// Returns a closure that looks up `name` on its argument.
///
/// Mappings look up the key, records look up the field; any other shape
/// yields `None`.
///
/// # Examples
///
/// ```
/// use recompose::property::get_property;
/// use recompose::value::Value;
///
/// let user_id = get_property("userId");
/// let source = Value::mapping_from([("userId", 1i64)]);
/// assert_eq!(user_id(&source), Some(Value::Int(1)));
/// assert_eq!(user_id(&Value::Int(9)), None);
/// ```
pub fn get_property(name: impl Into<String>) -> impl Fn(&Value) -> Option<Value> {
    let name = name.into();
    move |source| source.get(&name).cloned()
}

/// Returns a closure reporting whether its argument carries `name`.
///
/// Unsupported shapes report `false`, not absence.
pub fn has_property(name: impl Into<String>) -> impl Fn(&Value) -> bool {
    let name = name.into();
    move |source| source.has(&name)
}

/// Returns a closure performing a multi-level lookup along `path`.
///
/// Equivalent to applying [`get_property`] per key in order; the first
/// level that cannot resolve makes the whole lookup absent. The path must
/// carry at least one key.
pub fn pluck_property<I, K>(path: I) -> impl Fn(&Value) -> Option<Value>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    let path: Vec<String> = path.into_iter().map(Into::into).collect();
    move |source| {
        let mut current = source;
        for key in &path {
            match current.get(key) {
                Some(next) => current = next,
                None => {
                    log::trace!(
                        "pluck of '{}' stopped at '{}'",
                        path.iter().join("."),
                        key
                    );
                    return None;
                }
            }
        }
        Some(current.clone())
    }
}

/// Container view captured once at the write boundary, so the returned
/// closure never re-checks shape or name.
enum ContainerView {
    Mapping(OrdMap<String, Value>),
    Record(Record),
}

/// Returns a closure that sets `name` on a copy of `target`.
///
/// The closure consumes the new value and produces a fresh container of
/// `target`'s shape with `name` set; all other entries keep their original
/// values, shared structurally with `target`. The original is never
/// mutated.
///
/// # Errors
///
/// - [`ShapeError::UnsupportedShape`] when `target` is neither a mapping
///   nor a record.
/// - [`ShapeError::InvalidName`] when `target` is a record and `name` is
///   not a valid field name (purely numeric names included).
pub fn set_property(
    target: &Value,
    name: impl Into<String>,
) -> ShapeResult<impl Fn(Value) -> Value> {
    let name = name.into();
    let view = match target {
        Value::Mapping(entries) => ContainerView::Mapping(entries.clone()),
        Value::Record(record) => {
            if !is_field_name(&name) {
                return Err(ShapeError::InvalidName {
                    name,
                    shape: SourceShape::Record,
                });
            }
            ContainerView::Record(record.clone())
        }
        other => return Err(ShapeError::UnsupportedShape(other.shape())),
    };

    Ok(move |value: Value| match &view {
        ContainerView::Mapping(entries) => Value::Mapping(entries.update(name.clone(), value)),
        ContainerView::Record(record) => Value::Record(record.with_field_unchecked(&name, value)),
    })
}
