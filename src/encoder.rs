//! Declarative record encoding.
//!
//! A [`RecordEncoder`] assembles an `output = f(source)` mapper
//! field-by-field: it starts from a template value that fixes the output
//! shape, grows by named directives pairing a destination property with
//! an extractor closure, and builds a unary mapper that runs every
//! extractor over the source and writes the results onto a fresh copy of
//! the template.
//!
//! # Highlights
//!
//! - Directives apply in the order supplied; a later directive targeting
//!   the same name overwrites the earlier one.
//! - An extractor that yields absent writes [`Value::Null`]; the
//!   property is present in the output, not omitted.
//! - The template is never mutated and can seed any number of encoders;
//!   every mapper invocation produces an independent output.
//! - Misuse (non-container template, invalid directive name for the
//!   template's shape) fails with a typed [`ShapeError`] at the point of
//!   misuse, not at encode time.

use std::fmt;

use im::OrdMap;

use crate::error::{ShapeError, ShapeResult};
use crate::value::{is_field_name, Record, SourceShape, Value};

/// A boxed extraction closure; `None` is the absence sentinel.
pub type Extractor = Box<dyn Fn(&Value) -> Option<Value>>;

/// A (destination name, extractor) pair.
///
/// Built with [`encode_property`]; opaque and not itself invokable.
pub struct Directive {
    name: String,
    extract: Extractor,
}

impl Directive {
    /// Destination property name this directive writes.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directive").field("name", &self.name).finish()
    }
}

/// Pairs a destination property name with an extractor closure.
///
/// The extractor is typically composed from the property accessors and
/// the composition engine, but any `Fn(&Value) -> Option<Value>` works.
///
/// # Examples
///
/// ```
/// use recompose::encoder::encode_property;
/// use recompose::property::get_property;
///
/// let directive = encode_property("id", get_property("userId"));
/// assert_eq!(directive.name(), "id");
/// ```
pub fn encode_property<F>(name: impl Into<String>, extract: F) -> Directive
where
    F: Fn(&Value) -> Option<Value> + 'static,
{
    Directive {
        name: name.into(),
        extract: Box::new(extract),
    }
}

/// Output container cloned per encode; the template value itself is
/// consumed into this view exactly once.
enum Template {
    Mapping(OrdMap<String, Value>),
    Record(Record),
}

/// Builder accumulating directives against a template shape.
pub struct RecordEncoder {
    template: Template,
    directives: Vec<Directive>,
}

impl RecordEncoder {
    /// Creates an encoder for outputs shaped like `template`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnsupportedShape`] when the template is
    /// neither a mapping nor a record.
    pub fn new(template: Value) -> ShapeResult<Self> {
        let template = match template {
            Value::Mapping(entries) => Template::Mapping(entries),
            Value::Record(record) => Template::Record(record),
            other => return Err(ShapeError::UnsupportedShape(other.shape())),
        };
        Ok(Self {
            template,
            directives: Vec::new(),
        })
    }

    /// Shape of the outputs this encoder produces.
    pub fn shape(&self) -> SourceShape {
        match self.template {
            Template::Mapping(_) => SourceShape::Mapping,
            Template::Record(_) => SourceShape::Record,
        }
    }

    /// Grows the encoder with one directive, validating its name against
    /// the template shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidName`] when the template is a record
    /// and the directive's name is not a valid field name (purely numeric
    /// names included).
    pub fn with(mut self, directive: Directive) -> ShapeResult<Self> {
        if matches!(self.template, Template::Record(_)) && !is_field_name(directive.name()) {
            log::debug!(
                "rejecting directive '{}' against a record template",
                directive.name()
            );
            return Err(ShapeError::InvalidName {
                name: directive.name,
                shape: SourceShape::Record,
            });
        }
        self.directives.push(directive);
        Ok(self)
    }

    /// Grows the encoder with several directives at once.
    pub fn with_all(self, directives: impl IntoIterator<Item = Directive>) -> ShapeResult<Self> {
        directives
            .into_iter()
            .try_fold(self, |encoder, directive| encoder.with(directive))
    }

    /// Number of directives accumulated so far.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// True when no directives have been supplied yet.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Runs every directive over `source` and assembles the output.
    ///
    /// Each call starts from a fresh copy of the template, so outputs are
    /// independent of one another and of the template.
    pub fn encode(&self, source: &Value) -> Value {
        log::trace!(
            "encoding {} directive(s) onto a {} template",
            self.directives.len(),
            self.shape()
        );
        match &self.template {
            Template::Mapping(entries) => {
                let encoded = self.directives.iter().fold(entries.clone(), |out, directive| {
                    let value = (directive.extract)(source).unwrap_or(Value::Null);
                    out.update(directive.name.clone(), value)
                });
                Value::Mapping(encoded)
            }
            Template::Record(record) => {
                let encoded = self.directives.iter().fold(record.clone(), |out, directive| {
                    let value = (directive.extract)(source).unwrap_or(Value::Null);
                    out.with_field_unchecked(&directive.name, value)
                });
                Value::Record(encoded)
            }
        }
    }

    /// Converts the encoder into the unary mapper `source -> output`.
    pub fn build(self) -> impl Fn(&Value) -> Value {
        move |source| self.encode(source)
    }
}

impl fmt::Debug for RecordEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordEncoder")
            .field("shape", &self.shape())
            .field("directives", &self.directives)
            .finish()
    }
}

/// Creates a [`RecordEncoder`] for outputs shaped like `template`.
///
/// Free-function spelling of [`RecordEncoder::new`], convenient in
/// pipeline-heavy code.
pub fn record_encoder(template: Value) -> ShapeResult<RecordEncoder> {
    RecordEncoder::new(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{get_property, pluck_property};

    fn user_source() -> Value {
        Value::mapping_from([
            ("userId", Value::Int(1)),
            ("userName", Value::Str("foo".to_string())),
        ])
    }

    #[test]
    fn test_encode_onto_empty_mapping() {
        let mapper = record_encoder(Value::empty_mapping())
            .unwrap()
            .with(encode_property("id", get_property("userId")))
            .unwrap()
            .with(encode_property("name", get_property("userName")))
            .unwrap()
            .build();

        let output = mapper(&user_source());
        assert_eq!(
            output,
            Value::mapping_from([
                ("id", Value::Int(1)),
                ("name", Value::Str("foo".to_string())),
            ])
        );
    }

    #[test]
    fn test_template_fields_survive_as_defaults() {
        let template = Value::mapping_from([("version", 2i64), ("id", 0i64)]);
        let encoder = record_encoder(template.clone())
            .unwrap()
            .with(encode_property("id", get_property("userId")))
            .unwrap();

        let output = encoder.encode(&user_source());
        assert_eq!(output.get("version"), Some(&Value::Int(2)));
        assert_eq!(output.get("id"), Some(&Value::Int(1)));
        // template itself untouched
        assert_eq!(template.get("id"), Some(&Value::Int(0)));
    }

    #[test]
    fn test_encoder_without_directives_copies_template() {
        let template = Value::mapping_from([("a", 1i64)]);
        let encoder = record_encoder(template.clone()).unwrap();
        assert!(encoder.is_empty());
        assert_eq!(encoder.encode(&Value::Null), template);
    }

    #[test]
    fn test_later_directives_overwrite_earlier() {
        let encoder = record_encoder(Value::empty_mapping())
            .unwrap()
            .with_all([
                encode_property("id", |_: &Value| Some(Value::Int(1))),
                encode_property("id", |_: &Value| Some(Value::Int(2))),
            ])
            .unwrap();

        assert_eq!(encoder.len(), 2);
        let output = encoder.encode(&Value::Null);
        assert_eq!(output.get("id"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_absent_extraction_writes_null() {
        let encoder = record_encoder(Value::empty_mapping())
            .unwrap()
            .with(encode_property(
                "city",
                pluck_property(["user", "address", "city"]),
            ))
            .unwrap();

        let output = encoder.encode(&user_source());
        assert_eq!(output.get("city"), Some(&Value::Null));
        assert!(output.has("city"));
    }

    #[test]
    fn test_numeric_name_against_record_template_errors() {
        let encoder = record_encoder(Value::Record(Record::new())).unwrap();
        let err = encoder
            .with(encode_property("42", get_property("userId")))
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidName {
                name: "42".to_string(),
                shape: SourceShape::Record,
            }
        );
    }

    #[test]
    fn test_numeric_name_against_mapping_template_is_fine() {
        let encoder = record_encoder(Value::empty_mapping())
            .unwrap()
            .with(encode_property("42", get_property("userId")))
            .unwrap();
        let output = encoder.encode(&user_source());
        assert_eq!(output.get("42"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_scalar_template_errors() {
        let err = record_encoder(Value::Str("nope".to_string()))
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err, ShapeError::UnsupportedShape(SourceShape::Other));
    }

    #[test]
    fn test_record_template_output_shape() {
        let template = Record::from_fields([("name", "")]).unwrap();
        let mapper = record_encoder(Value::Record(template))
            .unwrap()
            .with(encode_property("name", get_property("userName")))
            .unwrap()
            .build();

        let output = mapper(&user_source());
        assert_eq!(output.shape(), SourceShape::Record);
        assert_eq!(output.get("name"), Some(&Value::Str("foo".to_string())));
    }

    #[test]
    fn test_template_reuse_across_encoders() {
        let template = Value::empty_mapping();

        let ids = record_encoder(template.clone())
            .unwrap()
            .with(encode_property("id", get_property("userId")))
            .unwrap();
        let names = record_encoder(template.clone())
            .unwrap()
            .with(encode_property("name", get_property("userName")))
            .unwrap();

        let source = user_source();
        assert_eq!(ids.encode(&source).get("id"), Some(&Value::Int(1)));
        assert!(ids.encode(&source).get("name").is_none());
        assert_eq!(
            names.encode(&source).get("name"),
            Some(&Value::Str("foo".to_string()))
        );
        assert_eq!(template, Value::empty_mapping());
    }

    #[test]
    fn test_each_invocation_yields_independent_output() {
        let mapper = record_encoder(Value::empty_mapping())
            .unwrap()
            .with(encode_property("id", get_property("userId")))
            .unwrap()
            .build();

        let first = mapper(&user_source());
        let second = mapper(&Value::mapping_from([("userId", 9i64)]));

        assert_eq!(first.get("id"), Some(&Value::Int(1)));
        assert_eq!(second.get("id"), Some(&Value::Int(9)));
    }
}
