//! Prelude re-exporting the common surface.
//!
//! Pulls the composition engine, the property accessors, and the record
//! encoder into one import for pipeline-heavy code:
//!
//! ```
//! use recompose::prelude::*;
//! ```

pub use crate::compose::{
    and_then2, compose, compose2, compose_rev, compose_safe, compose_type_safe, constant,
    identity, pipe, SafeStep, Step,
};
pub use crate::encoder::{encode_property, record_encoder, Directive, Extractor, RecordEncoder};
pub use crate::error::{ComposeError, ShapeError, ShapeResult};
pub use crate::ops::{numbers, predicates, strings};
pub use crate::property::{get_property, has_property, pluck_property, set_property};
pub use crate::value::{Record, SourceShape, Value};
