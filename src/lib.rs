//! Curried building blocks for assembling data transformations.
//!
//! Every operation in this crate follows one pattern: configuration goes
//! in, a single-argument closure comes out. Those closures chain into
//! pipelines through the composition engine and drive the record encoder,
//! which maps one dynamic value onto another field-by-field.
//!
//! # Highlights
//!
//! - [`compose`](compose::compose) and friends sequence unary functions
//!   left to right, with absence-aware ([`pipe`](compose::pipe)) and
//!   predicate-gated ([`compose_type_safe`](compose::compose_type_safe))
//!   variants that short-circuit instead of erroring.
//! - [`get_property`](property::get_property),
//!   [`pluck_property`](property::pluck_property) and
//!   [`set_property`](property::set_property) give uniform, curried
//!   access over the two container shapes (ordered mappings and
//!   named-field records) with copy-on-write updates.
//! - [`record_encoder`](encoder::record_encoder) declaratively assembles
//!   `output = f(source)` mappers from named extraction directives.
//! - Reads that cannot resolve yield `None`; only write-path misuse
//!   raises a typed [`ShapeError`](error::ShapeError).
//!
//! ```
//! use recompose::prelude::*;
//!
//! let source = Value::from(serde_json::json!({
//!     "userId": 1,
//!     "userName": "foo",
//! }));
//!
//! let mapper = record_encoder(Value::empty_mapping())?
//!     .with(encode_property("id", get_property("userId")))?
//!     .with(encode_property("name", get_property("userName")))?
//!     .build();
//!
//! let output = mapper(&source);
//! assert_eq!(output.get("id"), Some(&Value::Int(1)));
//! # Ok::<(), recompose::error::ShapeError>(())
//! ```

pub mod compose;
pub mod encoder;
pub mod error;
pub mod ops;
pub mod prelude;
pub mod property;
pub mod value;
