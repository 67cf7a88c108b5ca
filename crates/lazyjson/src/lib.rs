//! Lazily typed, mutable JSON values.
//!
//! [`parse`] wraps JSON text in a [`Value`] without looking at it. The kind is
//! decided on first query and cached; containers decode one level at a time.
//! Setters rewrite a node's text, and [`Value::set`] regenerates a parent
//! from its (possibly mutated) children.
//!
//! ```
//! let mut doc = lazyjson::parse_str(r#"{"tags":["a","b"]}"#);
//!
//! assert!(doc.is_object());
//! let tags = doc.get_mut("tags").unwrap();
//! tags.element_mut(1).unwrap().set_string("c");
//! tags.set();
//! doc.set();
//!
//! assert_eq!(doc.raw(), br#"{"tags":["a","c"]}"#);
//! ```

mod decode;
pub mod encode;
pub mod error;
pub mod kind;
pub mod value;

pub use encode::{Encode, Null};
pub use error::{Error, Result};
pub use kind::Kind;
pub use value::{Array, Object, Value};

/// Wrap raw JSON bytes in an unresolved [`Value`]. Nothing is validated.
#[must_use]
pub fn parse(raw: impl Into<Vec<u8>>) -> Value {
    Value::new(raw)
}

/// Wrap JSON text in an unresolved [`Value`]. Nothing is validated.
#[must_use]
pub fn parse_str(text: &str) -> Value {
    Value::new(text)
}
