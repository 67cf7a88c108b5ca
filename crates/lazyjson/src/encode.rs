//! Encoding utilities for writing canonical JSON text.
//!
//! These functions regenerate the bytes of a node from a decoded payload.
//! They are used by the setters on [`Value`] and can be called directly.
//!
//! # The `Encode` Trait
//!
//! The [`Encode`] trait provides a type-safe way to encode payloads. It is
//! implemented for every payload a node can hold:
//!
//! | Rust Type          | JSON Kind |
//! |--------------------|-----------|
//! | `Null`             | null      |
//! | `bool`             | boolean   |
//! | `f64`              | number    |
//! | `&str` / `String`  | string    |
//! | `[Value]`          | array     |
//! | `Object`           | object    |
//!
//! # Sharp edges
//!
//! Nothing here escapes or validates. String payloads and object keys are
//! written between quotes verbatim, and container members embed each child's
//! current raw bytes as they are. Callers supply text that is already valid
//! JSON content.

use crate::value::{Object, Value};

/// Trait for payloads that can be encoded as JSON text.
pub trait Encode {
    /// Encode this payload as JSON bytes.
    fn encode(&self) -> Vec<u8>;
}

/// Null payload (JSON `null`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

impl Encode for Null {
    fn encode(&self) -> Vec<u8> {
        encode_null().to_vec()
    }
}

impl Encode for bool {
    fn encode(&self) -> Vec<u8> {
        encode_bool(*self).to_vec()
    }
}

impl Encode for f64 {
    fn encode(&self) -> Vec<u8> {
        encode_number(*self)
    }
}

impl Encode for &str {
    fn encode(&self) -> Vec<u8> {
        encode_string(self)
    }
}

impl Encode for String {
    fn encode(&self) -> Vec<u8> {
        encode_string(self)
    }
}

impl Encode for [Value] {
    fn encode(&self) -> Vec<u8> {
        encode_array(self)
    }
}

impl Encode for Vec<Value> {
    fn encode(&self) -> Vec<u8> {
        encode_array(self)
    }
}

impl Encode for Object {
    fn encode(&self) -> Vec<u8> {
        encode_object(self)
    }
}

/// Encode JSON `null`.
#[inline]
#[must_use]
pub fn encode_null() -> &'static [u8] {
    b"null"
}

/// Encode a boolean literal.
#[inline]
#[must_use]
pub fn encode_bool(value: bool) -> &'static [u8] {
    if value { b"true" } else { b"false" }
}

/// Encode a number as the shortest decimal that reads back to the same `f64`.
///
/// Never uses exponent notation, so very large or very small magnitudes are
/// written out in full. Integral values carry no fractional part.
/// Non-finite values produce `NaN`, `+Inf` or `-Inf`, which are not JSON.
#[must_use]
pub fn encode_number(value: f64) -> Vec<u8> {
    if value.is_nan() {
        return b"NaN".to_vec();
    }
    if value.is_infinite() {
        return if value > 0.0 { b"+Inf".to_vec() } else { b"-Inf".to_vec() };
    }
    // f64's Display is the shortest round-trip form in plain decimal notation.
    value.to_string().into_bytes()
}

/// Encode a string literal without escaping.
#[must_use]
pub fn encode_string(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 2);
    out.push(b'"');
    out.extend_from_slice(value.as_bytes());
    out.push(b'"');
    out
}

/// Encode an array by joining each element's current raw bytes.
#[must_use]
pub fn encode_array(items: &[Value]) -> Vec<u8> {
    let content: usize = items.iter().map(|item| item.raw().len() + 1).sum();
    let mut out = Vec::with_capacity(content + 2);
    out.push(b'[');
    for (i, item) in items.iter().enumerate() {
        if i != 0 {
            out.push(b',');
        }
        out.extend_from_slice(item.raw());
    }
    out.push(b']');
    out
}

/// Encode an object from its members in map iteration order.
///
/// Keys are quoted but not escaped; values are the children's current raw
/// bytes. Member order follows the map and may differ between calls.
#[must_use]
pub fn encode_object(members: &Object) -> Vec<u8> {
    let content: usize = members
        .iter()
        .map(|(key, value)| key.len() + value.raw().len() + 4)
        .sum();
    let mut out = Vec::with_capacity(content + 2);
    out.push(b'{');
    for (i, (key, value)) in members.iter().enumerate() {
        if i != 0 {
            out.push(b',');
        }
        out.push(b'"');
        out.extend_from_slice(key.as_bytes());
        out.extend_from_slice(b"\":");
        out.extend_from_slice(value.raw());
    }
    out.push(b'}');
    out
}
