//! Lazily typed JSON nodes.
//!
//! A [`Value`] owns the canonical JSON text of one value and a memoized
//! decode of it. Nothing is parsed at construction; the first query for a
//! kind tries to decode the text as that kind and caches the payload on
//! success.
//!
//! # Reads that write
//!
//! Every predicate and accessor takes `&mut self`: a "read" such as
//! [`Value::is_object`] may fill the cache. Share a tree across threads only
//! behind a lock, or call [`Value::resolve`] on each node first and use the
//! side-effect-free [`Value::kind`] afterwards.
//!
//! # Mutation and resync
//!
//! Setters rewrite a node's bytes and payload together. Parents do not
//! notice when a child changes; call [`Value::set`] on each ancestor, from
//! the mutated node up to the root, to regenerate their bytes.
//!
//! ```
//! use lazyjson::parse_str;
//!
//! let mut root = parse_str(r#"{"user":{"active":false}}"#);
//! let user = root.get_mut("user").unwrap();
//! user.get_mut("active").unwrap().set_boolean(true);
//! user.set();
//! root.set();
//!
//! assert_eq!(root.raw(), br#"{"user":{"active":true}}"#);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use log::{debug, trace};

use crate::decode::decode;
use crate::encode::{
    encode_array, encode_bool, encode_null, encode_number, encode_object, encode_string,
};
use crate::error::{Error, Result};
use crate::kind::Kind;

/// Members of an object node. Iteration order is unspecified.
pub type Object = HashMap<String, Value>;

/// Elements of an array node.
pub type Array = Vec<Value>;

static EMPTY_OBJECT: LazyLock<Object> = LazyLock::new(Object::new);

/// Cached decode of a node's raw text. The variant doubles as the kind tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum Decoded {
    #[default]
    Unresolved,
    Null,
    Object(Object),
    Array(Array),
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Decoded {
    fn kind(&self) -> Kind {
        match self {
            Decoded::Unresolved => Kind::Unresolved,
            Decoded::Null => Kind::Null,
            Decoded::Object(_) => Kind::Object,
            Decoded::Array(_) => Kind::Array,
            Decoded::String(_) => Kind::String,
            Decoded::Number(_) => Kind::Number,
            Decoded::Boolean(_) => Kind::Boolean,
        }
    }
}

/// One JSON value, typed on first use.
///
/// The default value has empty raw text and stays unresolved.
#[derive(Clone, Default, PartialEq)]
pub struct Value {
    /// Canonical JSON text; source of truth for decoding.
    raw: Vec<u8>,
    decoded: Decoded,
}

impl Value {
    /// Wrap raw JSON text without parsing it.
    #[must_use]
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: raw.into(),
            decoded: Decoded::Unresolved,
        }
    }

    /// A node holding JSON `null`.
    #[must_use]
    pub fn null() -> Self {
        let mut value = Self::default();
        value.set_null();
        value
    }

    /// The current canonical bytes.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The current canonical bytes as text, if they are valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.raw).ok()
    }

    /// Consume the node, keeping only its canonical bytes.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }

    /// The cached kind. Never decodes.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.decoded.kind()
    }

    /// Resolve the kind, trying null, object, array, string, number and
    /// boolean in turn.
    ///
    /// Returns `Kind::Unresolved` when every attempt fails; the next call
    /// tries again.
    pub fn resolve(&mut self) -> Kind {
        for kind in Kind::RESOLUTION_ORDER {
            if self.resolve_as(kind) {
                break;
            }
        }
        self.kind()
    }

    /// Answer whether the node is `kind`, decoding as `kind` if still
    /// unresolved. Failed attempts are not remembered.
    fn resolve_as(&mut self, kind: Kind) -> bool {
        if self.decoded.kind().is_resolved() {
            return self.decoded.kind() == kind;
        }
        match decode(&self.raw, kind) {
            Some(decoded) => {
                debug!("resolved {} bytes as {kind}", self.raw.len());
                self.decoded = decoded;
                true
            }
            None => false,
        }
    }

    // --- Predicates ---

    /// Check if the value is JSON `null`.
    pub fn is_null(&mut self) -> bool {
        self.resolve_as(Kind::Null)
    }

    /// Check if the value is a JSON object (`{}` included).
    pub fn is_object(&mut self) -> bool {
        self.resolve_as(Kind::Object)
    }

    /// Check if the value is a JSON array (`[]` included).
    pub fn is_array(&mut self) -> bool {
        self.resolve_as(Kind::Array)
    }

    /// Check if the value is a JSON string.
    pub fn is_string(&mut self) -> bool {
        self.resolve_as(Kind::String)
    }

    /// Check if the value is a JSON number.
    pub fn is_number(&mut self) -> bool {
        self.resolve_as(Kind::Number)
    }

    /// Check if the value is `true` or `false`.
    pub fn is_boolean(&mut self) -> bool {
        self.resolve_as(Kind::Boolean)
    }

    // --- Accessors ---
    //
    // A mismatch yields the kind's zero value. Check the matching predicate
    // first when the difference matters.

    /// The object members, or an empty map if the node is not an object.
    pub fn object(&mut self) -> &Object {
        self.resolve_as(Kind::Object);
        match &self.decoded {
            Decoded::Object(members) => members,
            _ => &EMPTY_OBJECT,
        }
    }

    /// The array elements, or an empty slice if the node is not an array.
    pub fn array(&mut self) -> &[Value] {
        self.resolve_as(Kind::Array);
        match &self.decoded {
            Decoded::Array(items) => items,
            _ => &[],
        }
    }

    /// The decoded string, or `""` if the node is not a string.
    pub fn string(&mut self) -> &str {
        self.resolve_as(Kind::String);
        match &self.decoded {
            Decoded::String(s) => s,
            _ => "",
        }
    }

    /// The decoded number, or `0.0` if the node is not a number.
    pub fn number(&mut self) -> f64 {
        self.resolve_as(Kind::Number);
        match self.decoded {
            Decoded::Number(n) => n,
            _ => 0.0,
        }
    }

    /// The decoded boolean, or `false` if the node is not a boolean.
    pub fn boolean(&mut self) -> bool {
        self.resolve_as(Kind::Boolean);
        match self.decoded {
            Decoded::Boolean(b) => b,
            _ => false,
        }
    }

    /// Mutable access to the object members.
    ///
    /// Mutating a member leaves this node's bytes stale until [`Value::set`].
    pub fn object_mut(&mut self) -> Option<&mut Object> {
        self.try_object().ok()
    }

    /// Mutable access to the array elements.
    ///
    /// Mutating an element leaves this node's bytes stale until [`Value::set`].
    pub fn array_mut(&mut self) -> Option<&mut Array> {
        self.try_array().ok()
    }

    /// Mutable access to one object member.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.object_mut()?.get_mut(key)
    }

    /// Mutable access to one array element.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.array_mut()?.get_mut(index)
    }

    // --- Strict accessors ---
    //
    // On mismatch the node is fully resolved so the error can name what it
    // actually holds.

    /// The object members, or an error naming the actual kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedType` if the node is not an object.
    pub fn try_object(&mut self) -> Result<&mut Object> {
        if !self.resolve_as(Kind::Object) {
            return Err(self.mismatch(Kind::Object));
        }
        match self.decoded {
            Decoded::Object(ref mut members) => Ok(members),
            ref other => Err(Error::unexpected(Kind::Object, other.kind())),
        }
    }

    /// The array elements, or an error naming the actual kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedType` if the node is not an array.
    pub fn try_array(&mut self) -> Result<&mut Array> {
        if !self.resolve_as(Kind::Array) {
            return Err(self.mismatch(Kind::Array));
        }
        match self.decoded {
            Decoded::Array(ref mut items) => Ok(items),
            ref other => Err(Error::unexpected(Kind::Array, other.kind())),
        }
    }

    /// The decoded string, or an error naming the actual kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedType` if the node is not a string.
    pub fn try_string(&mut self) -> Result<&str> {
        if !self.resolve_as(Kind::String) {
            return Err(self.mismatch(Kind::String));
        }
        match self.decoded {
            Decoded::String(ref s) => Ok(s.as_str()),
            ref other => Err(Error::unexpected(Kind::String, other.kind())),
        }
    }

    /// The decoded number, or an error naming the actual kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedType` if the node is not a number.
    pub fn try_number(&mut self) -> Result<f64> {
        if !self.resolve_as(Kind::Number) {
            return Err(self.mismatch(Kind::Number));
        }
        Ok(self.number())
    }

    /// The decoded boolean, or an error naming the actual kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedType` if the node is not a boolean.
    pub fn try_boolean(&mut self) -> Result<bool> {
        if !self.resolve_as(Kind::Boolean) {
            return Err(self.mismatch(Kind::Boolean));
        }
        Ok(self.boolean())
    }

    /// Succeeds only for JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnexpectedType` if the node is not null.
    pub fn try_null(&mut self) -> Result<()> {
        if !self.resolve_as(Kind::Null) {
            return Err(self.mismatch(Kind::Null));
        }
        Ok(())
    }

    fn mismatch(&mut self, expected: Kind) -> Error {
        Error::unexpected(expected, self.resolve())
    }

    // --- Setters ---

    /// Overwrite the node with JSON `null`.
    pub fn set_null(&mut self) {
        self.raw = encode_null().to_vec();
        self.decoded = Decoded::Null;
        trace!("set null");
    }

    /// Overwrite the node with an object built from `members`.
    ///
    /// Each member contributes its current raw bytes; members are not resynced.
    pub fn set_object(&mut self, members: Object) {
        self.raw = encode_object(&members);
        trace!("set object with {} members", members.len());
        self.decoded = Decoded::Object(members);
    }

    /// Overwrite the node with an array built from `items`.
    ///
    /// Each element contributes its current raw bytes; elements are not resynced.
    pub fn set_array(&mut self, items: Array) {
        self.raw = encode_array(&items);
        trace!("set array with {} elements", items.len());
        self.decoded = Decoded::Array(items);
    }

    /// Overwrite the node with a string. The text is not escaped.
    pub fn set_string(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.raw = encode_string(&value);
        self.decoded = Decoded::String(value);
        trace!("set string");
    }

    /// Overwrite the node with a number.
    pub fn set_number(&mut self, value: f64) {
        self.raw = encode_number(value);
        self.decoded = Decoded::Number(value);
        trace!("set number {value}");
    }

    /// Overwrite the node with a boolean.
    pub fn set_boolean(&mut self, value: bool) {
        self.raw = encode_bool(value).to_vec();
        self.decoded = Decoded::Boolean(value);
        trace!("set boolean {value}");
    }

    /// Regenerate the raw bytes from the cached payload.
    ///
    /// Resolves first if needed. Use this on each ancestor, bottom-up, after
    /// mutating a descendant. An unresolvable node keeps its bytes.
    pub fn set(&mut self) {
        self.resolve();
        self.raw = match &self.decoded {
            Decoded::Unresolved => {
                trace!("resync skipped: {} bytes stay unresolved", self.raw.len());
                return;
            }
            Decoded::Null => encode_null().to_vec(),
            Decoded::Object(members) => encode_object(members),
            Decoded::Array(items) => encode_array(items),
            Decoded::String(s) => encode_string(s),
            Decoded::Number(n) => encode_number(*n),
            Decoded::Boolean(b) => encode_bool(*b).to_vec(),
        };
        trace!("resynced {} as {} bytes", self.kind(), self.raw.len());
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value::{:?}({})",
            self.kind(),
            String::from_utf8_lossy(&self.raw)
        )
    }
}

/// Writes the raw bytes, replacing invalid UTF-8.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.raw))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        let mut node = Self::default();
        node.set_boolean(value);
        node
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        let mut node = Self::default();
        node.set_number(value);
        node
    }
}

/// Builds a string node; use [`Value::new`] to wrap raw JSON text.
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        let mut node = Self::default();
        node.set_string(value);
        node
    }
}

/// Builds a string node; use [`Value::new`] to wrap raw JSON text.
impl From<String> for Value {
    fn from(value: String) -> Self {
        let mut node = Self::default();
        node.set_string(value);
        node
    }
}

impl From<Object> for Value {
    fn from(members: Object) -> Self {
        let mut node = Self::default();
        node.set_object(members);
        node
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        let mut node = Self::default();
        node.set_array(items);
        node
    }
}

impl From<crate::encode::Null> for Value {
    fn from(_: crate::encode::Null) -> Self {
        Self::null()
    }
}
