//! The memoized variant tag of a [`Value`](crate::Value).
//!
//! A node starts out [`Kind::Unresolved`] and moves to one of the six JSON
//! kinds on its first successful decode, or when a setter is called.

use std::fmt;

/// JSON kind of a node, or `Unresolved` while no decode has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// No decode attempt has succeeded yet (or none ever will).
    #[default]
    Unresolved,
    Null,
    Object,
    Array,
    String,
    Number,
    Boolean,
}

impl Kind {
    /// The six resolvable kinds, in the order [`Value::resolve`] tries them.
    ///
    /// [`Value::resolve`]: crate::Value::resolve
    pub const RESOLUTION_ORDER: [Kind; 6] = [
        Kind::Null,
        Kind::Object,
        Kind::Array,
        Kind::String,
        Kind::Number,
        Kind::Boolean,
    ];

    /// Get the kind name as a string (for error messages).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Unresolved => "unresolved",
            Kind::Null => "null",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
        }
    }

    /// True for every kind except `Unresolved`.
    #[inline]
    #[must_use]
    pub fn is_resolved(self) -> bool {
        self != Kind::Unresolved
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
