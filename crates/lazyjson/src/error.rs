//! Error types for the strict accessors.
//!
//! The lazy core never fails: predicates answer `false` and accessors fall back
//! to zero values. The `try_*` accessors on [`Value`](crate::Value) report a
//! mismatch through [`Error`] instead.

use std::fmt;

use crate::kind::Kind;

/// Error type for strict value access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Expected one kind but the node resolved to another (or to nothing).
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    pub(crate) fn unexpected(expected: Kind, found: Kind) -> Self {
        Error::UnexpectedType {
            expected: expected.name(),
            found: found.name(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for strict value access.
pub type Result<T> = std::result::Result<T, Error>;
