//! Error Types
//!
//! Two kinds of failure exist in this crate:
//!
//! - [`ListError`]: returned by the positional operations of the ordered list
//!   when they are handed a sentinel or stale node reference, or asked to
//!   remove from an empty list. Callers are expected to recover locally.
//! - [`InvariantError`]: returned by the `check_invariants` methods when an
//!   internal cross-structure invariant does not hold. Seeing one means the
//!   structure is corrupt; it is a diagnostic, not a recoverable condition.
//!
//! A missing key is never an error. Lookups report absence through `None`.
//!
//! # Examples
//!
//! ```
//! use freq_cache::error::ListError;
//!
//! assert_eq!(ListError::Empty.to_string(), "list is empty");
//! assert_eq!(ListError::InvalidNode.to_string(), "node is invalid");
//! ```

extern crate alloc;

use alloc::string::String;

/// Failure of an ordered list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The node reference names a sentinel or a node that is no longer live.
    #[error("node is invalid")]
    InvalidNode,

    /// A removal was requested on a list holding no real nodes.
    #[error("list is empty")]
    Empty,
}

/// An internal invariant of a list or cache was found broken.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invariant violated: {0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the description of the failed invariant.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
