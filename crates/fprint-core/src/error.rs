//! # Error Hierarchy
//!
//! Structured errors raised by the document abstraction, built with
//! `thiserror`. The `Display` text of every variant is part of the public
//! contract: pipeline operators match on it, and the fingerprint processor
//! surfaces it verbatim.

use thiserror::Error;

/// Errors raised while resolving, reading, or writing document fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The field path was empty.
    #[error("path cannot be null nor empty")]
    EmptyPath,

    /// The field path contains an empty segment (`a..b`, `.a`, `a.`).
    #[error("path [{0}] contains an empty segment")]
    EmptySegment(String),

    /// A segment of the path does not exist in its parent object.
    #[error("field [{segment}] not present as part of path [{path}]")]
    FieldNotPresent {
        /// The segment that could not be found.
        segment: String,
        /// The full dotted path being resolved.
        path: String,
    },

    /// A segment addressed into a scalar value while reading.
    #[error("cannot resolve [{segment}] from object of type [{parent_type}] as part of path [{path}]")]
    CannotResolve {
        /// The segment that could not be resolved.
        segment: String,
        /// Type name of the scalar parent.
        parent_type: &'static str,
        /// The full dotted path being resolved.
        path: String,
    },

    /// A segment addressed into a scalar value while writing.
    #[error("cannot set [{segment}] with parent object of type [{parent_type}] as part of path [{path}]")]
    NotAContainer {
        /// The segment that could not be written.
        segment: String,
        /// Type name of the scalar parent.
        parent_type: &'static str,
        /// The full dotted path being written.
        path: String,
    },

    /// A segment used against an array is not a non-negative integer.
    #[error("[{segment}] is not an integer, cannot be used as an index as part of path [{path}]")]
    NotAnIndex {
        /// The offending segment.
        segment: String,
        /// The full dotted path.
        path: String,
    },

    /// An array index is past the end of the array.
    #[error("[{index}] is out of bounds for array with length [{len}] as part of path [{path}]")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Length of the array.
        len: usize,
        /// The full dotted path.
        path: String,
    },

    /// A serialized document envelope could not be interpreted.
    #[error("invalid document envelope: {0}")]
    InvalidEnvelope(String),
}
