//! Error handling for the geometry kernel.
//!
//! Structural misuse of a path (a segment before the opening move, a close
//! on an empty path, joining paths that do not touch) is reported through
//! [`GeometryError`]. Purely numeric degeneracies (zero-length vectors,
//! coincident points) are NOT errors; those return documented sentinel
//! values so a draft never aborts on extreme measurement combinations.

use thiserror::Error;

/// Errors raised by structurally invalid path operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A drawing operation was issued before the opening move.
    #[error("'{op}' before 'move': a path must start with a move")]
    MissingMove {
        /// The operation that was attempted.
        op: &'static str,
    },

    /// A second move was issued; a path holds exactly one.
    #[error("Duplicate 'move': a path holds exactly one move")]
    DuplicateMove,

    /// A drawing operation was issued after the path was closed.
    #[error("'{op}' after 'close': a closed path accepts no further segments")]
    SegmentAfterClose {
        /// The operation that was attempted.
        op: &'static str,
    },

    /// `close` was called on a path with no segments.
    #[error("Cannot close an empty path")]
    CloseOnEmpty,

    /// `join` was asked to concatenate paths whose ends do not meet.
    #[error("Cannot join non-contiguous paths: endpoints are {gap:.3}mm apart")]
    DiscontiguousJoin {
        /// Distance between the first path's end and the second's start.
        gap: f64,
    },

    /// `join` was asked to extend a closed path.
    #[error("Cannot join onto a closed path")]
    JoinClosed,

    /// An operation requires at least one drawable segment.
    #[error("'{op}' requires a non-empty path")]
    EmptyPath {
        /// The operation that was attempted.
        op: &'static str,
    },
}

/// Result type using [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;
