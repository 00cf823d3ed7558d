//! Error types for tracevis-core.

use thiserror::Error;

/// Result type for tracevis-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or replaying a trace.
#[derive(Debug, Error)]
pub enum Error {
    /// A cursor position outside `0..=len` was requested.
    #[error("step {requested} is outside the trace (valid steps are 0..={len})")]
    OutOfRange { requested: i64, len: usize },

    /// A serialized event carried a tag outside the known variant set.
    #[error("unknown event type `{tag}` at position {position}")]
    UnknownEvent { position: usize, tag: String },

    /// An event referenced a position that does not exist in the current values.
    #[error("event {step} ({event}) references index {index}, but only {len} values exist")]
    IndexOutOfBounds {
        step: usize,
        event: &'static str,
        index: usize,
        len: usize,
    },

    /// A `SetRange` event carried an inverted or out-of-bounds range.
    #[error("event {step} sets range ({low}, {high}) over {len} values")]
    InvalidRange {
        step: usize,
        low: usize,
        high: usize,
        len: usize,
    },

    /// A serialized event had a known tag but an unusable payload.
    #[error("malformed event at position {position}: {reason}")]
    MalformedEvent { position: usize, reason: String },

    /// The trace document itself could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an `OutOfRange` error from an unsigned request.
    pub(crate) fn out_of_range(requested: usize, len: usize) -> Self {
        Error::OutOfRange {
            requested: i64::try_from(requested).unwrap_or(i64::MAX),
            len,
        }
    }
}
