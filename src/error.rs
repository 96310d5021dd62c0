//! Error types for the associative memory.
//!
//! Every variant is a precondition violation detected at the API boundary.
//! Nothing here is retried or recovered internally.

use thiserror::Error;

/// Errors returned by the codec, the memory and the session layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HopfieldError {
    /// A vector or grid does not have the length the operation needs.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Training was called with no patterns.
    #[error("pattern library is empty")]
    EmptyLibrary,

    /// An element outside {+1, -1}.
    #[error("invalid element {value} at index {index}: expected +1 or -1")]
    InvalidElement { index: usize, value: i8 },

    /// Flip probability outside [0, 1].
    #[error("noise probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Recall needs at least one sweep.
    #[error("max_iterations must be at least 1")]
    InvalidIterations,

    /// A grid shape with a zero dimension.
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Element index past the end of a vector.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// More distinct cells requested for flipping than the pattern has.
    #[error("cannot flip {flips} distinct cells of a {len}-element pattern")]
    TooManyFlips { flips: usize, len: usize },

    /// Lookup of a reference pattern by a name that does not exist.
    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HopfieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HopfieldError::ShapeMismatch {
            expected: 25,
            actual: 24,
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch: expected 25 elements, got 24"
        );
        assert_eq!(
            HopfieldError::EmptyLibrary.to_string(),
            "pattern library is empty"
        );
        assert_eq!(
            HopfieldError::TooManyFlips { flips: 4, len: 3 }.to_string(),
            "cannot flip 4 distinct cells of a 3-element pattern"
        );
        assert_eq!(
            HopfieldError::UnknownPattern("z".into()).to_string(),
            "unknown pattern 'z'"
        );
    }
}
