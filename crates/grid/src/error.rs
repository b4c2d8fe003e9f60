//! Error types for the aeolus-grid crate.

/// Error type for all fallible operations in the aeolus-grid crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    /// Returned when a coordinate or time axis has no entries.
    #[error("axis '{name}' is empty")]
    EmptyAxis {
        /// Name of the offending axis.
        name: String,
    },

    /// Returned when the value array shape disagrees with the axis lengths.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size derived from the axis array.
        expected: usize,
        /// Actual size of the value array along that dimension.
        got: usize,
    },

    /// Returned when a coordinate axis is not strictly ascending.
    #[error("axis '{name}' is not strictly ascending at index {index}")]
    NotAscending {
        /// Name of the offending axis.
        name: String,
        /// First index where the ordering breaks.
        index: usize,
    },

    /// Returned when a coordinate axis contains a non-finite value.
    #[error("axis '{name}' contains a non-finite value at index {index}")]
    NonFiniteCoordinate {
        /// Name of the offending axis.
        name: String,
        /// Index of the non-finite entry.
        index: usize,
    },
}
