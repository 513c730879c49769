//! Error type used by the crate.

use thiserror::Error;

use crate::Dimension;

/// Error returned when a geometry value cannot be constructed or fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The combination of geometry kind and dimension (or the type identifier describing it) is not known.
    #[error("unsupported geometry variant: {0}")]
    UnsupportedVariant(String),

    /// A coordinate or a member geometry does not have the dimension declared by its container.
    #[error("dimensionality mismatch: expected {expected}, found {found}")]
    DimensionalityMismatch {
        /// Dimension declared by the container.
        expected: Dimension,
        /// Dimension of the offending coordinate or member.
        found: Dimension,
    },

    /// Geometry is structurally invalid, e.g. a polygon ring that is not closed.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
