//! Error type used by the crate.

use meridian_types::{Dimension, GeometryError};
use thiserror::Error;

use crate::Position;

/// Error returned by WKT reading and writing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WktError {
    /// Input does not follow the WKT grammar.
    #[error("{message}: found {token} at {position}")]
    MalformedGrammar {
        /// What the parser expected.
        message: String,
        /// Offending token, or `end of input`.
        token: String,
        /// Location of the offending token.
        position: Position,
    },

    /// Input is well-formed but describes a geometry that cannot be represented, e.g. `POINT EMPTY`.
    #[error("unsupported geometry {variant} at {position}")]
    UnsupportedVariant {
        /// Description of the geometry.
        variant: String,
        /// Location of the geometry keyword.
        position: Position,
    },

    /// Member of a collection has a dimension tag different from the collection.
    #[error("dimensionality mismatch at {position}: expected {expected}, found {found}")]
    DimensionalityMismatch {
        /// Dimension of the collection.
        expected: Dimension,
        /// Dimension declared by the member.
        found: Dimension,
        /// Location of the member keyword.
        position: Position,
    },

    /// Collections are nested deeper than the reader allows.
    #[error("geometry nesting is too deep at {position}")]
    NestingTooDeep {
        /// Location of the geometry that exceeded the limit.
        position: Position,
    },

    /// Geometry cannot be written, or parsed values do not form a valid geometry.
    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),
}
