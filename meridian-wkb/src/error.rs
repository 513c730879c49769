//! Error type used by the crate.

use meridian_types::{Dimension, GeometryError, GeometryKind};
use thiserror::Error;

/// Error returned by WKB encoding and decoding.
///
/// Decoding errors carry the byte offset in the input at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WkbError {
    /// Byte order marker is neither `0` (big endian) nor `1` (little endian).
    #[error("invalid byte order marker {marker:#04x} at offset {offset}")]
    InvalidByteOrder {
        /// Value of the marker.
        marker: u8,
        /// Offset of the marker.
        offset: usize,
    },

    /// Type code does not correspond to any known geometry variant.
    #[error("unsupported geometry type code {code} at offset {offset}")]
    UnsupportedTypeCode {
        /// Type code read from the input.
        code: u32,
        /// Offset of the type code.
        offset: usize,
    },

    /// Input ends before the element starting at `offset` could be read.
    #[error("truncated input at offset {offset}: {needed} bytes needed, {available} available")]
    TruncatedInput {
        /// Offset of the element that could not be read.
        offset: usize,
        /// Number of bytes the element requires.
        needed: usize,
        /// Number of bytes left in the input.
        available: usize,
    },

    /// Nested geometry declares a dimension different from its parent.
    #[error("dimensionality mismatch at offset {offset}: expected {expected}, found {found}")]
    DimensionalityMismatch {
        /// Dimension of the parent geometry.
        expected: Dimension,
        /// Dimension declared by the nested geometry.
        found: Dimension,
        /// Offset of the nested geometry.
        offset: usize,
    },

    /// Member of a multi-geometry has a wrong kind, e.g. a line string inside a multipoint.
    #[error("unexpected member at offset {offset}: expected {expected}, found {found}")]
    UnexpectedMemberKind {
        /// Kind the multi-geometry requires.
        expected: GeometryKind,
        /// Kind declared by the member.
        found: GeometryKind,
        /// Offset of the member.
        offset: usize,
    },

    /// Input continues after the end of the geometry.
    #[error("unexpected trailing bytes at offset {offset}")]
    TrailingBytes {
        /// Offset of the first byte after the geometry.
        offset: usize,
    },

    /// Geometries are nested deeper than the reader allows.
    #[error("geometry nesting is too deep at offset {offset}")]
    NestingTooDeep {
        /// Offset of the geometry that exceeded the limit.
        offset: usize,
    },

    /// Hex string contains a non-hex character or has odd length.
    #[error("invalid hex input at offset {offset}")]
    InvalidHex {
        /// Byte offset of the invalid character, or the length of the string if it has odd length.
        offset: usize,
    },

    /// Geometry cannot be encoded, or decoded values do not form a valid geometry.
    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),
}
