use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coord::ensure_dimension;
use crate::error::GeometryError;
use crate::{Coord, Dimension, Geometry, GeometryKind};

/// Sequence of coordinates connected by straight segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLineString")]
pub struct LineString {
    dim: Dimension,
    coords: Vec<Coord>,
}

impl LineString {
    /// Creates a new line string. Every coordinate must have dimension `dim`.
    pub fn new(dim: Dimension, coords: Vec<Coord>) -> Result<Self, GeometryError> {
        ensure_dimension(dim, &coords)?;
        Ok(Self { dim, coords })
    }

    /// Skips the dimension check, for tests of code that must reject inconsistent geometries.
    #[cfg(any(test, feature = "_tests"))]
    pub(crate) fn new_unchecked(dim: Dimension, coords: Vec<Coord>) -> Self {
        Self { dim, coords }
    }

    /// Line string without coordinates.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            dim,
            coords: vec![],
        }
    }

    /// Coordinates of the line string.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Takes the coordinates out.
    pub fn into_coords(self) -> Vec<Coord> {
        self.coords
    }

    /// Returns true if the line string is not empty and its first coordinate equals the last one.
    pub fn is_closed(&self) -> bool {
        !self.coords.is_empty() && self.coords.first() == self.coords.last()
    }
}

deserialize_with_new!(LineString, RawLineString { coords: Vec<Coord> });

impl Geometry for LineString {
    fn kind(&self) -> GeometryKind {
        GeometryKind::LineString
    }

    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        self.coords.iter()
    }
}

impl From<Vec<[f64; 2]>> for LineString {
    fn from(value: Vec<[f64; 2]>) -> Self {
        Self {
            dim: Dimension::Xy,
            coords: value.into_iter().map(Coord::from).collect(),
        }
    }
}

impl From<LinearRing> for LineString {
    fn from(value: LinearRing) -> Self {
        Self {
            dim: value.dim,
            coords: value.coords,
        }
    }
}

/// Boundary of a polygon.
///
/// The ring is not required to be closed when constructed, so that decoders can represent whatever input they read.
/// [`LinearRing::validate`] checks that the ring is closed and has at least 4 coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinearRing")]
pub struct LinearRing {
    dim: Dimension,
    coords: Vec<Coord>,
}

impl LinearRing {
    /// Minimum number of coordinates in a valid ring.
    pub const MIN_COORDS: usize = 4;

    /// Creates a new ring. Every coordinate must have dimension `dim`.
    pub fn new(dim: Dimension, coords: Vec<Coord>) -> Result<Self, GeometryError> {
        ensure_dimension(dim, &coords)?;
        Ok(Self { dim, coords })
    }

    /// Dimension of the ring.
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Coordinates of the ring.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Number of coordinates.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns true if the ring has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns true if the first coordinate equals the last one.
    pub fn is_closed(&self) -> bool {
        !self.coords.is_empty() && self.coords.first() == self.coords.last()
    }

    /// Bounds of the ring.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_coords(&self.coords)
    }

    /// Checks that the coordinates have the ring dimension, and that the ring is closed and not degenerate.
    pub fn validate(&self) -> Result<(), GeometryError> {
        ensure_dimension(self.dim, &self.coords)?;

        if self.coords.len() < Self::MIN_COORDS {
            return Err(GeometryError::InvalidGeometry(format!(
                "ring must have at least {} coordinates, got {}",
                Self::MIN_COORDS,
                self.coords.len()
            )));
        }

        if !self.is_closed() {
            return Err(GeometryError::InvalidGeometry(
                "ring is not closed".to_string(),
            ));
        }

        Ok(())
    }
}

deserialize_with_new!(LinearRing, RawLinearRing { coords: Vec<Coord> });

impl From<Vec<[f64; 2]>> for LinearRing {
    fn from(value: Vec<[f64; 2]>) -> Self {
        Self {
            dim: Dimension::Xy,
            coords: value.into_iter().map(Coord::from).collect(),
        }
    }
}

impl From<LineString> for LinearRing {
    fn from(value: LineString) -> Self {
        Self {
            dim: value.dim,
            coords: value.coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn rejects_mixed_dimensions() {
        let result = LineString::new(
            Dimension::Xyz,
            vec![Coord::xyz(0.0, 0.0, 0.0), Coord::xym(1.0, 1.0, 1.0)],
        );
        assert_eq!(
            result,
            Err(GeometryError::DimensionalityMismatch {
                expected: Dimension::Xyz,
                found: Dimension::Xym,
            })
        );
    }

    #[test]
    fn closed() {
        let line = LineString::from(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]);
        assert!(line.is_closed());
        assert!(!LineString::empty(Dimension::Xy).is_closed());
    }

    #[test]
    fn ring_validation() {
        let valid = LinearRing::from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
        assert_eq!(valid.validate(), Ok(()));

        let too_short = LinearRing::from(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]);
        assert_matches!(too_short.validate(), Err(GeometryError::InvalidGeometry(_)));

        let open = LinearRing::from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert_matches!(open.validate(), Err(GeometryError::InvalidGeometry(_)));
    }

    #[test]
    fn line_string_bounds() {
        let line = LineString::new(
            Dimension::Xym,
            vec![Coord::xym(0.0, 5.0, 10.0), Coord::xym(3.0, -1.0, 2.0)],
        )
        .expect("valid line");
        let bbox = *line.bounds().extent().expect("not empty");
        assert_eq!(bbox.x_min(), 0.0);
        assert_eq!(bbox.y_min(), -1.0);
        assert_eq!(bbox.m_range(), Some((2.0, 10.0)));
        assert_eq!(bbox.z_range(), None);
    }
}
