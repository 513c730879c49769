use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::{Coord, Dimension, Geometry, GeometryKind, LinearRing};

/// Polygon: an outer ring and zero or more holes.
///
/// A polygon without rings is the empty polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolygon")]
pub struct Polygon {
    dim: Dimension,
    rings: Vec<LinearRing>,
}

impl Polygon {
    /// Creates a polygon from its rings, outer ring first.
    pub fn new(dim: Dimension, rings: Vec<LinearRing>) -> Result<Self, GeometryError> {
        for ring in &rings {
            if ring.dimension() != dim {
                return Err(GeometryError::DimensionalityMismatch {
                    expected: dim,
                    found: ring.dimension(),
                });
            }
        }

        Ok(Self { dim, rings })
    }

    /// Creates a polygon with the dimension of the outer ring.
    pub fn from_rings(
        exterior: LinearRing,
        interiors: Vec<LinearRing>,
    ) -> Result<Self, GeometryError> {
        let dim = exterior.dimension();
        let mut rings = Vec::with_capacity(interiors.len() + 1);
        rings.push(exterior);
        rings.extend(interiors);

        Self::new(dim, rings)
    }

    /// Polygon without rings.
    pub fn empty(dim: Dimension) -> Self {
        Self { dim, rings: vec![] }
    }

    /// Outer ring, if the polygon is not empty.
    pub fn exterior(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    /// Holes of the polygon.
    pub fn interiors(&self) -> &[LinearRing] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// All rings, outer ring first.
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }
}

deserialize_with_new!(Polygon, RawPolygon { rings: Vec<LinearRing> });

impl Geometry for Polygon {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Polygon
    }

    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        self.rings.iter().flat_map(|ring| ring.coords().iter())
    }

    fn validate(&self) -> Result<(), GeometryError> {
        for ring in &self.rings {
            if ring.dimension() != self.dim {
                return Err(GeometryError::DimensionalityMismatch {
                    expected: self.dim,
                    found: ring.dimension(),
                });
            }

            ring.validate()?;
        }

        Ok(())
    }
}

impl From<LinearRing> for Polygon {
    fn from(value: LinearRing) -> Self {
        Self {
            dim: value.dimension(),
            rings: vec![value],
        }
    }
}

impl From<Vec<Vec<[f64; 2]>>> for Polygon {
    fn from(value: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            dim: Dimension::Xy,
            rings: value.into_iter().map(LinearRing::from).collect(),
        }
    }
}
