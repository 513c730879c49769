use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{ensure_member_dimension, validate_members};
use crate::{Coord, Dimension, Geometry, GeometryKind, Point};

/// A set of points of the same dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultiPoint")]
pub struct MultiPoint {
    dim: Dimension,
    points: Vec<Point>,
}

impl MultiPoint {
    /// Creates a new multipoint. Every point must have dimension `dim`.
    pub fn new(dim: Dimension, points: Vec<Point>) -> Result<Self, GeometryError> {
        ensure_member_dimension(dim, &points)?;
        Ok(Self { dim, points })
    }

    /// Multipoint without members.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            dim,
            points: vec![],
        }
    }

    /// Member points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

deserialize_with_new!(MultiPoint, RawMultiPoint { points: Vec<Point> });

impl Geometry for MultiPoint {
    fn kind(&self) -> GeometryKind {
        GeometryKind::MultiPoint
    }

    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        self.points.iter().map(Point::coord)
    }

    fn validate(&self) -> Result<(), GeometryError> {
        validate_members(self.dim, &self.points)
    }
}

impl From<Vec<[f64; 2]>> for MultiPoint {
    fn from(value: Vec<[f64; 2]>) -> Self {
        Self {
            dim: Dimension::Xy,
            points: value.into_iter().map(Point::from).collect(),
        }
    }
}
