use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::GeometryError;
use crate::geometry::{ensure_member_dimension, validate_members};
use crate::{Coord, Dimension, Geometry, GeometryKind, Polygon};

/// A set of polygons of the same dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultiPolygon")]
pub struct MultiPolygon {
    dim: Dimension,
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a new multipolygon. Every member must have dimension `dim`.
    pub fn new(dim: Dimension, polygons: Vec<Polygon>) -> Result<Self, GeometryError> {
        ensure_member_dimension(dim, &polygons)?;
        Ok(Self { dim, polygons })
    }

    /// Multipolygon without members.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            dim,
            polygons: vec![],
        }
    }

    /// Member polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

deserialize_with_new!(MultiPolygon, RawMultiPolygon { polygons: Vec<Polygon> });

impl Geometry for MultiPolygon {
    fn kind(&self) -> GeometryKind {
        GeometryKind::MultiPolygon
    }

    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        self.polygons
            .iter()
            .flat_map(|polygon| polygon.iter_coords())
    }

    fn bounds(&self) -> Bounds {
        self.polygons.iter().map(Geometry::bounds).collect()
    }

    fn validate(&self) -> Result<(), GeometryError> {
        validate_members(self.dim, &self.polygons)
    }
}

impl From<Vec<Vec<Vec<[f64; 2]>>>> for MultiPolygon {
    fn from(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
        Self {
            dim: Dimension::Xy,
            polygons: value.into_iter().map(Polygon::from).collect(),
        }
    }
}
