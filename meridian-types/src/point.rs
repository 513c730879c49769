use serde::{Deserialize, Serialize};

use crate::{Coord, Dimension, Geometry, GeometryKind};

/// Point geometry.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point(Coord);

impl Point {
    /// Creates a new point.
    pub const fn new(coord: Coord) -> Self {
        Self(coord)
    }

    /// Creates a 2d point.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self(Coord::xy(x, y))
    }

    /// Position of the point.
    pub fn coord(&self) -> &Coord {
        &self.0
    }

    /// X ordinate.
    pub fn x(&self) -> f64 {
        self.0.x()
    }

    /// Y ordinate.
    pub fn y(&self) -> f64 {
        self.0.y()
    }
}

impl Geometry for Point {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Point
    }

    fn dimension(&self) -> Dimension {
        self.0.dimension()
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        std::iter::once(&self.0)
    }
}

impl From<Coord> for Point {
    fn from(value: Coord) -> Self {
        Self(value)
    }
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Self(value.into())
    }
}
