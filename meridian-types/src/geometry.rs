use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coord::ensure_dimension;
use crate::error::GeometryError;
use crate::{
    Coord, Dimension, GeometryCollection, GeometryKind, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Variant,
};

/// Common behaviour of all geometry types.
pub trait Geometry {
    /// Kind of the geometry.
    fn kind(&self) -> GeometryKind;

    /// Dimension declared by the geometry. All its coordinates have this dimension.
    fn dimension(&self) -> Dimension;

    /// Kind and dimension of the geometry.
    fn variant(&self) -> Variant {
        Variant::new(self.kind(), self.dimension())
    }

    /// Iterates over all coordinates of the geometry.
    ///
    /// Polygon rings are visited outer ring first, then holes in order. Members of multi-geometries and collections
    /// are visited in order.
    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord>;

    /// Returns true if the geometry has no coordinates.
    fn is_empty(&self) -> bool {
        self.iter_coords().next().is_none()
    }

    /// Computes bounds of the geometry. The value is not cached.
    fn bounds(&self) -> Bounds {
        Bounds::from_coords(self.iter_coords())
    }

    /// Checks structural validity of the geometry.
    ///
    /// Every coordinate and member must have the declared dimension, and polygon rings must be closed and have at
    /// least 4 coordinates.
    fn validate(&self) -> Result<(), GeometryError> {
        ensure_dimension(self.dimension(), self.iter_coords())
    }
}

/// Checks that every member of a multi-geometry has the `expected` dimension.
pub(crate) fn ensure_member_dimension<'a, G: Geometry + 'a>(
    expected: Dimension,
    members: impl IntoIterator<Item = &'a G>,
) -> Result<(), GeometryError> {
    for member in members {
        let found = member.dimension();
        if found != expected {
            return Err(GeometryError::DimensionalityMismatch { expected, found });
        }
    }

    Ok(())
}

/// Checks that every member of a multi-geometry has the `expected` dimension and is valid itself.
pub(crate) fn validate_members<'a, G: Geometry + 'a>(
    expected: Dimension,
    members: impl IntoIterator<Item = &'a G>,
) -> Result<(), GeometryError> {
    for member in members {
        ensure_member_dimension(expected, [member])?;
        member.validate()?;
    }

    Ok(())
}

/// Geometry of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom {
    /// Point.
    Point(Point),
    /// LineString.
    LineString(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// MultiPoint.
    MultiPoint(MultiPoint),
    /// MultiLineString.
    MultiLineString(MultiLineString),
    /// MultiPolygon.
    MultiPolygon(MultiPolygon),
    /// GeometryCollection.
    GeometryCollection(GeometryCollection),
}

macro_rules! dispatch {
    ($self:ident, $v:ident => $expr:expr) => {
        match $self {
            Geom::Point($v) => $expr,
            Geom::LineString($v) => $expr,
            Geom::Polygon($v) => $expr,
            Geom::MultiPoint($v) => $expr,
            Geom::MultiLineString($v) => $expr,
            Geom::MultiPolygon($v) => $expr,
            Geom::GeometryCollection($v) => $expr,
        }
    };
}

impl Geometry for Geom {
    fn kind(&self) -> GeometryKind {
        dispatch!(self, v => v.kind())
    }

    fn dimension(&self) -> Dimension {
        dispatch!(self, v => v.dimension())
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        let iter: Box<dyn Iterator<Item = &Coord> + '_> =
            dispatch!(self, v => Box::new(v.iter_coords()));
        iter
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, v => v.is_empty())
    }

    fn bounds(&self) -> Bounds {
        dispatch!(self, v => v.bounds())
    }

    fn validate(&self) -> Result<(), GeometryError> {
        dispatch!(self, v => v.validate())
    }
}

macro_rules! impl_from_kind {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for Geom {
                fn from(value: $kind) -> Self {
                    Self::$kind(value)
                }
            }
        )*
    };
}

impl_from_kind!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);
