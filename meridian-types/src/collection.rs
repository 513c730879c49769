use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::GeometryError;
use crate::geometry::{ensure_member_dimension, validate_members};
use crate::{Coord, Dimension, Geom, Geometry, GeometryKind};

/// Ordered set of geometries of any kind.
///
/// The collection declares one dimension, and every member (including nested collections) must have it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometryCollection")]
pub struct GeometryCollection {
    dim: Dimension,
    geometries: Vec<Geom>,
}

impl GeometryCollection {
    /// Creates a new collection. Every member must have dimension `dim`.
    pub fn new(dim: Dimension, geometries: Vec<Geom>) -> Result<Self, GeometryError> {
        ensure_member_dimension(dim, &geometries)?;
        Ok(Self { dim, geometries })
    }

    #[cfg(any(test, feature = "_tests"))]
    pub(crate) fn new_unchecked(dim: Dimension, geometries: Vec<Geom>) -> Self {
        Self { dim, geometries }
    }

    /// Collection without members.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            dim,
            geometries: vec![],
        }
    }

    /// Member geometries.
    pub fn geometries(&self) -> &[Geom] {
        &self.geometries
    }

    /// Takes the members out.
    pub fn into_geometries(self) -> Vec<Geom> {
        self.geometries
    }
}

deserialize_with_new!(GeometryCollection, RawGeometryCollection { geometries: Vec<Geom> });

impl Geometry for GeometryCollection {
    fn kind(&self) -> GeometryKind {
        GeometryKind::GeometryCollection
    }

    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        let iter: Box<dyn Iterator<Item = &Coord> + '_> =
            Box::new(self.geometries.iter().flat_map(|geom| geom.iter_coords()));
        iter
    }

    fn bounds(&self) -> Bounds {
        self.geometries.iter().map(Geometry::bounds).collect()
    }

    fn validate(&self) -> Result<(), GeometryError> {
        validate_members(self.dim, &self.geometries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineString, MultiPoint, Point};
    use assert_matches::assert_matches;

    #[test]
    fn bounds_of_nested_collection() {
        let inner = GeometryCollection::new(
            Dimension::Xy,
            vec![Geom::from(MultiPoint::from(vec![[-5.0, 0.0], [0.0, 9.0]]))],
        )
        .expect("same dimension");
        let collection = GeometryCollection::new(
            Dimension::Xy,
            vec![
                Geom::from(Point::xy(1.0, 1.0)),
                Geom::from(LineString::empty(Dimension::Xy)),
                Geom::from(inner),
            ],
        )
        .expect("same dimension");

        let bbox = *collection.bounds().extent().expect("not empty");
        assert_eq!(
            (bbox.x_min(), bbox.y_min(), bbox.x_max(), bbox.y_max()),
            (-5.0, 0.0, 1.0, 9.0)
        );
        assert_eq!(collection.iter_coords().count(), 3);
    }

    #[test]
    fn members_share_dimension() {
        assert_matches!(
            GeometryCollection::new(
                Dimension::Xy,
                vec![Geom::from(Point::new(Coord::xyz(0.0, 0.0, 0.0)))]
            ),
            Err(GeometryError::DimensionalityMismatch {
                expected: Dimension::Xy,
                found: Dimension::Xyz
            })
        );
    }
}
