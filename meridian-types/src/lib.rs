//! Simple feature geometries (points, line strings, polygons, their multi-part counterparts and collections) in
//! 2d, 3d and measured variants.
//!
//! Every geometry declares its [`Dimension`] when it is constructed, and constructors reject coordinates and
//! members of any other dimension. Common operations are available through the [`Geometry`] trait:
//!
//! ```
//! use meridian_types::{Coord, Dimension, Geometry, LineString};
//!
//! let line = LineString::new(
//!     Dimension::Xyz,
//!     vec![Coord::xyz(0.0, 0.0, 10.0), Coord::xyz(3.0, 4.0, 12.0)],
//! )
//! .unwrap();
//!
//! let bounds = line.bounds();
//! let bbox = bounds.extent().unwrap();
//! assert_eq!(bbox.z_range(), Some((10.0, 12.0)));
//! ```
//!
//! [`Variant`] together with [`GeometryKind`] and [`Dimension`] maps geometries to the identifiers used by the
//! binary (`meridian-wkb`) and textual (`meridian-wkt`) codecs.

/// Deserializes a geometry through its validating `new` constructor, so that serialized input cannot break the
/// dimension invariant.
macro_rules! deserialize_with_new {
    ($ty:ident, $raw:ident { $field:ident: $field_ty:ty }) => {
        #[derive(::serde::Deserialize)]
        struct $raw {
            dim: $crate::Dimension,
            $field: $field_ty,
        }

        impl TryFrom<$raw> for $ty {
            type Error = $crate::GeometryError;

            fn try_from(raw: $raw) -> Result<Self, Self::Error> {
                Self::new(raw.dim, raw.$field)
            }
        }
    };
}

pub mod bounds;
pub mod error;

mod coord;
pub use coord::*;

mod variant;
pub use variant::*;

mod geometry;
pub use geometry::*;

mod point;
pub use point::*;

mod line_string;
pub use line_string::*;

mod polygon;
pub use polygon::*;

mod multi_point;
pub use multi_point::*;

mod multi_line_string;
pub use multi_line_string::*;

mod multi_polygon;
pub use multi_polygon::*;

mod collection;
pub use collection::*;

pub use bounds::{BoundingBox, Bounds};
pub use error::GeometryError;

#[cfg(feature = "geo-types")]
mod geo_types;

#[cfg(feature = "geojson")]
mod geojson;

#[cfg(any(test, feature = "_tests"))]
pub mod fixtures;
