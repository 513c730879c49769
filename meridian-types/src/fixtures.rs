//! Sample geometries of every variant, shared by the codec crates' tests.

#![allow(clippy::unwrap_used, missing_docs)]

use crate::{
    Coord, Dimension, Geom, GeometryCollection, GeometryKind, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Variant,
};

/// Coordinate of the given dimension. Ordinates are derived from `x` and `y` so that every axis has distinct,
/// non-trivial values.
pub fn coord(dim: Dimension, x: f64, y: f64) -> Coord {
    let z = x * 0.5 + y / 3.0;
    let m = x - y * 1.25 + 1e-7;
    Coord::new(
        x,
        y,
        dim.has_z().then_some(z),
        dim.has_m().then_some(m),
    )
}

pub fn point(dim: Dimension, x: f64, y: f64) -> Point {
    Point::new(coord(dim, x, y))
}

pub fn line_string(dim: Dimension, offset: f64) -> LineString {
    let coords = [(0.1, 0.2), (10.5, -3.25), (offset, offset * 2.0)]
        .into_iter()
        .map(|(x, y)| coord(dim, x + offset, y))
        .collect();
    LineString::new(dim, coords).unwrap()
}

pub fn ring(dim: Dimension, x0: f64, y0: f64, size: f64) -> LinearRing {
    let coords = [
        (x0, y0),
        (x0 + size, y0),
        (x0 + size, y0 + size),
        (x0, y0 + size),
        (x0, y0),
    ]
    .into_iter()
    .map(|(x, y)| coord(dim, x, y))
    .collect();
    LinearRing::new(dim, coords).unwrap()
}

/// Polygon with one hole.
pub fn polygon(dim: Dimension, offset: f64) -> Polygon {
    Polygon::new(
        dim,
        vec![
            ring(dim, offset, offset, 10.0),
            ring(dim, offset + 2.0, offset + 2.0, 1.5),
        ],
    )
    .unwrap()
}

pub fn multi_point(dim: Dimension) -> MultiPoint {
    MultiPoint::new(
        dim,
        vec![
            point(dim, 1.0, 2.0),
            point(dim, -3.5, 1e10),
            point(dim, 0.1, -0.3),
        ],
    )
    .unwrap()
}

pub fn multi_line_string(dim: Dimension) -> MultiLineString {
    MultiLineString::new(
        dim,
        vec![line_string(dim, 0.0), line_string(dim, -7.75)],
    )
    .unwrap()
}

pub fn multi_polygon(dim: Dimension) -> MultiPolygon {
    MultiPolygon::new(
        dim,
        vec![
            polygon(dim, 0.0),
            Polygon::new(dim, vec![ring(dim, 100.0, -50.0, 0.25)]).unwrap(),
        ],
    )
    .unwrap()
}

/// Collection with members of several kinds, a nested collection and an empty member.
pub fn collection(dim: Dimension) -> GeometryCollection {
    let nested = GeometryCollection::new(
        dim,
        vec![
            point(dim, 5.0, 5.0).into(),
            GeometryCollection::empty(dim).into(),
        ],
    )
    .unwrap();

    GeometryCollection::new(
        dim,
        vec![
            point(dim, 1.0, 1.0).into(),
            line_string(dim, 3.0).into(),
            polygon(dim, -20.0).into(),
            multi_point(dim).into(),
            LineString::empty(dim).into(),
            nested.into(),
        ],
    )
    .unwrap()
}

/// Non-empty sample geometry of the given variant.
pub fn sample(variant: Variant) -> Geom {
    let dim = variant.dim;
    match variant.kind {
        GeometryKind::Point => point(dim, 1.5, -2.25).into(),
        GeometryKind::LineString => line_string(dim, 1.0).into(),
        GeometryKind::Polygon => polygon(dim, 0.0).into(),
        GeometryKind::MultiPoint => multi_point(dim).into(),
        GeometryKind::MultiLineString => multi_line_string(dim).into(),
        GeometryKind::MultiPolygon => multi_polygon(dim).into(),
        GeometryKind::GeometryCollection => collection(dim).into(),
    }
}

/// Empty geometries of every kind that can be empty.
pub fn empty_samples(dim: Dimension) -> Vec<Geom> {
    vec![
        LineString::empty(dim).into(),
        Polygon::empty(dim).into(),
        MultiPoint::empty(dim).into(),
        MultiLineString::empty(dim).into(),
        MultiPolygon::empty(dim).into(),
        GeometryCollection::empty(dim).into(),
    ]
}

/// One sample for each of the 28 variants.
pub fn all_samples() -> Vec<Geom> {
    Variant::all().map(sample).collect()
}

/// `XY` line string holding `XYZ` coordinates. Constructors reject it, so it only appears through code that skips
/// them.
pub fn line_string_with_foreign_coords() -> LineString {
    LineString::new_unchecked(
        Dimension::Xy,
        vec![Coord::xyz(0.0, 0.0, 7.0), Coord::xyz(1.0, 1.0, 7.0)],
    )
}

/// `XY` collection whose only member is an empty `XYZ` line string. Every coordinate matches the collection, but
/// the member header declares another dimension.
pub fn collection_with_foreign_member() -> GeometryCollection {
    GeometryCollection::new_unchecked(Dimension::Xy, vec![LineString::empty(Dimension::Xyz).into()])
}
