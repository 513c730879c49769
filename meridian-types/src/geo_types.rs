//! Conversions between the crate geometries and [`geo_types`] geometries.
//!
//! `geo_types` only represents 2d coordinates, so only `XY` geometries can be converted into it. Conversion in the
//! other direction always produces `XY` geometries.

use crate::error::GeometryError;
use crate::{
    Coord, Dimension, Geom, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

fn to_coord(coord: &Coord) -> ::geo_types::Coord<f64> {
    ::geo_types::Coord {
        x: coord.x(),
        y: coord.y(),
    }
}

fn to_line_string<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> ::geo_types::LineString<f64> {
    ::geo_types::LineString(coords.into_iter().map(to_coord).collect())
}

fn to_polygon(polygon: &Polygon) -> ::geo_types::Polygon<f64> {
    let exterior = polygon
        .exterior()
        .map(|ring| to_line_string(ring.coords()))
        .unwrap_or_else(|| ::geo_types::LineString(vec![]));
    let interiors = polygon
        .interiors()
        .iter()
        .map(|ring| to_line_string(ring.coords()))
        .collect();

    ::geo_types::Polygon::new(exterior, interiors)
}

impl TryFrom<&Geom> for ::geo_types::Geometry<f64> {
    type Error = GeometryError;

    fn try_from(value: &Geom) -> Result<Self, Self::Error> {
        if value.dimension() != Dimension::Xy {
            return Err(GeometryError::UnsupportedVariant(format!(
                "{} cannot be converted to geo-types",
                value.variant()
            )));
        }

        let converted: Self = match value {
            Geom::Point(p) => ::geo_types::Point(to_coord(p.coord())).into(),
            Geom::LineString(line) => to_line_string(line.coords()).into(),
            Geom::Polygon(polygon) => to_polygon(polygon).into(),
            Geom::MultiPoint(mp) => ::geo_types::MultiPoint(
                mp.points()
                    .iter()
                    .map(|p| ::geo_types::Point(to_coord(p.coord())))
                    .collect(),
            )
            .into(),
            Geom::MultiLineString(mls) => ::geo_types::MultiLineString(
                mls.line_strings()
                    .iter()
                    .map(|line| to_line_string(line.coords()))
                    .collect(),
            )
            .into(),
            Geom::MultiPolygon(mp) => {
                ::geo_types::MultiPolygon(mp.polygons().iter().map(to_polygon).collect()).into()
            }
            Geom::GeometryCollection(collection) => {
                Self::GeometryCollection(::geo_types::GeometryCollection(
                    collection
                        .geometries()
                        .iter()
                        .map(Self::try_from)
                        .collect::<Result<_, _>>()?,
                ))
            }
        };

        Ok(converted)
    }
}

fn from_line_string(line: &::geo_types::LineString<f64>) -> Vec<Coord> {
    line.0.iter().map(|c| Coord::xy(c.x, c.y)).collect()
}

fn from_polygon(polygon: &::geo_types::Polygon<f64>) -> Result<Polygon, GeometryError> {
    if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() {
        return Ok(Polygon::empty(Dimension::Xy));
    }

    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| LinearRing::new(Dimension::Xy, from_line_string(ring)))
        .collect::<Result<_, _>>()?;
    Polygon::new(Dimension::Xy, rings)
}

impl TryFrom<&::geo_types::Geometry<f64>> for Geom {
    type Error = GeometryError;

    fn try_from(value: &::geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        use ::geo_types::Geometry as G;

        let dim = Dimension::Xy;
        let converted: Self = match value {
            G::Point(p) => Point::xy(p.x(), p.y()).into(),
            G::Line(line) => LineString::new(
                dim,
                vec![
                    Coord::xy(line.start.x, line.start.y),
                    Coord::xy(line.end.x, line.end.y),
                ],
            )?
            .into(),
            G::LineString(line) => LineString::new(dim, from_line_string(line))?.into(),
            G::Polygon(polygon) => from_polygon(polygon)?.into(),
            G::MultiPoint(mp) => {
                MultiPoint::new(dim, mp.0.iter().map(|p| Point::xy(p.x(), p.y())).collect())?
                    .into()
            }
            G::MultiLineString(mls) => MultiLineString::new(
                dim,
                mls.0
                    .iter()
                    .map(|line| LineString::new(dim, from_line_string(line)))
                    .collect::<Result<_, _>>()?,
            )?
            .into(),
            G::MultiPolygon(mp) => MultiPolygon::new(
                dim,
                mp.0.iter().map(from_polygon).collect::<Result<_, _>>()?,
            )?
            .into(),
            G::GeometryCollection(collection) => GeometryCollection::new(
                dim,
                collection
                    .0
                    .iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            )?
            .into(),
            G::Rect(rect) => from_polygon(&rect.to_polygon())?.into(),
            G::Triangle(triangle) => from_polygon(&triangle.to_polygon())?.into(),
        };

        Ok(converted)
    }
}

impl TryFrom<::geo_types::Geometry<f64>> for Geom {
    type Error = GeometryError;

    fn try_from(value: ::geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}
