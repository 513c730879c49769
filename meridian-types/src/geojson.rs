//! Conversions between the crate geometries and [`geojson`] geometry values.
//!
//! GeoJSON positions carry X, Y and optionally elevation, so only `XY` and `XYZ` geometries can be represented.
//! Geometries with measure values are rejected with [`GeometryError::UnsupportedVariant`].

use ::geojson::{PolygonType, Position, Value};

use crate::error::GeometryError;
use crate::{
    Coord, Dimension, Geom, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

fn to_position(coord: &Coord) -> Position {
    match coord.z() {
        Some(z) => vec![coord.x(), coord.y(), z],
        None => vec![coord.x(), coord.y()],
    }
}

fn to_positions(coords: &[Coord]) -> Vec<Position> {
    coords.iter().map(to_position).collect()
}

fn to_polygon_type(polygon: &Polygon) -> PolygonType {
    polygon
        .rings()
        .iter()
        .map(|ring| to_positions(ring.coords()))
        .collect()
}

impl TryFrom<&Geom> for Value {
    type Error = GeometryError;

    fn try_from(value: &Geom) -> Result<Self, Self::Error> {
        if value.dimension().has_m() {
            return Err(GeometryError::UnsupportedVariant(format!(
                "{} cannot be represented in GeoJSON",
                value.variant()
            )));
        }

        let converted = match value {
            Geom::Point(p) => Value::Point(to_position(p.coord())),
            Geom::LineString(line) => Value::LineString(to_positions(line.coords())),
            Geom::Polygon(polygon) => Value::Polygon(to_polygon_type(polygon)),
            Geom::MultiPoint(mp) => {
                Value::MultiPoint(mp.points().iter().map(|p| to_position(p.coord())).collect())
            }
            Geom::MultiLineString(mls) => Value::MultiLineString(
                mls.line_strings()
                    .iter()
                    .map(|line| to_positions(line.coords()))
                    .collect(),
            ),
            Geom::MultiPolygon(mp) => {
                Value::MultiPolygon(mp.polygons().iter().map(to_polygon_type).collect())
            }
            Geom::GeometryCollection(collection) => Value::GeometryCollection(
                collection
                    .geometries()
                    .iter()
                    .map(|geom| Value::try_from(geom).map(::geojson::Geometry::new))
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(converted)
    }
}

fn from_position(position: &Position) -> Result<Coord, GeometryError> {
    match position.as_slice() {
        &[x, y] => Ok(Coord::xy(x, y)),
        &[x, y, z] => Ok(Coord::xyz(x, y, z)),
        other => Err(GeometryError::InvalidGeometry(format!(
            "GeoJSON position must have 2 or 3 values, got {}",
            other.len()
        ))),
    }
}

fn from_positions(positions: &[Position]) -> Result<Vec<Coord>, GeometryError> {
    positions.iter().map(from_position).collect()
}

/// Dimension of the first element, or `XY` if there are no elements.
fn leading_dimension<T>(items: &[T], dim: impl Fn(&T) -> Dimension) -> Dimension {
    items.first().map(dim).unwrap_or_default()
}

fn from_polygon_type(polygon: &PolygonType) -> Result<Polygon, GeometryError> {
    let rings = polygon
        .iter()
        .map(|ring| {
            let coords = from_positions(ring)?;
            LinearRing::new(leading_dimension(&coords, Coord::dimension), coords)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Polygon::new(leading_dimension(&rings, LinearRing::dimension), rings)
}

impl TryFrom<&Value> for Geom {
    type Error = GeometryError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let converted: Geom = match value {
            Value::Point(position) => Point::new(from_position(position)?).into(),
            Value::MultiPoint(positions) => {
                let points: Vec<Point> = from_positions(positions)?
                    .into_iter()
                    .map(Point::new)
                    .collect();
                MultiPoint::new(leading_dimension(&points, Point::dimension), points)?.into()
            }
            Value::LineString(positions) => {
                let coords = from_positions(positions)?;
                LineString::new(leading_dimension(&coords, Coord::dimension), coords)?.into()
            }
            Value::MultiLineString(lines) => {
                let lines = lines
                    .iter()
                    .map(|positions| {
                        let coords = from_positions(positions)?;
                        LineString::new(leading_dimension(&coords, Coord::dimension), coords)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                MultiLineString::new(leading_dimension(&lines, LineString::dimension), lines)?
                    .into()
            }
            Value::Polygon(polygon) => from_polygon_type(polygon)?.into(),
            Value::MultiPolygon(polygons) => {
                let polygons = polygons
                    .iter()
                    .map(from_polygon_type)
                    .collect::<Result<Vec<_>, _>>()?;
                MultiPolygon::new(leading_dimension(&polygons, Polygon::dimension), polygons)?
                    .into()
            }
            Value::GeometryCollection(geometries) => {
                let geometries = geometries
                    .iter()
                    .map(|geometry| Geom::try_from(&geometry.value))
                    .collect::<Result<Vec<_>, _>>()?;
                GeometryCollection::new(leading_dimension(&geometries, Geom::dimension), geometries)?
                    .into()
            }
        };

        Ok(converted)
    }
}

impl TryFrom<&::geojson::Geometry> for Geom {
    type Error = GeometryError;

    fn try_from(value: &::geojson::Geometry) -> Result<Self, Self::Error> {
        Self::try_from(&value.value)
    }
}
