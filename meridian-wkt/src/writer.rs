use std::fmt::{Display, Formatter, Result as FmtResult};

use meridian_types::{Coord, Geom, Geometry, LinearRing, Point, Polygon};

use crate::error::WktError;

/// WKT encoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WktWriter {
    precision: Option<usize>,
    validate: bool,
}

impl Default for WktWriter {
    fn default() -> Self {
        Self {
            precision: None,
            validate: true,
        }
    }
}

impl WktWriter {
    /// Creates a writer with default settings: numbers are written in the shortest form that parses back to the
    /// same value, geometries are validated before writing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes numbers with a fixed number of decimal places. The output is no longer guaranteed to parse back to
    /// the same values.
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    /// If set (default), the geometry is checked with [`Geometry::validate`] before writing.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Writes the geometry as WKT.
    pub fn write(&self, geom: &Geom) -> Result<String, WktError> {
        if self.validate {
            geom.validate()?;
        }

        Ok(Wkt { writer: self, geom }.to_string())
    }

    fn write_geometry(&self, f: &mut Formatter<'_>, geom: &Geom) -> FmtResult {
        let variant = geom.variant();
        f.write_str(variant.kind.wkt_keyword())?;
        let tag = variant.dim.wkt_tag();
        if !tag.is_empty() {
            write!(f, " {tag}")?;
        }

        if has_no_parts(geom) {
            return f.write_str(" EMPTY");
        }

        f.write_str(" ")?;
        match geom {
            Geom::Point(p) => self.write_point(f, p),
            Geom::LineString(line) => self.write_coords(f, line.coords()),
            Geom::Polygon(polygon) => self.write_polygon(f, polygon),
            Geom::MultiPoint(mp) => self.write_list(f, mp.points(), Self::write_point),
            Geom::MultiLineString(mls) => self.write_list(f, mls.line_strings(), |w, f, line| {
                w.write_coords_or_empty(f, line.coords())
            }),
            Geom::MultiPolygon(mp) => self.write_list(f, mp.polygons(), |w, f, polygon| {
                if polygon.rings().is_empty() {
                    f.write_str("EMPTY")
                } else {
                    w.write_polygon(f, polygon)
                }
            }),
            Geom::GeometryCollection(collection) => {
                self.write_list(f, collection.geometries(), Self::write_geometry)
            }
        }
    }

    fn write_list<T>(
        &self,
        f: &mut Formatter<'_>,
        items: &[T],
        write_item: impl Fn(&Self, &mut Formatter<'_>, &T) -> FmtResult,
    ) -> FmtResult {
        f.write_str("(")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_item(self, f, item)?;
        }
        f.write_str(")")
    }

    fn write_number(&self, f: &mut Formatter<'_>, value: f64) -> FmtResult {
        match self.precision {
            Some(precision) => write!(f, "{value:.precision$}"),
            None => write!(f, "{value}"),
        }
    }

    fn write_coord(&self, f: &mut Formatter<'_>, coord: &Coord) -> FmtResult {
        for (i, ordinate) in coord.ordinates().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            self.write_number(f, ordinate)?;
        }

        Ok(())
    }

    fn write_point(&self, f: &mut Formatter<'_>, point: &Point) -> FmtResult {
        f.write_str("(")?;
        self.write_coord(f, point.coord())?;
        f.write_str(")")
    }

    fn write_coords(&self, f: &mut Formatter<'_>, coords: &[Coord]) -> FmtResult {
        self.write_list(f, coords, Self::write_coord)
    }

    fn write_coords_or_empty(&self, f: &mut Formatter<'_>, coords: &[Coord]) -> FmtResult {
        if coords.is_empty() {
            f.write_str("EMPTY")
        } else {
            self.write_coords(f, coords)
        }
    }

    fn write_polygon(&self, f: &mut Formatter<'_>, polygon: &Polygon) -> FmtResult {
        self.write_list(f, polygon.rings(), |w, f, ring: &LinearRing| {
            w.write_coords_or_empty(f, ring.coords())
        })
    }
}

/// Geometry formatted with the writer settings.
struct Wkt<'a> {
    writer: &'a WktWriter,
    geom: &'a Geom,
}

impl Display for Wkt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.writer.write_geometry(f, self.geom)
    }
}

/// Returns true for geometries written as `EMPTY`. Unlike [`Geometry::is_empty`], this is false for a
/// multi-geometry or collection that has members, even if the members themselves are empty.
fn has_no_parts(geom: &Geom) -> bool {
    match geom {
        Geom::Point(_) => false,
        Geom::LineString(line) => line.coords().is_empty(),
        Geom::Polygon(polygon) => polygon.rings().is_empty(),
        Geom::MultiPoint(mp) => mp.points().is_empty(),
        Geom::MultiLineString(mls) => mls.line_strings().is_empty(),
        Geom::MultiPolygon(mp) => mp.polygons().is_empty(),
        Geom::GeometryCollection(collection) => collection.geometries().is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use meridian_types::{
        fixtures, Dimension, GeometryCollection, GeometryError, LineString, MultiLineString,
        MultiPoint, MultiPolygon,
    };

    fn write(geom: impl Into<Geom>) -> String {
        WktWriter::new().write(&geom.into()).expect("valid geometry")
    }

    #[test]
    fn point() {
        insta::assert_snapshot!(write(Point::xy(1.0, 2.0)), @"POINT (1 2)");
        insta::assert_snapshot!(write(Point::new(Coord::xyz(1.0, 2.0, 3.0))), @"POINT Z (1 2 3)");
        insta::assert_snapshot!(write(Point::new(Coord::xym(1.5, -2.0, 0.1))), @"POINT M (1.5 -2 0.1)");
        insta::assert_snapshot!(
            write(Point::new(Coord::xyzm(1.0, 2.0, 3.0, 4.0))),
            @"POINT ZM (1 2 3 4)"
        );
    }

    #[test]
    fn line_string() {
        insta::assert_snapshot!(
            write(LineString::from(vec![[0.0, 0.0], [1.0, 1.0]])),
            @"LINESTRING (0 0, 1 1)"
        );
        insta::assert_snapshot!(write(LineString::empty(Dimension::Xy)), @"LINESTRING EMPTY");
        insta::assert_snapshot!(write(LineString::empty(Dimension::Xyzm)), @"LINESTRING ZM EMPTY");
    }

    #[test]
    fn polygon_with_hole() {
        let polygon = Polygon::from(vec![
            vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]],
            vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]],
        ]);
        insta::assert_snapshot!(
            write(polygon),
            @"POLYGON ((0 0, 10 0, 10 10, 0 0), (1 1, 2 1, 2 2, 1 1))"
        );
    }

    #[test]
    fn multi_geometries() {
        insta::assert_snapshot!(
            write(MultiPoint::from(vec![[1.0, 2.0], [3.0, 4.0]])),
            @"MULTIPOINT ((1 2), (3 4))"
        );
        insta::assert_snapshot!(
            write(MultiLineString::from(vec![vec![[0.0, 0.0], [1.0, 1.0]], vec![]])),
            @"MULTILINESTRING ((0 0, 1 1), EMPTY)"
        );
        insta::assert_snapshot!(
            write(MultiPolygon::new(Dimension::Xy, vec![Polygon::empty(Dimension::Xy)]).expect("same dimension")),
            @"MULTIPOLYGON (EMPTY)"
        );
    }

    #[test]
    fn collection() {
        let collection = GeometryCollection::new(
            Dimension::Xyz,
            vec![
                Point::new(Coord::xyz(1.0, 2.0, 3.0)).into(),
                LineString::empty(Dimension::Xyz).into(),
                GeometryCollection::empty(Dimension::Xyz).into(),
            ],
        )
        .expect("same dimension");
        insta::assert_snapshot!(
            write(collection),
            @"GEOMETRYCOLLECTION Z (POINT Z (1 2 3), LINESTRING Z EMPTY, GEOMETRYCOLLECTION Z EMPTY)"
        );

        let only_empty_members = GeometryCollection::new(
            Dimension::Xy,
            vec![LineString::empty(Dimension::Xy).into()],
        )
        .expect("same dimension");
        insta::assert_snapshot!(
            write(only_empty_members),
            @"GEOMETRYCOLLECTION (LINESTRING EMPTY)"
        );
    }

    #[test]
    fn precision() {
        let writer = WktWriter::new().with_precision(Some(2));
        let wkt = writer
            .write(&Point::xy(1.0 / 3.0, 2.0).into())
            .expect("valid point");
        insta::assert_snapshot!(wkt, @"POINT (0.33 2.00)");
    }

    #[test]
    fn inconsistent_dimensions_are_rejected() {
        let line = Geom::from(fixtures::line_string_with_foreign_coords());
        assert_matches!(
            WktWriter::new().write(&line),
            Err(WktError::InvalidGeometry(GeometryError::DimensionalityMismatch {
                expected: Dimension::Xy,
                found: Dimension::Xyz
            }))
        );

        let collection = Geom::from(fixtures::collection_with_foreign_member());
        assert_matches!(
            WktWriter::new().write(&collection),
            Err(WktError::InvalidGeometry(GeometryError::DimensionalityMismatch { .. }))
        );
    }

    #[test]
    fn deserialized_geometry_cannot_declare_other_dimension() {
        let json = r#"{"LineString":{"dim":"Xy","coords":[
            {"x":0.0,"y":0.0,"z":7.0,"m":null},
            {"x":1.0,"y":1.0,"z":7.0,"m":null}
        ]}}"#;
        assert!(serde_json::from_str::<Geom>(json).is_err());

        let valid = json.replace("\"Xy\"", "\"Xyz\"");
        let geom: Geom = serde_json::from_str(&valid).expect("consistent dimensions");
        insta::assert_snapshot!(
            WktWriter::new().write(&geom).expect("valid line"),
            @"LINESTRING Z (0 0 7, 1 1 7)"
        );
    }

    #[test]
    fn invalid_polygon() {
        let polygon = Geom::from(Polygon::from(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]));
        assert_matches!(
            WktWriter::new().write(&polygon),
            Err(WktError::InvalidGeometry(GeometryError::InvalidGeometry(_)))
        );

        let wkt = WktWriter::new()
            .with_validation(false)
            .write(&polygon)
            .expect("validation is disabled");
        insta::assert_snapshot!(wkt, @"POLYGON ((0 0, 1 0, 1 1))");
    }
}
