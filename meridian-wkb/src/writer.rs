use bytes::{BufMut, BytesMut};
use meridian_types::{
    Coord, Geom, Geometry, GeometryError, LineString, LinearRing, Point, Polygon, Variant,
};

use crate::error::WkbError;
use crate::ByteOrder;

/// WKB encoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WkbWriter {
    byte_order: ByteOrder,
    validate: bool,
}

impl Default for WkbWriter {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::LittleEndian,
            validate: true,
        }
    }
}

impl WkbWriter {
    /// Creates a writer with default settings: little endian output, geometries are validated before encoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets byte order of the output. Nested geometries use the same byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// If set (default), the geometry is checked with [`Geometry::validate`] before encoding.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Encodes the geometry.
    pub fn write(&self, geom: &Geom) -> Result<Vec<u8>, WkbError> {
        if self.validate {
            geom.validate()?;
        }

        let mut encoder = Encoder {
            buf: BytesMut::with_capacity(encoded_size(geom)),
            order: self.byte_order,
        };
        encoder.write_geometry(geom)?;

        Ok(encoder.buf.to_vec())
    }
}

/// Number of bytes the geometry takes in WKB.
fn encoded_size(geom: &Geom) -> usize {
    let coord_size = geom.dimension().ordinate_count() * 8;
    let payload = match geom {
        Geom::Point(_) => coord_size,
        Geom::LineString(line) => 4 + line.coords().len() * coord_size,
        Geom::Polygon(polygon) => polygon_size(polygon, coord_size),
        Geom::MultiPoint(mp) => 4 + mp.points().len() * (5 + coord_size),
        Geom::MultiLineString(mls) => {
            4 + mls
                .line_strings()
                .iter()
                .map(|line| 9 + line.coords().len() * coord_size)
                .sum::<usize>()
        }
        Geom::MultiPolygon(mp) => {
            4 + mp
                .polygons()
                .iter()
                .map(|polygon| 5 + polygon_size(polygon, coord_size))
                .sum::<usize>()
        }
        Geom::GeometryCollection(collection) => {
            4 + collection
                .geometries()
                .iter()
                .map(encoded_size)
                .sum::<usize>()
        }
    };

    5 + payload
}

fn polygon_size(polygon: &Polygon, coord_size: usize) -> usize {
    4 + polygon
        .rings()
        .iter()
        .map(|ring| 4 + ring.len() * coord_size)
        .sum::<usize>()
}

struct Encoder {
    buf: BytesMut,
    order: ByteOrder,
}

impl Encoder {
    fn put_u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::BigEndian => self.buf.put_u32(value),
            ByteOrder::LittleEndian => self.buf.put_u32_le(value),
        }
    }

    fn put_f64(&mut self, value: f64) {
        match self.order {
            ByteOrder::BigEndian => self.buf.put_f64(value),
            ByteOrder::LittleEndian => self.buf.put_f64_le(value),
        }
    }

    fn put_count(&mut self, count: usize) -> Result<(), WkbError> {
        let count = u32::try_from(count).map_err(|_| {
            GeometryError::InvalidGeometry(format!("{count} elements cannot be encoded in WKB"))
        })?;
        self.put_u32(count);
        Ok(())
    }

    fn write_header(&mut self, variant: Variant) {
        self.buf.put_u8(self.order.marker());
        self.put_u32(variant.wkb_code());
    }

    fn write_coord(&mut self, coord: &Coord) {
        for ordinate in coord.ordinates() {
            self.put_f64(ordinate);
        }
    }

    fn write_coords(&mut self, coords: &[Coord]) -> Result<(), WkbError> {
        self.put_count(coords.len())?;
        for coord in coords {
            self.write_coord(coord);
        }

        Ok(())
    }

    fn write_rings(&mut self, rings: &[LinearRing]) -> Result<(), WkbError> {
        self.put_count(rings.len())?;
        for ring in rings {
            self.write_coords(ring.coords())?;
        }

        Ok(())
    }

    fn write_point(&mut self, point: &Point) {
        self.write_header(point.variant());
        self.write_coord(point.coord());
    }

    fn write_line_string(&mut self, line: &LineString) -> Result<(), WkbError> {
        self.write_header(line.variant());
        self.write_coords(line.coords())
    }

    fn write_polygon(&mut self, polygon: &Polygon) -> Result<(), WkbError> {
        self.write_header(polygon.variant());
        self.write_rings(polygon.rings())
    }

    fn write_geometry(&mut self, geom: &Geom) -> Result<(), WkbError> {
        match geom {
            Geom::Point(p) => self.write_point(p),
            Geom::LineString(line) => self.write_line_string(line)?,
            Geom::Polygon(polygon) => self.write_polygon(polygon)?,
            Geom::MultiPoint(mp) => {
                self.write_header(mp.variant());
                self.put_count(mp.points().len())?;
                for p in mp.points() {
                    self.write_point(p);
                }
            }
            Geom::MultiLineString(mls) => {
                self.write_header(mls.variant());
                self.put_count(mls.line_strings().len())?;
                for line in mls.line_strings() {
                    self.write_line_string(line)?;
                }
            }
            Geom::MultiPolygon(mp) => {
                self.write_header(mp.variant());
                self.put_count(mp.polygons().len())?;
                for polygon in mp.polygons() {
                    self.write_polygon(polygon)?;
                }
            }
            Geom::GeometryCollection(collection) => {
                self.write_header(collection.variant());
                self.put_count(collection.geometries().len())?;
                for member in collection.geometries() {
                    self.write_geometry(member)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use meridian_types::{fixtures, Dimension, MultiPoint};

    #[test]
    fn point_little_endian() {
        let bytes = WkbWriter::new()
            .write(&Point::xy(1.0, 2.0).into())
            .expect("valid point");

        let mut expected = vec![0x01, 0x01, 0x00, 0x00, 0x00];
        expected.extend(1.0f64.to_le_bytes());
        expected.extend(2.0f64.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn point_z_big_endian() {
        let bytes = WkbWriter::new()
            .with_byte_order(ByteOrder::BigEndian)
            .write(&Point::new(Coord::xyz(1.0, 2.0, 3.0)).into())
            .expect("valid point");

        assert_eq!(&bytes[..5], &[0x00, 0x00, 0x00, 0x03, 0xe9]);
        assert_eq!(&bytes[5..13], &1.0f64.to_be_bytes());
        assert_eq!(bytes.len(), 5 + 24);
    }

    #[test]
    fn members_restate_header() {
        let geom = Geom::from(MultiPoint::from(vec![[1.0, 2.0], [3.0, 4.0]]));
        let bytes = WkbWriter::new().write(&geom).expect("valid multipoint");

        assert_eq!(bytes.len(), 9 + 2 * 21);
        assert_eq!(&bytes[9..14], &[0x01, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[30..35], &[0x01, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn polygon_rings_have_no_header() {
        let polygon = Polygon::from(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
        let bytes = WkbWriter::new().write(&polygon.into()).expect("valid polygon");

        // header, ring count, point count, 4 points
        assert_eq!(bytes.len(), 5 + 4 + 4 + 4 * 16);
        assert_eq!(&bytes[5..13], &[1, 0, 0, 0, 4, 0, 0, 0]);
    }

    #[test]
    fn invalid_ring_is_rejected() {
        let polygon = Geom::from(Polygon::from(vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]));
        assert_matches!(
            WkbWriter::new().write(&polygon),
            Err(WkbError::InvalidGeometry(GeometryError::InvalidGeometry(_)))
        );

        let bytes = WkbWriter::new()
            .with_validation(false)
            .write(&polygon)
            .expect("validation is disabled");
        assert_eq!(bytes.len(), 5 + 4 + 4 + 3 * 16);
    }

    #[test]
    fn inconsistent_dimensions_are_rejected() {
        let line = Geom::from(fixtures::line_string_with_foreign_coords());
        assert_matches!(
            WkbWriter::new().write(&line),
            Err(WkbError::InvalidGeometry(GeometryError::DimensionalityMismatch {
                expected: Dimension::Xy,
                found: Dimension::Xyz
            }))
        );

        let collection = Geom::from(fixtures::collection_with_foreign_member());
        assert_matches!(
            WkbWriter::new().write(&collection),
            Err(WkbError::InvalidGeometry(GeometryError::DimensionalityMismatch {
                expected: Dimension::Xy,
                found: Dimension::Xyz
            }))
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
        let bytes = WkbWriter::new().write(&geom).expect("valid line");
        assert_eq!(crate::decode(&bytes), Ok(geom));
    }

    #[test]
    fn capacity_estimate_is_exact() {
        for geom in fixtures::all_samples() {
            let bytes = WkbWriter::new().write(&geom).expect("valid sample");
            assert_eq!(bytes.len(), encoded_size(&geom), "{}", geom.variant());
        }

        for geom in fixtures::empty_samples(Dimension::Xyzm) {
            let bytes = WkbWriter::new().write(&geom).expect("valid sample");
            assert_eq!(bytes.len(), 9);
        }
    }
}
