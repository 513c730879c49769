//! Reader and writer of the Well-Known Binary (WKB) geometry format.
//!
//! Every geometry starts with a byte order marker and a 4-byte type code. The type code is the base code of the
//! geometry kind (`1` for point through `7` for geometry collection) plus `1000` for Z, `2000` for M or `3000` for ZM
//! geometries. Counts are 4-byte unsigned integers and ordinates are 8-byte floats in `X, Y, [Z], [M]` order.
//! Polygon rings are written without their own header, while members of multi-geometries and collections are full
//! nested geometries.
//!
//! ```
//! use meridian_types::{Geom, Point};
//! use meridian_wkb::{decode, encode, ByteOrder};
//!
//! let point = Geom::from(Point::xy(1.0, 2.0));
//! let bytes = encode(&point, ByteOrder::LittleEndian).unwrap();
//! assert_eq!(bytes.len(), 21);
//! assert_eq!(decode(&bytes).unwrap(), point);
//! ```

use meridian_types::Geom;

pub mod error;
mod reader;
mod writer;

pub use error::WkbError;
pub use reader::WkbReader;
pub use writer::WkbWriter;

/// Byte order of the numbers in WKB.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first (XDR). Marker `0`.
    BigEndian,
    /// Least significant byte first (NDR). Marker `1`.
    #[default]
    LittleEndian,
}

impl ByteOrder {
    /// Value of the byte order marker.
    pub const fn marker(self) -> u8 {
        match self {
            Self::BigEndian => 0,
            Self::LittleEndian => 1,
        }
    }

    /// Byte order denoted by the marker.
    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            0 => Some(Self::BigEndian),
            1 => Some(Self::LittleEndian),
            _ => None,
        }
    }
}

/// Encodes the geometry with the given byte order.
///
/// The geometry is validated first, see [`WkbWriter`] to change the settings.
pub fn encode(geom: &Geom, byte_order: ByteOrder) -> Result<Vec<u8>, WkbError> {
    WkbWriter::new().with_byte_order(byte_order).write(geom)
}

/// Decodes a geometry with default reader settings.
pub fn decode(bytes: &[u8]) -> Result<Geom, WkbError> {
    WkbReader::new().read(bytes)
}

/// Encodes the geometry as a lowercase hex string of its WKB bytes.
pub fn encode_hex(geom: &Geom, byte_order: ByteOrder) -> Result<String, WkbError> {
    Ok(hex::encode(encode(geom, byte_order)?))
}

/// Decodes a geometry from a hex string of WKB bytes. Hex digits may be of either case.
pub fn decode_hex(text: &str) -> Result<Geom, WkbError> {
    let bytes = hex::decode(text).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => {
            WkbError::InvalidHex { offset: index }
        }
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            WkbError::InvalidHex { offset: text.len() }
        }
    })?;

    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use meridian_types::{fixtures, Dimension, Geometry, MultiPolygon, Point, Variant};

    #[test]
    fn round_trip_every_variant() {
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            for variant in Variant::all() {
                let geom = fixtures::sample(variant);
                let bytes = encode(&geom, order).expect("valid sample");
                assert_eq!(bytes[0], order.marker());
                assert_eq!(decode(&bytes), Ok(geom), "{variant} {order:?}");
            }
        }
    }

    #[test]
    fn round_trip_empty_geometries() {
        for dim in Dimension::ALL {
            for geom in fixtures::empty_samples(dim) {
                let bytes = encode(&geom, ByteOrder::BigEndian).expect("valid sample");
                let decoded = decode(&bytes).expect("valid bytes");
                assert!(decoded.is_empty());
                assert_eq!(decoded, geom);
            }
        }
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let values = [
            0.1,
            -0.0,
            f64::MIN_POSITIVE,
            f64::MAX,
            f64::EPSILON,
            1.0 / 3.0,
            f64::INFINITY,
        ];
        for x in values {
            let geom = Geom::from(Point::xy(x, -x));
            let decoded = decode(&encode(&geom, ByteOrder::LittleEndian).expect("valid point"))
                .expect("valid bytes");
            let Geom::Point(p) = decoded else {
                panic!("expected point, got {decoded:?}");
            };
            assert_eq!(p.x().to_bits(), x.to_bits());
            assert_eq!(p.y().to_bits(), (-x).to_bits());
        }
    }

    #[test]
    fn scenario_point_bytes() {
        let bytes = encode(&Point::xy(1.0, 2.0).into(), ByteOrder::LittleEndian).expect("valid point");
        insta::assert_snapshot!(hex::encode(&bytes), @"0101000000000000000000f03f0000000000000040");
        assert_eq!(decode(&bytes), Ok(Geom::from(Point::xy(1.0, 2.0))));
    }

    #[test]
    fn hex_round_trip() {
        let geom = fixtures::sample(Variant::all().nth(9).expect("28 variants"));
        let text = encode_hex(&geom, ByteOrder::LittleEndian).expect("valid sample");
        assert!(text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(decode_hex(&text), Ok(geom.clone()));
        assert_eq!(decode_hex(&text.to_uppercase()), Ok(geom));
    }

    #[test]
    fn decode_hex_point() {
        let geom = decode_hex("0101000000000000000000F03F0000000000000040").expect("valid hex");
        assert_eq!(geom, Geom::from(Point::xy(1.0, 2.0)));
        assert_matches!(decode_hex("01010"), Err(WkbError::InvalidHex { offset: 5 }));
    }

    #[test]
    fn invalid_hex_reports_byte_offset() {
        assert_eq!(decode_hex("0g"), Err(WkbError::InvalidHex { offset: 1 }));
        assert_eq!(decode_hex("01 1"), Err(WkbError::InvalidHex { offset: 2 }));
        assert_eq!(decode_hex("é"), Err(WkbError::InvalidHex { offset: 0 }));
        assert_eq!(decode_hex("01é"), Err(WkbError::InvalidHex { offset: 2 }));
        assert_matches!(decode_hex(""), Err(WkbError::TruncatedInput { offset: 0, .. }));
    }

    #[test]
    fn multipolygon_with_members_of_other_dimension() {
        let xy = encode(&fixtures::polygon(Dimension::Xy, 0.0).into(), ByteOrder::LittleEndian)
            .expect("valid polygon");
        let xyz = encode(&fixtures::polygon(Dimension::Xyz, 0.0).into(), ByteOrder::LittleEndian)
            .expect("valid polygon");

        let mut bytes = vec![1];
        bytes.extend(6u32.to_le_bytes());
        bytes.extend(2u32.to_le_bytes());
        bytes.extend(&xy);
        bytes.extend(&xyz);

        assert_eq!(
            decode(&bytes),
            Err(WkbError::DimensionalityMismatch {
                expected: Dimension::Xy,
                found: Dimension::Xyz,
                offset: 9 + xy.len(),
            })
        );

        bytes[1..5].copy_from_slice(&1006u32.to_le_bytes());
        assert_matches!(
            decode(&bytes),
            Err(WkbError::DimensionalityMismatch {
                expected: Dimension::Xyz,
                found: Dimension::Xy,
                offset: 9
            })
        );

        let valid = MultiPolygon::new(
            Dimension::Xyz,
            vec![fixtures::polygon(Dimension::Xyz, 0.0)],
        )
        .expect("same dimension");
        assert_eq!(
            decode(&encode(&valid.clone().into(), ByteOrder::BigEndian).expect("valid")),
            Ok(Geom::from(valid))
        );
    }

    #[test]
    fn bounds_survive_round_trip() {
        for geom in fixtures::all_samples() {
            let decoded = decode(&encode(&geom, ByteOrder::LittleEndian).expect("valid sample"))
                .expect("valid bytes");
            assert_eq!(decoded.bounds(), geom.bounds());
        }
    }
}
