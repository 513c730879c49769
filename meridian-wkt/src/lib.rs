//! Reader and writer of the Well-Known Text (WKT) geometry format.
//!
//! A geometry is written as its keyword, an optional dimension tag (`Z`, `M` or `ZM`) and either `EMPTY` or a
//! parenthesized list of members:
//!
//! ```text
//! POINT Z (1 2 3)
//! POLYGON ((0 0, 10 0, 10 10, 0 0), (1 1, 2 1, 2 2, 1 1))
//! GEOMETRYCOLLECTION (POINT (1 2), LINESTRING EMPTY)
//! ```
//!
//! Members of a geometry collection that have no dimension tag take the dimension of the collection.
//!
//! ```
//! use meridian_types::{Coord, Geom, Point};
//! use meridian_wkt::{decode, encode};
//!
//! let geom = decode("point z (1 2 3)").unwrap();
//! assert_eq!(geom, Geom::from(Point::new(Coord::xyz(1.0, 2.0, 3.0))));
//! assert_eq!(encode(&geom).unwrap(), "POINT Z (1 2 3)");
//! ```

use meridian_types::Geom;

pub mod error;
mod parser;
mod token;
mod writer;

pub use error::WktError;
pub use parser::WktReader;
pub use token::Position;
pub use writer::WktWriter;

/// Writes the geometry as WKT with default writer settings.
pub fn encode(geom: &Geom) -> Result<String, WktError> {
    WktWriter::new().write(geom)
}

/// Parses a geometry from WKT with default reader settings.
pub fn decode(text: &str) -> Result<Geom, WktError> {
    WktReader::new().read(text)
}
