use bytes::Buf;
use meridian_types::{
    Coord, Dimension, Geom, GeometryCollection, GeometryKind, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Variant,
};

use crate::error::WkbError;
use crate::ByteOrder;

/// Size of the byte order marker and the type code.
const HEADER_SIZE: usize = 5;
const COUNT_SIZE: usize = 4;
const ORDINATE_SIZE: usize = 8;

/// WKB decoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WkbReader {
    max_depth: usize,
    allow_trailing_bytes: bool,
}

impl Default for WkbReader {
    fn default() -> Self {
        Self {
            max_depth: 64,
            allow_trailing_bytes: false,
        }
    }
}

impl WkbReader {
    /// Creates a reader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many levels of nested geometries (multi-geometry members, collection members) are accepted. The
    /// top-level geometry is level 0.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// If set, bytes after the end of the geometry are ignored instead of failing the decoding.
    pub fn with_allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }

    /// Decodes a geometry from WKB bytes.
    pub fn read(&self, bytes: &[u8]) -> Result<Geom, WkbError> {
        self.read_inner(bytes).map_err(|err| {
            log::debug!("Rejected WKB input of {} bytes: {err}", bytes.len());
            err
        })
    }

    fn read_inner(&self, bytes: &[u8]) -> Result<Geom, WkbError> {
        let mut decoder = Decoder {
            input_len: bytes.len(),
            buf: bytes,
            max_depth: self.max_depth,
        };

        let header = decoder.read_header(0)?;
        let geom = decoder.read_payload(&header, 0)?;

        if decoder.buf.has_remaining() {
            let offset = decoder.offset();
            if !self.allow_trailing_bytes {
                return Err(WkbError::TrailingBytes { offset });
            }

            log::warn!(
                "Ignoring {} trailing bytes after WKB geometry at offset {offset}",
                decoder.buf.remaining()
            );
        }

        Ok(geom)
    }
}

struct Header {
    order: ByteOrder,
    variant: Variant,
    offset: usize,
}

struct Decoder<'a> {
    input_len: usize,
    buf: &'a [u8],
    max_depth: usize,
}

impl Decoder<'_> {
    fn offset(&self) -> usize {
        self.input_len - self.buf.remaining()
    }

    fn ensure(&self, offset: usize, needed: usize) -> Result<(), WkbError> {
        let available = self.buf.remaining();
        if available < needed {
            return Err(WkbError::TruncatedInput {
                offset,
                needed,
                available,
            });
        }

        Ok(())
    }

    fn read_u32(&mut self, order: ByteOrder) -> Result<u32, WkbError> {
        self.ensure(self.offset(), COUNT_SIZE)?;
        Ok(match order {
            ByteOrder::BigEndian => self.buf.get_u32(),
            ByteOrder::LittleEndian => self.buf.get_u32_le(),
        })
    }

    fn read_f64(&mut self, order: ByteOrder) -> f64 {
        match order {
            ByteOrder::BigEndian => self.buf.get_f64(),
            ByteOrder::LittleEndian => self.buf.get_f64_le(),
        }
    }

    /// Reads a count and limits it by the number of elements of at least `min_size` bytes that the rest of the input
    /// can hold. The result is only used as a capacity hint.
    fn read_count(&mut self, order: ByteOrder, min_size: usize) -> Result<(usize, usize), WkbError> {
        let count = self.read_u32(order)? as usize;
        let capacity = count.min(self.buf.remaining() / min_size);
        Ok((count, capacity))
    }

    fn read_header(&mut self, depth: usize) -> Result<Header, WkbError> {
        let offset = self.offset();
        if depth > self.max_depth {
            return Err(WkbError::NestingTooDeep { offset });
        }

        self.ensure(offset, HEADER_SIZE)?;
        let marker = self.buf.get_u8();
        let order = ByteOrder::from_marker(marker)
            .ok_or(WkbError::InvalidByteOrder { marker, offset })?;

        let code = self.read_u32(order)?;
        let variant = Variant::from_wkb_code(code).map_err(|_| WkbError::UnsupportedTypeCode {
            code,
            offset: offset + 1,
        })?;

        log::trace!("WKB header at offset {offset}: {variant} ({order:?})");

        Ok(Header {
            order,
            variant,
            offset,
        })
    }

    fn read_member_header(
        &mut self,
        parent: &Header,
        expected_kind: Option<GeometryKind>,
        depth: usize,
    ) -> Result<Header, WkbError> {
        let header = self.read_header(depth)?;
        let expected = parent.variant.dim;
        let found = header.variant.dim;
        if found != expected {
            return Err(WkbError::DimensionalityMismatch {
                expected,
                found,
                offset: header.offset,
            });
        }

        if let Some(expected) = expected_kind {
            let found = header.variant.kind;
            if found != expected {
                return Err(WkbError::UnexpectedMemberKind {
                    expected,
                    found,
                    offset: header.offset,
                });
            }
        }

        Ok(header)
    }

    fn read_payload(&mut self, header: &Header, depth: usize) -> Result<Geom, WkbError> {
        let order = header.order;
        let dim = header.variant.dim;

        let geom = match header.variant.kind {
            GeometryKind::Point => Point::new(self.read_coord(order, dim)?).into(),
            GeometryKind::LineString => LineString::new(dim, self.read_coords(order, dim)?)?.into(),
            GeometryKind::Polygon => self.read_polygon(order, dim)?.into(),
            GeometryKind::MultiPoint => {
                let points = self.read_members(header, Some(GeometryKind::Point), depth)?;
                let points = points
                    .into_iter()
                    .filter_map(|geom| match geom {
                        Geom::Point(p) => Some(p),
                        _ => None,
                    })
                    .collect();
                MultiPoint::new(dim, points)?.into()
            }
            GeometryKind::MultiLineString => {
                let lines = self.read_members(header, Some(GeometryKind::LineString), depth)?;
                let lines = lines
                    .into_iter()
                    .filter_map(|geom| match geom {
                        Geom::LineString(line) => Some(line),
                        _ => None,
                    })
                    .collect();
                MultiLineString::new(dim, lines)?.into()
            }
            GeometryKind::MultiPolygon => {
                let polygons = self.read_members(header, Some(GeometryKind::Polygon), depth)?;
                let polygons = polygons
                    .into_iter()
                    .filter_map(|geom| match geom {
                        Geom::Polygon(polygon) => Some(polygon),
                        _ => None,
                    })
                    .collect();
                MultiPolygon::new(dim, polygons)?.into()
            }
            GeometryKind::GeometryCollection => {
                let geometries = self.read_members(header, None, depth)?;
                GeometryCollection::new(dim, geometries)?.into()
            }
        };

        Ok(geom)
    }

    fn read_coord(&mut self, order: ByteOrder, dim: Dimension) -> Result<Coord, WkbError> {
        let count = dim.ordinate_count();
        self.ensure(self.offset(), count * ORDINATE_SIZE)?;

        let mut ordinates = [0.0; 4];
        for ordinate in ordinates.iter_mut().take(count) {
            *ordinate = self.read_f64(order);
        }

        Ok(Coord::from_ordinates(dim, &ordinates[..count])?)
    }

    fn read_coords(&mut self, order: ByteOrder, dim: Dimension) -> Result<Vec<Coord>, WkbError> {
        let (count, capacity) = self.read_count(order, dim.ordinate_count() * ORDINATE_SIZE)?;
        let mut coords = Vec::with_capacity(capacity);
        for _ in 0..count {
            coords.push(self.read_coord(order, dim)?);
        }

        Ok(coords)
    }

    fn read_polygon(&mut self, order: ByteOrder, dim: Dimension) -> Result<Polygon, WkbError> {
        let (count, capacity) = self.read_count(order, COUNT_SIZE)?;
        let mut rings = Vec::with_capacity(capacity);
        for _ in 0..count {
            rings.push(LinearRing::new(dim, self.read_coords(order, dim)?)?);
        }

        Ok(Polygon::new(dim, rings)?)
    }

    fn read_members(
        &mut self,
        parent: &Header,
        expected_kind: Option<GeometryKind>,
        depth: usize,
    ) -> Result<Vec<Geom>, WkbError> {
        let (count, capacity) = self.read_count(parent.order, HEADER_SIZE)?;
        let mut members = Vec::with_capacity(capacity);
        for _ in 0..count {
            let header = self.read_member_header(parent, expected_kind, depth + 1)?;
            members.push(self.read_payload(&header, depth + 1)?);
        }

        Ok(members)
    }
}
