use meridian_types::{
    Coord, Dimension, Geom, GeometryCollection, GeometryKind, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Variant,
};

use crate::error::WktError;
use crate::token::{tokenize, Token, TokenKind};

/// WKT decoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WktReader {
    max_depth: usize,
}

impl Default for WktReader {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

impl WktReader {
    /// Creates a reader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many levels of nested geometry collections are accepted. The top-level geometry is level 0.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses a geometry from WKT.
    ///
    /// Keywords are case-insensitive, and any whitespace is allowed between tokens. The whole input must be
    /// consumed.
    pub fn read(&self, text: &str) -> Result<Geom, WktError> {
        let mut parser = Parser {
            tokens: tokenize(text),
            index: 0,
            max_depth: self.max_depth,
        };

        parser.parse().map_err(|err| {
            log::debug!("Rejected WKT input: {err}");
            err
        })
    }
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    index: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn parse(&mut self) -> Result<Geom, WktError> {
        let geom = self.parse_geometry(0, None)?;
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            return Err(self.error("expected end of input"));
        }

        Ok(geom)
    }

    fn peek(&self) -> Token<'a> {
        // The token list always ends with Eof, and the index never moves past it.
        self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }

        token
    }

    fn error(&self, message: impl Into<String>) -> WktError {
        let token = self.peek();
        WktError::MalformedGrammar {
            message: message.into(),
            token: token.describe(),
            position: token.position,
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<(), WktError> {
        if self.peek().kind != kind {
            return Err(self.error(message));
        }

        self.advance();
        Ok(())
    }

    /// Consumes `EMPTY` if it is the next token.
    fn take_empty(&mut self) -> bool {
        if self.peek().is_atom("EMPTY") {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a comma if the list continues, or a closing parenthesis if it ends. Returns true if there are more
    /// elements.
    fn list_continues(&mut self) -> Result<bool, WktError> {
        match self.peek().kind {
            TokenKind::Comma => {
                self.advance();
                Ok(true)
            }
            TokenKind::RightParen => {
                self.advance();
                Ok(false)
            }
            _ => Err(self.error("expected ',' or ')'")),
        }
    }

    /// Parses a parenthesized, comma-separated, non-empty list.
    fn parse_list<T>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Result<T, WktError>,
    ) -> Result<Vec<T>, WktError> {
        self.expect(TokenKind::LeftParen, "expected '('")?;
        let mut items = vec![];
        loop {
            items.push(element(self)?);
            if !self.list_continues()? {
                return Ok(items);
            }
        }
    }

    /// Parses the geometry keyword and the optional dimension tag, either separate or fused (`POINTZ`).
    fn parse_type(&mut self) -> Result<(GeometryKind, Option<Dimension>), WktError> {
        let token = self.peek();
        if token.kind != TokenKind::Atom {
            return Err(self.error("expected geometry type"));
        }

        let (kind, fused_dim) = match GeometryKind::from_wkt_keyword(token.text) {
            Some(kind) => (kind, None),
            None => split_fused_tag(token.text)
                .ok_or_else(|| self.error("unknown geometry type"))?,
        };
        self.advance();

        if fused_dim.is_some() {
            return Ok((kind, fused_dim));
        }

        let next = self.peek();
        if next.kind == TokenKind::Atom && !next.is_atom("EMPTY") {
            let dim = Dimension::from_wkt_tag(next.text)
                .filter(|dim| *dim != Dimension::Xy)
                .ok_or_else(|| self.error("expected dimension tag, '(' or EMPTY"))?;
            self.advance();
            return Ok((kind, Some(dim)));
        }

        Ok((kind, None))
    }

    fn parse_geometry(&mut self, depth: usize, parent: Option<Dimension>) -> Result<Geom, WktError> {
        let position = self.peek().position;
        if depth > self.max_depth {
            return Err(WktError::NestingTooDeep { position });
        }

        let (kind, tag) = self.parse_type()?;
        let dim = match (tag, parent) {
            (Some(found), Some(expected)) if found != expected => {
                return Err(WktError::DimensionalityMismatch {
                    expected,
                    found,
                    position,
                });
            }
            (Some(dim), _) => dim,
            (None, Some(parent)) => parent,
            (None, None) => Dimension::Xy,
        };

        let variant = Variant::new(kind, dim);
        log::trace!("WKT geometry at {position}: {variant}");

        if self.take_empty() {
            return match kind {
                GeometryKind::Point => Err(WktError::UnsupportedVariant {
                    variant: format!("{variant} EMPTY"),
                    position,
                }),
                GeometryKind::LineString => Ok(LineString::empty(dim).into()),
                GeometryKind::Polygon => Ok(Polygon::empty(dim).into()),
                GeometryKind::MultiPoint => Ok(MultiPoint::empty(dim).into()),
                GeometryKind::MultiLineString => Ok(MultiLineString::empty(dim).into()),
                GeometryKind::MultiPolygon => Ok(MultiPolygon::empty(dim).into()),
                GeometryKind::GeometryCollection => Ok(GeometryCollection::empty(dim).into()),
            };
        }

        let geom: Geom = match kind {
            GeometryKind::Point => {
                self.expect(TokenKind::LeftParen, "expected '(' or EMPTY")?;
                let coord = self.parse_coord(dim)?;
                self.expect(TokenKind::RightParen, "expected ')'")?;
                Point::new(coord).into()
            }
            GeometryKind::LineString => LineString::new(dim, self.parse_coords(dim)?)?.into(),
            GeometryKind::Polygon => self.parse_polygon(dim)?.into(),
            GeometryKind::MultiPoint => {
                let points = self.parse_list(|p| p.parse_multi_point_member(dim))?;
                MultiPoint::new(dim, points)?.into()
            }
            GeometryKind::MultiLineString => {
                let lines = self.parse_list(|p| {
                    let coords = p.parse_coords_or_empty(dim)?;
                    Ok(LineString::new(dim, coords)?)
                })?;
                MultiLineString::new(dim, lines)?.into()
            }
            GeometryKind::MultiPolygon => {
                let polygons = self.parse_list(|p| {
                    if p.take_empty() {
                        Ok(Polygon::empty(dim))
                    } else {
                        p.parse_polygon(dim)
                    }
                })?;
                MultiPolygon::new(dim, polygons)?.into()
            }
            GeometryKind::GeometryCollection => {
                let members = self.parse_list(|p| p.parse_geometry(depth + 1, Some(dim)))?;
                GeometryCollection::new(dim, members)?.into()
            }
        };

        Ok(geom)
    }

    fn parse_number(&mut self) -> Result<f64, WktError> {
        let token = self.peek();
        if token.kind != TokenKind::Atom {
            return Err(self.error("expected number"));
        }

        let value = token
            .text
            .parse::<f64>()
            .map_err(|_| self.error("expected number"))?;
        self.advance();

        Ok(value)
    }

    fn parse_coord(&mut self, dim: Dimension) -> Result<Coord, WktError> {
        let count = dim.ordinate_count();
        let mut ordinates = [0.0; 4];
        for (i, ordinate) in ordinates.iter_mut().take(count).enumerate() {
            if self.peek().kind != TokenKind::Atom {
                return Err(self.error(format!(
                    "expected {count} ordinates for {dim} coordinate, got {i}"
                )));
            }

            *ordinate = self.parse_number()?;
        }

        if self.peek().kind == TokenKind::Atom {
            return Err(self.error(format!(
                "expected {count} ordinates for {dim} coordinate, got more"
            )));
        }

        Ok(Coord::from_ordinates(dim, &ordinates[..count])?)
    }

    fn parse_coords(&mut self, dim: Dimension) -> Result<Vec<Coord>, WktError> {
        self.parse_list(|p| p.parse_coord(dim))
    }

    fn parse_coords_or_empty(&mut self, dim: Dimension) -> Result<Vec<Coord>, WktError> {
        if self.take_empty() {
            return Ok(vec![]);
        }

        self.parse_coords(dim)
    }

    fn parse_polygon(&mut self, dim: Dimension) -> Result<Polygon, WktError> {
        let rings = self.parse_list(|p| {
            let coords = p.parse_coords_or_empty(dim)?;
            Ok(LinearRing::new(dim, coords)?)
        })?;

        Ok(Polygon::new(dim, rings)?)
    }

    /// Members of a multipoint can be written both as `(1 2)` and as `1 2`.
    fn parse_multi_point_member(&mut self, dim: Dimension) -> Result<Point, WktError> {
        if self.peek().kind == TokenKind::LeftParen {
            self.advance();
            let coord = self.parse_coord(dim)?;
            self.expect(TokenKind::RightParen, "expected ')'")?;
            Ok(Point::new(coord))
        } else {
            Ok(Point::new(self.parse_coord(dim)?))
        }
    }
}

/// Splits a keyword with a fused dimension tag, like `POINTZM`, into its parts.
fn split_fused_tag(word: &str) -> Option<(GeometryKind, Option<Dimension>)> {
    [Dimension::Xyzm, Dimension::Xyz, Dimension::Xym]
        .into_iter()
        .find_map(|dim| {
            let tag = dim.wkt_tag();
            let split = word.len().checked_sub(tag.len())?;
            let (keyword, suffix) = (word.get(..split)?, word.get(split..)?);
            if !suffix.eq_ignore_ascii_case(tag) {
                return None;
            }

            GeometryKind::from_wkt_keyword(keyword).map(|kind| (kind, Some(dim)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use meridian_types::{Bounds, BoundingBox, Geometry};

    fn read(text: &str) -> Result<Geom, WktError> {
        WktReader::new().read(text)
    }

    #[test]
    fn polygon_with_one_ring() {
        let geom = read("POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))").expect("valid polygon");
        let Geom::Polygon(polygon) = &geom else {
            panic!("expected polygon, got {geom:?}");
        };

        assert_eq!(polygon.rings().len(), 1);
        assert_eq!(polygon.exterior().map(LinearRing::len), Some(5));
        assert_eq!(
            geom.bounds(),
            Bounds::from(BoundingBox::new(Coord::xy(0.0, 0.0), Coord::xy(1.0, 1.0)))
        );
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_matches!(
            read("POLYGON ((0 0, 1 0, 1 1)"),
            Err(WktError::MalformedGrammar { message, token, position })
                if message == "expected ',' or ')'"
                    && token == "end of input"
                    && position.offset == 24
        );
        assert_matches!(
            read("POINT (1 2))"),
            Err(WktError::MalformedGrammar { message, .. }) if message == "expected end of input"
        );
    }

    #[test]
    fn wrong_ordinate_count() {
        assert_matches!(
            read("LINESTRING Z (0 0, 1 1)"),
            Err(WktError::MalformedGrammar { token, position, .. })
                if token == "','"
                    && position.offset == 17
                    && position.line == 1
                    && position.column == 18
        );
        assert_matches!(
            read("POINT (1 2 3)"),
            Err(WktError::MalformedGrammar { token, .. }) if token == "'3'"
        );
        assert_matches!(
            read("POINT ZM (1 2 3)"),
            Err(WktError::MalformedGrammar { token, .. }) if token == "')'"
        );
    }

    #[test]
    fn keywords_ignore_case_and_whitespace() {
        let geom = read("  multiPoint   z\n(( 1 2 3 ),(4\t5 6))  ").expect("valid multipoint");
        assert_eq!(geom.variant(), Variant::new(GeometryKind::MultiPoint, Dimension::Xyz));
        assert_eq!(geom.iter_coords().count(), 2);
    }

    #[test]
    fn fused_dimension_tag() {
        let geom = read("POINTZM (1 2 3 4)").expect("valid point");
        assert_eq!(geom, Geom::from(Point::new(Coord::xyzm(1.0, 2.0, 3.0, 4.0))));

        let geom = read("multipointm (1 2 3)").expect("valid multipoint");
        assert_eq!(geom.dimension(), Dimension::Xym);

        assert_matches!(
            read("POINTZ Z (1 2 3)"),
            Err(WktError::MalformedGrammar { .. })
        );
    }

    #[test]
    fn multipoint_without_member_parentheses() {
        let bare = read("MULTIPOINT (1 2, 3 4)").expect("valid multipoint");
        let wrapped = read("MULTIPOINT ((1 2), (3 4))").expect("valid multipoint");
        assert_eq!(bare, wrapped);
        assert_eq!(bare, Geom::from(MultiPoint::from(vec![[1.0, 2.0], [3.0, 4.0]])));
    }

    #[test]
    fn empty_geometries() {
        assert_eq!(
            read("LINESTRING EMPTY"),
            Ok(Geom::from(LineString::empty(Dimension::Xy)))
        );
        assert_eq!(
            read("polygon zm empty"),
            Ok(Geom::from(Polygon::empty(Dimension::Xyzm)))
        );
        assert_eq!(
            read("GEOMETRYCOLLECTION M EMPTY"),
            Ok(Geom::from(GeometryCollection::empty(Dimension::Xym)))
        );
        assert_matches!(
            read("POINT EMPTY"),
            Err(WktError::UnsupportedVariant { position, .. }) if position.offset == 0
        );
    }

    #[test]
    fn empty_groups_are_rejected() {
        for text in ["LINESTRING ()", "POLYGON (())", "MULTIPOINT ()", "GEOMETRYCOLLECTION ()"] {
            assert_matches!(read(text), Err(WktError::MalformedGrammar { .. }), "{text}");
        }
    }

    #[test]
    fn non_numeric_ordinates() {
        assert_matches!(
            read("POINT (1 y)"),
            Err(WktError::MalformedGrammar { token, .. }) if token == "'y'"
        );
        assert_matches!(
            read("POINT (1 2e)"),
            Err(WktError::MalformedGrammar { .. })
        );
    }

    #[test]
    fn unknown_keyword() {
        assert_matches!(
            read("CIRCLE (1 2)"),
            Err(WktError::MalformedGrammar { message, token, .. })
                if message == "unknown geometry type" && token == "'CIRCLE'"
        );
        assert_matches!(
            read("POINT Q (1 2)"),
            Err(WktError::MalformedGrammar { token, .. }) if token == "'Q'"
        );
        assert_matches!(read(""), Err(WktError::MalformedGrammar { .. }));
    }

    #[test]
    fn collection_members_inherit_dimension() {
        let geom = read("GEOMETRYCOLLECTION Z (POINT (1 2 3), LINESTRING Z (0 0 0, 1 1 1))")
            .expect("valid collection");
        assert_eq!(geom.dimension(), Dimension::Xyz);
        assert!(geom.iter_coords().all(|c| c.dimension() == Dimension::Xyz));
    }

    #[test]
    fn collection_member_with_other_tag() {
        assert_matches!(
            read("GEOMETRYCOLLECTION Z (POINT M (1 2 3))"),
            Err(WktError::DimensionalityMismatch {
                expected: Dimension::Xyz,
                found: Dimension::Xym,
                position
            }) if position.offset == 22
        );
    }

    #[test]
    fn nesting_limit() {
        let text = "GEOMETRYCOLLECTION (GEOMETRYCOLLECTION (GEOMETRYCOLLECTION EMPTY))";
        assert_matches!(read(text), Ok(_));
        assert_matches!(
            WktReader::new().with_max_depth(1).read(text),
            Err(WktError::NestingTooDeep { position }) if position.offset == 40
        );

        let deep = "GEOMETRYCOLLECTION (".repeat(10_000);
        assert_matches!(read(&deep), Err(WktError::NestingTooDeep { .. }));
    }

    #[test]
    fn special_values() {
        let geom = read("POINT (NaN -inf)").expect("valid point");
        let Geom::Point(p) = geom else {
            panic!("expected point");
        };
        assert!(p.x().is_nan());
        assert_eq!(p.y(), f64::NEG_INFINITY);
    }

    #[test]
    fn split_fused() {
        assert_eq!(
            split_fused_tag("PolygonZM"),
            Some((GeometryKind::Polygon, Some(Dimension::Xyzm)))
        );
        assert_eq!(split_fused_tag("POINTQ"), None);
        assert_eq!(split_fused_tag("M"), None);
    }
}
