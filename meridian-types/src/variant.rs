//! Registry of geometry variants: every combination of [`GeometryKind`] and [`Dimension`] along with the
//! identifiers the binary and text formats use for it.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::Geometry;

/// Coordinate dimensionality of a geometry.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    /// X and Y only.
    #[default]
    Xy,
    /// X, Y and elevation.
    Xyz,
    /// X, Y and measure.
    Xym,
    /// X, Y, elevation and measure.
    Xyzm,
}

impl Dimension {
    /// All dimensions in the order of their binary offsets.
    pub const ALL: [Dimension; 4] = [Self::Xy, Self::Xyz, Self::Xym, Self::Xyzm];

    /// Returns the dimension that has the given optional ordinates.
    pub const fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Self::Xy,
            (true, false) => Self::Xyz,
            (false, true) => Self::Xym,
            (true, true) => Self::Xyzm,
        }
    }

    /// Whether coordinates of this dimension carry elevation.
    pub const fn has_z(self) -> bool {
        matches!(self, Self::Xyz | Self::Xyzm)
    }

    /// Whether coordinates of this dimension carry a measure.
    pub const fn has_m(self) -> bool {
        matches!(self, Self::Xym | Self::Xyzm)
    }

    /// Number of ordinates a coordinate of this dimension has.
    pub const fn ordinate_count(self) -> usize {
        match self {
            Self::Xy => 2,
            Self::Xyz | Self::Xym => 3,
            Self::Xyzm => 4,
        }
    }

    /// Value added to the base kind code in a WKB type code.
    pub const fn wkb_offset(self) -> u32 {
        match self {
            Self::Xy => 0,
            Self::Xyz => 1000,
            Self::Xym => 2000,
            Self::Xyzm => 3000,
        }
    }

    /// Inverse of [`Dimension::wkb_offset`].
    pub const fn from_wkb_offset(offset: u32) -> Option<Self> {
        match offset {
            0 => Some(Self::Xy),
            1000 => Some(Self::Xyz),
            2000 => Some(Self::Xym),
            3000 => Some(Self::Xyzm),
            _ => None,
        }
    }

    /// Tag written after the WKT keyword. Empty for 2d geometries.
    pub const fn wkt_tag(self) -> &'static str {
        match self {
            Self::Xy => "",
            Self::Xyz => "Z",
            Self::Xym => "M",
            Self::Xyzm => "ZM",
        }
    }

    /// Parses a WKT dimension tag, ignoring case. The empty tag is `Xy`.
    pub fn from_wkt_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dim| dim.wkt_tag().eq_ignore_ascii_case(tag))
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Xy => "XY",
            Self::Xyz => "XYZ",
            Self::Xym => "XYM",
            Self::Xyzm => "XYZM",
        };
        f.write_str(name)
    }
}

/// Kind of a geometry regardless of its dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Single position.
    Point,
    /// Open or closed sequence of positions.
    LineString,
    /// Outer ring with optional holes.
    Polygon,
    /// Set of points.
    MultiPoint,
    /// Set of line strings.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Heterogeneous set of geometries.
    GeometryCollection,
}

impl GeometryKind {
    /// All kinds in the order of their binary codes.
    pub const ALL: [GeometryKind; 7] = [
        Self::Point,
        Self::LineString,
        Self::Polygon,
        Self::MultiPoint,
        Self::MultiLineString,
        Self::MultiPolygon,
        Self::GeometryCollection,
    ];

    /// WKB code of the 2d variant of this kind.
    pub const fn wkb_base_code(self) -> u32 {
        match self {
            Self::Point => 1,
            Self::LineString => 2,
            Self::Polygon => 3,
            Self::MultiPoint => 4,
            Self::MultiLineString => 5,
            Self::MultiPolygon => 6,
            Self::GeometryCollection => 7,
        }
    }

    /// Inverse of [`GeometryKind::wkb_base_code`].
    pub const fn from_wkb_base_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Point),
            2 => Some(Self::LineString),
            3 => Some(Self::Polygon),
            4 => Some(Self::MultiPoint),
            5 => Some(Self::MultiLineString),
            6 => Some(Self::MultiPolygon),
            7 => Some(Self::GeometryCollection),
            _ => None,
        }
    }

    /// Upper-case WKT keyword of the kind.
    pub const fn wkt_keyword(self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Parses a WKT keyword, ignoring case.
    pub fn from_wkt_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wkt_keyword().eq_ignore_ascii_case(keyword))
    }

    /// Whether members of this kind are themselves full geometries.
    pub const fn is_multi(self) -> bool {
        matches!(
            self,
            Self::MultiPoint | Self::MultiLineString | Self::MultiPolygon | Self::GeometryCollection
        )
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        };
        f.write_str(name)
    }
}

/// A concrete geometry variant: kind together with dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Geometry kind.
    pub kind: GeometryKind,
    /// Coordinate dimension.
    pub dim: Dimension,
}

impl Variant {
    /// Creates a new variant.
    pub const fn new(kind: GeometryKind, dim: Dimension) -> Self {
        Self { kind, dim }
    }

    /// Variant of the given geometry.
    pub fn of(geometry: &impl Geometry) -> Self {
        Self::new(geometry.kind(), geometry.dimension())
    }

    /// Iterates over all 28 known variants.
    pub fn all() -> impl Iterator<Item = Self> {
        Dimension::ALL.into_iter().flat_map(|dim| {
            GeometryKind::ALL
                .into_iter()
                .map(move |kind| Self::new(kind, dim))
        })
    }

    /// Full WKB type code of the variant.
    pub const fn wkb_code(self) -> u32 {
        self.kind.wkb_base_code() + self.dim.wkb_offset()
    }

    /// Resolves a WKB type code.
    pub fn from_wkb_code(code: u32) -> Result<Self, GeometryError> {
        let kind = GeometryKind::from_wkb_base_code(code % 1000);
        let dim = Dimension::from_wkb_offset(code - code % 1000);
        match (kind, dim) {
            (Some(kind), Some(dim)) => Ok(Self::new(kind, dim)),
            _ => Err(GeometryError::UnsupportedVariant(format!(
                "WKB type code {code}"
            ))),
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.dim {
            Dimension::Xy => write!(f, "{}", self.kind),
            dim => write!(f, "{} {}", self.kind, dim.wkt_tag()),
        }
    }
}
