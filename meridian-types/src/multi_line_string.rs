use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::GeometryError;
use crate::geometry::{ensure_member_dimension, validate_members};
use crate::{Coord, Dimension, Geometry, GeometryKind, LineString};

/// A set of line strings of the same dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultiLineString")]
pub struct MultiLineString {
    dim: Dimension,
    line_strings: Vec<LineString>,
}

impl MultiLineString {
    /// Creates a new multi line string. Every member must have dimension `dim`.
    pub fn new(dim: Dimension, line_strings: Vec<LineString>) -> Result<Self, GeometryError> {
        ensure_member_dimension(dim, &line_strings)?;
        Ok(Self { dim, line_strings })
    }

    /// Multi line string without members.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            dim,
            line_strings: vec![],
        }
    }

    /// Member line strings.
    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }
}

deserialize_with_new!(MultiLineString, RawMultiLineString { line_strings: Vec<LineString> });

impl Geometry for MultiLineString {
    fn kind(&self) -> GeometryKind {
        GeometryKind::MultiLineString
    }

    fn dimension(&self) -> Dimension {
        self.dim
    }

    fn iter_coords(&self) -> impl Iterator<Item = &'_ Coord> {
        self.line_strings.iter().flat_map(|line| line.iter_coords())
    }

    fn bounds(&self) -> Bounds {
        self.line_strings.iter().map(Geometry::bounds).collect()
    }

    fn validate(&self) -> Result<(), GeometryError> {
        validate_members(self.dim, &self.line_strings)
    }
}

impl From<Vec<Vec<[f64; 2]>>> for MultiLineString {
    fn from(value: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            dim: Dimension::Xy,
            line_strings: value.into_iter().map(LineString::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_merge_members() {
        let mls = MultiLineString::from(vec![
            vec![[0.0, 0.0], [1.0, 1.0]],
            vec![],
            vec![[5.0, -3.0], [4.0, 2.0]],
        ]);
        let bbox = *mls.bounds().extent().expect("not empty");
        assert_eq!(
            (bbox.x_min(), bbox.y_min(), bbox.x_max(), bbox.y_max()),
            (0.0, -3.0, 5.0, 2.0)
        );
        assert_eq!(mls.iter_coords().count(), 4);
    }
}
