//! Axis-aligned bounds of geometries. See [`Bounds`].

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::{Coord, Dimension};

/// Bounds of a geometry: either empty, or a box enclosing every coordinate.
///
/// Bounds of an empty geometry are [`Bounds::Empty`] and not a zero-sized box at the origin. `Empty` is the
/// identity of [`Bounds::merge`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bounds {
    /// No coordinates were seen.
    #[default]
    Empty,
    /// Box enclosing all coordinates.
    Extent(BoundingBox),
}

impl Bounds {
    /// Computes bounds of a sequence of coordinates.
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Self {
        let mut bounds = Self::Empty;
        for coord in coords {
            bounds.extend(coord);
        }

        bounds
    }

    /// Returns true if no coordinates were added to the bounds.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the bounding box, if the bounds are not empty.
    pub fn extent(&self) -> Option<&BoundingBox> {
        match self {
            Self::Empty => None,
            Self::Extent(bbox) => Some(bbox),
        }
    }

    /// Dimension of the box, if the bounds are not empty.
    pub fn dimension(&self) -> Option<Dimension> {
        self.extent().map(BoundingBox::dimension)
    }

    /// Grows the bounds to include the coordinate.
    pub fn extend(&mut self, coord: &Coord) {
        *self = match self {
            Self::Empty => Self::Extent(BoundingBox::from_coord(coord)),
            Self::Extent(bbox) => Self::Extent(bbox.extend(coord)),
        };
    }

    /// Returns bounds that enclose both `self` and `other`.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, other) => other,
            (this, Self::Empty) => this,
            (Self::Extent(a), Self::Extent(b)) => Self::Extent(a.merge(&b)),
        }
    }

    /// Returns true if the boxes intersect. Empty bounds overlap nothing.
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Extent(a), Self::Extent(b)) => a.overlaps(b),
            _ => false,
        }
    }

    /// Returns true if the coordinate lies inside the box or on its boundary.
    pub fn contains(&self, coord: &Coord) -> bool {
        match self {
            Self::Empty => false,
            Self::Extent(bbox) => bbox.contains(coord),
        }
    }
}

impl From<BoundingBox> for Bounds {
    fn from(value: BoundingBox) -> Self {
        Self::Extent(value)
    }
}

impl FromIterator<Bounds> for Bounds {
    fn from_iter<T: IntoIterator<Item = Bounds>>(iter: T) -> Self {
        iter.into_iter().fold(Self::Empty, Self::merge)
    }
}

/// Non-empty axis-aligned box.
///
/// X and Y ranges are always present. Z and M ranges are present only if every coordinate that contributed to the
/// box carried them.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Coord,
    max: Coord,
}

impl BoundingBox {
    /// Creates a box from its corners.
    ///
    /// The dimension of the box is the dimension the corners have in common.
    pub fn new(min: Coord, max: Coord) -> Self {
        Self {
            min: Coord::new(
                min.x(),
                min.y(),
                shared_axis(min.z(), max.z(), |v, _| v),
                shared_axis(min.m(), max.m(), |v, _| v),
            ),
            max: Coord::new(
                max.x(),
                max.y(),
                shared_axis(max.z(), min.z(), |v, _| v),
                shared_axis(max.m(), min.m(), |v, _| v),
            ),
        }
    }

    /// Box with zero size located at the coordinate.
    pub fn from_coord(coord: &Coord) -> Self {
        Self {
            min: *coord,
            max: *coord,
        }
    }

    /// Corner with minimum values of all axes.
    pub fn min(&self) -> &Coord {
        &self.min
    }

    /// Corner with maximum values of all axes.
    pub fn max(&self) -> &Coord {
        &self.max
    }

    /// Minimum X.
    pub fn x_min(&self) -> f64 {
        self.min.x()
    }

    /// Maximum X.
    pub fn x_max(&self) -> f64 {
        self.max.x()
    }

    /// Minimum Y.
    pub fn y_min(&self) -> f64 {
        self.min.y()
    }

    /// Maximum Y.
    pub fn y_max(&self) -> f64 {
        self.max.y()
    }

    /// Range of elevation values.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        Some((self.min.z()?, self.max.z()?))
    }

    /// Range of measure values.
    pub fn m_range(&self) -> Option<(f64, f64)> {
        Some((self.min.m()?, self.max.m()?))
    }

    /// Size of the box along X axis.
    pub fn width(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    /// Size of the box along Y axis.
    pub fn height(&self) -> f64 {
        self.y_max() - self.y_min()
    }

    /// Axes the box carries.
    pub fn dimension(&self) -> Dimension {
        self.min.dimension()
    }

    /// Returns a box grown to include the coordinate.
    pub fn extend(&self, coord: &Coord) -> Self {
        self.merge(&Self::from_coord(coord))
    }

    /// Returns a box enclosing both boxes. Only axes present in both boxes are kept.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: Coord::new(
                self.x_min().min(other.x_min()),
                self.y_min().min(other.y_min()),
                shared_axis(self.min.z(), other.min.z(), f64::min),
                shared_axis(self.min.m(), other.min.m(), f64::min),
            ),
            max: Coord::new(
                self.x_max().max(other.x_max()),
                self.y_max().max(other.y_max()),
                shared_axis(self.max.z(), other.max.z(), f64::max),
                shared_axis(self.max.m(), other.max.m(), f64::max),
            ),
        }
    }

    /// Returns true if the boxes intersect along every axis they share.
    pub fn overlaps(&self, other: &Self) -> bool {
        let axis = |a: Option<(f64, f64)>, b: Option<(f64, f64)>| match (a, b) {
            (Some((a_min, a_max)), Some((b_min, b_max))) => a_min <= b_max && b_min <= a_max,
            _ => true,
        };

        axis(
            Some((self.x_min(), self.x_max())),
            Some((other.x_min(), other.x_max())),
        ) && axis(
            Some((self.y_min(), self.y_max())),
            Some((other.y_min(), other.y_max())),
        ) && axis(self.z_range(), other.z_range())
            && axis(self.m_range(), other.m_range())
    }

    /// Returns true if the coordinate is inside the box along every axis they share.
    pub fn contains(&self, coord: &Coord) -> bool {
        let axis = |range: Option<(f64, f64)>, value: Option<f64>| match (range, value) {
            (Some((min, max)), Some(v)) => min <= v && v <= max,
            _ => true,
        };

        axis(Some((self.x_min(), self.x_max())), Some(coord.x()))
            && axis(Some((self.y_min(), self.y_max())), Some(coord.y()))
            && axis(self.z_range(), coord.z())
            && axis(self.m_range(), coord.m())
    }
}

fn shared_axis(a: Option<f64>, b: Option<f64>, op: impl Fn(f64, f64) -> f64) -> Option<f64> {
    Some(op(a?, b?))
}

impl AbsDiffEq for BoundingBox {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.min.abs_diff_eq(&other.min, epsilon) && self.max.abs_diff_eq(&other.max, epsilon)
    }
}
