use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::Dimension;

/// A single position: X and Y ordinates with optional elevation (Z) and measure (M).
///
/// The dimension of a coordinate is derived from which of the optional ordinates are present, so one type serves
/// all four dimensionalities.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
}

impl Coord {
    /// Creates a coordinate from all its parts.
    pub const fn new(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self {
        Self { x, y, z, m }
    }

    /// Creates a 2d coordinate.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, None, None)
    }

    /// Creates a coordinate with elevation.
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, Some(z), None)
    }

    /// Creates a coordinate with measure.
    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self::new(x, y, None, Some(m))
    }

    /// Creates a coordinate with both elevation and measure.
    pub const fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self::new(x, y, Some(z), Some(m))
    }

    /// Creates a coordinate of the given dimension from ordinates in `X, Y, [Z], [M]` order.
    ///
    /// Fails if the number of ordinates does not match [`Dimension::ordinate_count`].
    pub fn from_ordinates(dim: Dimension, ordinates: &[f64]) -> Result<Self, GeometryError> {
        match (dim, ordinates) {
            (Dimension::Xy, &[x, y]) => Ok(Self::xy(x, y)),
            (Dimension::Xyz, &[x, y, z]) => Ok(Self::xyz(x, y, z)),
            (Dimension::Xym, &[x, y, m]) => Ok(Self::xym(x, y, m)),
            (Dimension::Xyzm, &[x, y, z, m]) => Ok(Self::xyzm(x, y, z, m)),
            _ => Err(GeometryError::InvalidGeometry(format!(
                "{dim} coordinate requires {} ordinates, got {}",
                dim.ordinate_count(),
                ordinates.len()
            ))),
        }
    }

    /// X ordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y ordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Elevation, if the coordinate has one.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Measure, if the coordinate has one.
    pub fn m(&self) -> Option<f64> {
        self.m
    }

    /// Dimension of the coordinate.
    pub fn dimension(&self) -> Dimension {
        Dimension::from_flags(self.z.is_some(), self.m.is_some())
    }

    /// Iterates over the ordinates in `X, Y, [Z], [M]` order.
    pub fn ordinates(&self) -> impl Iterator<Item = f64> {
        [Some(self.x), Some(self.y), self.z, self.m]
            .into_iter()
            .flatten()
    }
}

/// Checks that every coordinate has the `expected` dimension.
pub(crate) fn ensure_dimension<'a>(
    expected: Dimension,
    coords: impl IntoIterator<Item = &'a Coord>,
) -> Result<(), GeometryError> {
    for coord in coords {
        let found = coord.dimension();
        if found != expected {
            return Err(GeometryError::DimensionalityMismatch { expected, found });
        }
    }

    Ok(())
}

impl From<[f64; 2]> for Coord {
    fn from(value: [f64; 2]) -> Self {
        Self::xy(value[0], value[1])
    }
}

impl From<(f64, f64)> for Coord {
    fn from(value: (f64, f64)) -> Self {
        Self::xy(value.0, value.1)
    }
}

impl AbsDiffEq for Coord {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let optional_eq = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => a.abs_diff_eq(&b, epsilon),
            (None, None) => true,
            _ => false,
        };

        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && optional_eq(self.z, other.z)
            && optional_eq(self.m, other.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn dimension_follows_present_ordinates() {
        assert_eq!(Coord::xy(1.0, 2.0).dimension(), Dimension::Xy);
        assert_eq!(Coord::xyz(1.0, 2.0, 3.0).dimension(), Dimension::Xyz);
        assert_eq!(Coord::xym(1.0, 2.0, 3.0).dimension(), Dimension::Xym);
        assert_eq!(Coord::xyzm(1.0, 2.0, 3.0, 4.0).dimension(), Dimension::Xyzm);
    }

    #[test]
    fn ordinates_order() {
        let c = Coord::xyzm(1.0, 2.0, 3.0, 4.0);
        assert_eq!(c.ordinates().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 4.0]);

        let c = Coord::xym(1.0, 2.0, 5.0);
        assert_eq!(c.ordinates().collect::<Vec<_>>(), vec![1.0, 2.0, 5.0]);
    }

    #[test]
    fn from_ordinates() {
        assert_eq!(
            Coord::from_ordinates(Dimension::Xym, &[1.0, 2.0, 3.0]),
            Ok(Coord::xym(1.0, 2.0, 3.0))
        );
        assert_matches!(
            Coord::from_ordinates(Dimension::Xyz, &[1.0, 2.0]),
            Err(GeometryError::InvalidGeometry(_))
        );
    }

    #[test]
    fn ensure_dimension_reports_first_mismatch() {
        let coords = [Coord::xy(0.0, 0.0), Coord::xyz(1.0, 1.0, 1.0)];
        assert_eq!(
            ensure_dimension(Dimension::Xy, &coords),
            Err(GeometryError::DimensionalityMismatch {
                expected: Dimension::Xy,
                found: Dimension::Xyz,
            })
        );
    }

    #[test]
    fn abs_diff_eq_respects_optional_ordinates() {
        assert_abs_diff_eq!(
            Coord::xyz(1.0, 2.0, 3.0),
            Coord::xyz(1.0 + 1e-12, 2.0, 3.0),
            epsilon = 1e-9
        );
        assert!(!Coord::xyz(1.0, 2.0, 3.0).abs_diff_eq(&Coord::xym(1.0, 2.0, 3.0), 1e-9));
    }
}
