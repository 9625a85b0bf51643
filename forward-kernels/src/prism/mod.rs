//! Kernels for axis-aligned rectangular prisms.
//!
//! The closed forms follow Nagy et al. (2000, 2002): each field quantity is
//! a signed sum of an antiderivative over the eight corner combinations of
//! the prism, evaluated at coordinates shifted to the observation point.
//! The corner sign is `(−1)^(i+j+k)` with index 0 selecting the *upper*
//! bound on each axis, which is the parity convention of the published
//! tables; it is deliberately not re-derived here. The logarithm and
//! arctangent terms are routed through [`crate::safe`] so every removable
//! singularity (observation point on a face, edge, vertex, edge
//! prolongation or inside the body) evaluates to its finite limit.

pub mod gravity;
pub mod kernels;
pub mod magnetic;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::geometry::Position;

/// Axis-aligned rectangular prism, bounded by `west ≤ east`,
/// `south ≤ north` and `bottom ≤ top`. All bounds in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prism {
    /// Lower easting bound
    pub west: f64,
    /// Upper easting bound
    pub east: f64,
    /// Lower northing bound
    pub south: f64,
    /// Upper northing bound
    pub north: f64,
    /// Lower upward bound
    pub bottom: f64,
    /// Upper upward bound
    pub top: f64,
}

impl Prism {
    /// Create a new prism from its six boundary coordinates.
    pub fn new(west: f64, east: f64, south: f64, north: f64, bottom: f64, top: f64) -> Self {
        Self {
            west,
            east,
            south,
            north,
            bottom,
            top,
        }
    }

    /// Volume of the prism in m³.
    pub fn volume(&self) -> f64 {
        (self.east - self.west) * (self.north - self.south) * (self.top - self.bottom)
    }

    /// Geometric center of the prism.
    pub fn center(&self) -> Position {
        Position::new(
            0.5 * (self.west + self.east),
            0.5 * (self.south + self.north),
            0.5 * (self.bottom + self.top),
        )
    }

    /// True if the point lies inside the prism or on its boundary.
    pub fn contains(&self, point: &Position) -> bool {
        self.west <= point.easting
            && point.easting <= self.east
            && self.south <= point.northing
            && point.northing <= self.north
            && self.bottom <= point.upward
            && point.upward <= self.top
    }

    /// Check bound ordering and finiteness.
    ///
    /// A swapped pair is reported, not reordered: silently swapping would
    /// produce a sign-flipped result for callers that meant something else.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("west", self.west),
            ("east", self.east),
            ("south", self.south),
            ("north", self.north),
            ("bottom", self.bottom),
            ("top", self.top),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { name, value });
            }
        }
        for (axis, lower, upper) in [
            ("easting", self.west, self.east),
            ("northing", self.south, self.north),
            ("upward", self.bottom, self.top),
        ] {
            if lower > upper {
                return Err(GeometryError::NegativeExtent { axis, lower, upper });
            }
        }
        Ok(())
    }

    /// Signed sum of a corner kernel over the eight corner combinations,
    /// with coordinates shifted to `observer`.
    pub(crate) fn corner_sum(
        &self,
        observer: &Position,
        kernel: fn(f64, f64, f64, f64) -> f64,
    ) -> f64 {
        let east_bounds = [self.east, self.west];
        let north_bounds = [self.north, self.south];
        let up_bounds = [self.top, self.bottom];
        let mut result = 0.0;
        for (i, &east_bound) in east_bounds.iter().enumerate() {
            let shift_east = east_bound - observer.easting;
            let shift_east_sq = shift_east * shift_east;
            for (j, &north_bound) in north_bounds.iter().enumerate() {
                let shift_north = north_bound - observer.northing;
                let shift_north_sq = shift_north * shift_north;
                for (k, &up_bound) in up_bounds.iter().enumerate() {
                    let shift_up = up_bound - observer.upward;
                    let radius =
                        (shift_east_sq + shift_north_sq + shift_up * shift_up).sqrt();
                    let term = kernel(shift_east, shift_north, shift_up, radius);
                    if (i + j + k) % 2 == 0 {
                        result += term;
                    } else {
                        result -= term;
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_volume_and_center() {
        let prism = Prism::new(-1.0, 3.0, 0.0, 2.0, -5.0, -1.0);
        assert_relative_eq!(prism.volume(), 4.0 * 2.0 * 4.0);
        let center = prism.center();
        assert_relative_eq!(center.easting, 1.0);
        assert_relative_eq!(center.northing, 1.0);
        assert_relative_eq!(center.upward, -3.0);
    }

    #[test]
    fn test_contains() {
        let prism = Prism::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        assert!(prism.contains(&Position::new(0.5, 0.5, 0.5)));
        // Boundary points count as inside.
        assert!(prism.contains(&Position::new(0.0, 0.5, 1.0)));
        assert!(!prism.contains(&Position::new(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_validate_rejects_swapped_bounds() {
        let prism = Prism::new(1.0, -1.0, 0.0, 1.0, 0.0, 1.0);
        let err = prism.validate().unwrap_err();
        assert!(matches!(
            err,
            GeometryError::NegativeExtent { axis: "easting", .. }
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let prism = Prism::new(0.0, 1.0, 0.0, f64::NAN, 0.0, 1.0);
        assert!(prism.validate().is_err());
    }

    #[test]
    fn test_zero_extent_is_valid() {
        let prism = Prism::new(0.0, 0.0, 0.0, 1.0, 0.0, 1.0);
        assert!(prism.validate().is_ok());
        assert_eq!(prism.volume(), 0.0);
    }
}
