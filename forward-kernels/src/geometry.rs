//! Geometric primitives shared by the kernel families.
//!
//! Coordinates follow the easting/northing/upward convention: a right-handed
//! Cartesian frame with `upward` pointing away from the Earth's center. All
//! distances and coordinates are in meters; spherical angles are in degrees.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Cartesian coordinates of a source or observation point, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Easting coordinate
    pub easting: f64,
    /// Northing coordinate
    pub northing: f64,
    /// Upward coordinate
    pub upward: f64,
}

impl Position {
    /// Create a new position from its three coordinates.
    pub fn new(easting: f64, northing: f64, upward: f64) -> Self {
        Self {
            easting,
            northing,
            upward,
        }
    }

    /// The origin of the coordinate frame.
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Embed geocentric spherical coordinates into the Cartesian frame.
    ///
    /// `longitude` and `latitude` are in degrees, `radius` in meters. The
    /// embedding maps easting to `r·cosφ·cosλ`, northing to `r·cosφ·sinλ`
    /// and upward to `r·sinφ`. Geodetic (ellipsoidal) coordinates must be
    /// converted to geocentric spherical ones by the caller first.
    pub fn from_spherical(longitude: f64, latitude: f64, radius: f64) -> Self {
        let lambda = longitude.to_radians();
        let phi = latitude.to_radians();
        Self {
            easting: radius * phi.cos() * lambda.cos(),
            northing: radius * phi.cos() * lambda.sin(),
            upward: radius * phi.sin(),
        }
    }

    /// Displacement vector from `other` to `self`, component-wise.
    pub fn displacement_from(&self, other: &Position) -> [f64; 3] {
        [
            self.easting - other.easting,
            self.northing - other.northing,
            self.upward - other.upward,
        ]
    }

    /// Squared Euclidean distance to another position.
    ///
    /// Exactly 0.0 when the two positions coincide; callers decide whether
    /// coincidence is a zero contribution or a diagnosable condition.
    pub fn distance_sq(&self, other: &Position) -> f64 {
        let [de, dn, du] = self.displacement_from(other);
        de * de + dn * dn + du * du
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Check that every coordinate is finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("easting", self.easting),
            ("northing", self.northing),
            ("upward", self.upward),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

/// Euclidean distance between two points given in Cartesian coordinates.
pub fn distance_cartesian(point_p: &Position, point_q: &Position) -> f64 {
    point_p.distance_to(point_q)
}

/// Euclidean (chord) distance between two points given in geocentric
/// spherical coordinates.
///
/// Longitudes and latitudes are in degrees, radii in meters. The returned
/// distance is measured through the ambient Cartesian embedding, not along
/// the sphere:
///
/// ```text
/// d² = (r_p − r_q)² + 2 r_p r_q (1 − cos ψ)
/// cos ψ = sin φ_p sin φ_q + cos φ_p cos φ_q cos(λ_p − λ_q)
/// ```
pub fn distance_spherical(
    longitude_p: f64,
    latitude_p: f64,
    radius_p: f64,
    longitude_q: f64,
    latitude_q: f64,
    radius_q: f64,
) -> f64 {
    let lambda_p = longitude_p.to_radians();
    let phi_p = latitude_p.to_radians();
    let lambda_q = longitude_q.to_radians();
    let phi_q = latitude_q.to_radians();
    let (distance, _) = distance_spherical_core(
        lambda_p,
        phi_p.cos(),
        phi_p.sin(),
        radius_p,
        lambda_q,
        phi_q.cos(),
        phi_q.sin(),
        radius_q,
    );
    distance
}

/// Core of the spherical distance with precomputed trigonometric quantities.
///
/// Longitudes must already be in radians. Reusing the cached sine/cosine of
/// the latitudes saves work when one of the points is fixed across a batch.
/// Returns the distance together with `cos ψ`, the cosine of the angle
/// subtended by the two points at the origin.
#[allow(clippy::too_many_arguments)]
pub fn distance_spherical_core(
    longitude_p: f64,
    cosphi_p: f64,
    sinphi_p: f64,
    radius_p: f64,
    longitude_q: f64,
    cosphi_q: f64,
    sinphi_q: f64,
    radius_q: f64,
) -> (f64, f64) {
    let coslambda = (longitude_q - longitude_p).cos();
    let cospsi = sinphi_q * sinphi_p + cosphi_q * cosphi_p * coslambda;
    // Rounding can push cospsi marginally past 1 for nearly coincident
    // points; clamp so the radicand never goes negative.
    let radicand =
        ((radius_p - radius_q).powi(2) + 2.0 * radius_p * radius_q * (1.0 - cospsi)).max(0.0);
    (radicand.sqrt(), cospsi)
}
