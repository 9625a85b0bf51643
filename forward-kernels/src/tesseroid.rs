//! Spherical-shell segment (tesseroid) geometry.
//!
//! A tesseroid is bounded by two meridians, two parallels and two
//! concentric spheres. Field quantities for tesseroids are evaluated
//! through a closed-form reduction: the segment's exact volume is
//! concentrated at its mass centroid embedded in Cartesian space, and
//! the point-mass kernels (gravity, with `m = ρ·V`) or the dipole kernels
//! (magnetics, with `m = M·V`) take over from there. No quadrature is
//! involved. The reduction is accurate for observation points outside the
//! segment and degrades gracefully as they approach it; degenerate bounds
//! have zero volume and contribute exactly nothing.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::geometry::Position;

/// Spherical-shell segment bounded by longitudes `west ≤ east` (degrees),
/// latitudes `south ≤ north` (degrees) and radii `inner ≤ outer` (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tesseroid {
    /// Lower longitude bound, degrees
    pub west: f64,
    /// Upper longitude bound, degrees
    pub east: f64,
    /// Lower latitude bound, degrees
    pub south: f64,
    /// Upper latitude bound, degrees
    pub north: f64,
    /// Inner radial bound, meters
    pub inner: f64,
    /// Outer radial bound, meters
    pub outer: f64,
}

impl Tesseroid {
    /// Create a new tesseroid from its six boundary coordinates.
    pub fn new(west: f64, east: f64, south: f64, north: f64, inner: f64, outer: f64) -> Self {
        Self {
            west,
            east,
            south,
            north,
            inner,
            outer,
        }
    }

    /// Full spherical shell between two radii.
    pub fn shell(inner: f64, outer: f64) -> Self {
        Self::new(-180.0, 180.0, -90.0, 90.0, inner, outer)
    }

    /// Exact volume of the segment in m³:
    /// `Δλ · (sin φ_n − sin φ_s) · (r_o³ − r_i³) / 3`.
    pub fn volume(&self) -> f64 {
        let delta_lambda = (self.east - self.west).to_radians();
        let sin_band = self.north.to_radians().sin() - self.south.to_radians().sin();
        delta_lambda * sin_band * (self.outer.powi(3) - self.inner.powi(3)) / 3.0
    }

    /// Geometric center of the segment as
    /// `(longitude degrees, latitude degrees, radius meters)`.
    pub fn center(&self) -> (f64, f64, f64) {
        (
            0.5 * (self.west + self.east),
            0.5 * (self.south + self.north),
            0.5 * (self.inner + self.outer),
        )
    }

    /// Mass centroid of the segment (uniform density) in Cartesian
    /// coordinates; the anchor point of the point-mass/dipole reduction.
    ///
    /// The centroid has a closed form: with `Q_r = (r_o⁴ − r_i⁴)/4` and the
    /// latitude integrals `∫cos²φ dφ` and `∫sinφ cosφ dφ` over the band,
    ///
    /// ```text
    /// x̄ = Q_r · ∫cos²φ dφ · (sin λ_e − sin λ_w) / V
    /// ȳ = Q_r · ∫cos²φ dφ · (cos λ_w − cos λ_e) / V
    /// z̄ = Q_r · (sin²φ_n − sin²φ_s)/2 · Δλ / V
    /// ```
    ///
    /// Anchoring at the centroid (rather than the coordinate midpoint)
    /// kills the dipole term of the reduction error and makes the full
    /// shell exact for exterior observers: its centroid is the center of
    /// the sphere. Degenerate segments fall back to the midpoint embedding.
    pub fn equivalent_point(&self) -> Position {
        let volume = self.volume();
        if volume == 0.0 {
            let (longitude, latitude, radius) = self.center();
            return Position::from_spherical(longitude, latitude, radius);
        }
        let lambda_w = self.west.to_radians();
        let lambda_e = self.east.to_radians();
        let phi_s = self.south.to_radians();
        let phi_n = self.north.to_radians();
        let q_r = (self.outer.powi(4) - self.inner.powi(4)) / 4.0;
        let cos_sq_band =
            0.5 * (phi_n - phi_s) + 0.25 * ((2.0 * phi_n).sin() - (2.0 * phi_s).sin());
        let sin_sq_band = 0.5 * (phi_n.sin().powi(2) - phi_s.sin().powi(2));
        Position::new(
            q_r * cos_sq_band * (lambda_e.sin() - lambda_w.sin()) / volume,
            q_r * cos_sq_band * (lambda_w.cos() - lambda_e.cos()) / volume,
            q_r * sin_sq_band * (lambda_e - lambda_w) / volume,
        )
    }

    /// Check bound ordering, latitude range and radial sign.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("west", self.west),
            ("east", self.east),
            ("south", self.south),
            ("north", self.north),
            ("inner", self.inner),
            ("outer", self.outer),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { name, value });
            }
        }
        for (axis, lower, upper) in [
            ("longitude", self.west, self.east),
            ("latitude", self.south, self.north),
            ("radius", self.inner, self.outer),
        ] {
            if lower > upper {
                return Err(GeometryError::NegativeExtent { axis, lower, upper });
            }
        }
        for (name, value) in [("south", self.south), ("north", self.north)] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(GeometryError::LatitudeOutOfRange { name, value });
            }
        }
        for (name, value) in [("inner", self.inner), ("outer", self.outer)] {
            if value < 0.0 {
                return Err(GeometryError::NegativeRadius { name, value });
            }
        }
        Ok(())
    }
}
