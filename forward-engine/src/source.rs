//! Source body definitions.
//!
//! A source pairs a geometric shape with exactly one physical property.
//! Gravity sources carry a mass (points) or a density (extended bodies);
//! magnetic sources carry a dipole moment (points) or a magnetization
//! vector (extended bodies). Sources are immutable once constructed and
//! only live for the duration of a forward call.

use geo_forward_kernels::error::Result as GeometryResult;
use geo_forward_kernels::{Position, Prism, Tesseroid};
use serde::{Deserialize, Serialize};

/// Geometric variant of a source body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SourceGeometry {
    /// Zero-size source at a single location
    Point(Position),
    /// Axis-aligned rectangular prism
    Prism(Prism),
    /// Spherical-shell segment
    Tesseroid(Tesseroid),
}

/// Physical property carried by a source body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SourceProperty {
    /// Total mass in kg (point sources, gravity)
    Mass(f64),
    /// Homogeneous density in kg/m³ (extended bodies, gravity)
    Density(f64),
    /// Dipole moment vector in A·m² (point sources, magnetics)
    Moment([f64; 3]),
    /// Homogeneous magnetization vector in A/m (extended bodies, magnetics)
    Magnetization([f64; 3]),
}

/// A source body: geometry plus physical property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Shape and location of the body
    pub geometry: SourceGeometry,
    /// Physical property of the body
    pub property: SourceProperty,
}

impl Source {
    /// Point mass at `position` with total `mass` in kg.
    pub fn point_mass(position: Position, mass: f64) -> Self {
        Self {
            geometry: SourceGeometry::Point(position),
            property: SourceProperty::Mass(mass),
        }
    }

    /// Point dipole at `position` with `moment` in A·m².
    pub fn dipole(position: Position, moment: [f64; 3]) -> Self {
        Self {
            geometry: SourceGeometry::Point(position),
            property: SourceProperty::Moment(moment),
        }
    }

    /// Prism with homogeneous `density` in kg/m³.
    pub fn prism(prism: Prism, density: f64) -> Self {
        Self {
            geometry: SourceGeometry::Prism(prism),
            property: SourceProperty::Density(density),
        }
    }

    /// Prism with homogeneous `magnetization` in A/m.
    pub fn magnetized_prism(prism: Prism, magnetization: [f64; 3]) -> Self {
        Self {
            geometry: SourceGeometry::Prism(prism),
            property: SourceProperty::Magnetization(magnetization),
        }
    }

    /// Tesseroid with homogeneous `density` in kg/m³.
    pub fn tesseroid(tesseroid: Tesseroid, density: f64) -> Self {
        Self {
            geometry: SourceGeometry::Tesseroid(tesseroid),
            property: SourceProperty::Density(density),
        }
    }

    /// Tesseroid with homogeneous `magnetization` in A/m.
    pub fn magnetized_tesseroid(tesseroid: Tesseroid, magnetization: [f64; 3]) -> Self {
        Self {
            geometry: SourceGeometry::Tesseroid(tesseroid),
            property: SourceProperty::Magnetization(magnetization),
        }
    }

    /// Validate the geometric parameters of the body.
    pub fn validate(&self) -> GeometryResult<()> {
        match &self.geometry {
            SourceGeometry::Point(position) => position.validate(),
            SourceGeometry::Prism(prism) => prism.validate(),
            SourceGeometry::Tesseroid(tesseroid) => tesseroid.validate(),
        }
    }

    /// Shape name for diagnostics.
    pub(crate) fn shape_name(&self) -> &'static str {
        match self.geometry {
            SourceGeometry::Point(_) => "point",
            SourceGeometry::Prism(_) => "prism",
            SourceGeometry::Tesseroid(_) => "tesseroid",
        }
    }

    /// Property name for diagnostics.
    pub(crate) fn property_name(&self) -> &'static str {
        match self.property {
            SourceProperty::Mass(_) => "mass",
            SourceProperty::Density(_) => "density",
            SourceProperty::Moment(_) => "moment",
            SourceProperty::Magnetization(_) => "magnetization",
        }
    }
}
