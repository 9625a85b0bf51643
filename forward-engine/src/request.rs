//! Field-quantity selection for forward evaluations.

use serde::{Deserialize, Serialize};

/// Physics domain of a forward computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysicsDomain {
    /// Gravitational quantities of mass/density sources
    Gravity,
    /// Magnetic quantities of moment/magnetization sources
    Magnetic,
}

/// Cartesian component of a vector field quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldComponent {
    /// Easting component
    Easting,
    /// Northing component
    Northing,
    /// Upward component
    Upward,
}

/// Independent component of the symmetric second-derivative tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TensorComponent {
    /// Easting-easting diagonal component
    Ee,
    /// Northing-northing diagonal component
    Nn,
    /// Upward-upward diagonal component
    Uu,
    /// Easting-northing off-diagonal component
    En,
    /// Easting-upward off-diagonal component
    Eu,
    /// Northing-upward off-diagonal component
    Nu,
}

/// Which quantity a forward evaluation computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldQuantity {
    /// Scalar potential
    Potential,
    /// One vector field component
    Component(FieldComponent),
    /// One gradient-tensor component
    Tensor(TensorComponent),
}

/// A complete field request: which quantity, in which physics domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequest {
    /// Physics domain
    pub domain: PhysicsDomain,
    /// Requested quantity
    pub quantity: FieldQuantity,
}

impl FieldRequest {
    /// A gravity request for the given quantity.
    pub fn gravity(quantity: FieldQuantity) -> Self {
        Self {
            domain: PhysicsDomain::Gravity,
            quantity,
        }
    }

    /// A magnetic request for the given quantity.
    pub fn magnetic(quantity: FieldQuantity) -> Self {
        Self {
            domain: PhysicsDomain::Magnetic,
            quantity,
        }
    }
}
