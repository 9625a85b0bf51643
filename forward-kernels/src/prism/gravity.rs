//! Gravity forward modelling for rectangular prisms.
//!
//! Potential, acceleration components and gravity-gradient tensor of a
//! prism with homogeneous density, as `G·ρ` times the signed eight-corner
//! sums of the Nagy antiderivatives. All quantities are finite for
//! observation points on the boundary and inside the body; inside, the
//! tensor trace equals `−4πGρ` (Poisson) instead of 0 (Laplace).

use crate::constants::GRAVITATIONAL_CONSTANT;
use crate::geometry::Position;

use super::{kernels, Prism};

/// Gravitational potential of the prism, in J/kg.
pub fn gravity_pot(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_pot)
}

/// Easting component of the gravitational acceleration, in m/s².
pub fn gravity_e(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_e)
}

/// Northing component of the gravitational acceleration, in m/s².
pub fn gravity_n(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_n)
}

/// Upward component of the gravitational acceleration, in m/s².
pub fn gravity_u(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_u)
}

/// Easting-easting gravity-gradient component, in 1/s².
pub fn gravity_ee(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_ee)
}

/// Northing-northing gravity-gradient component, in 1/s².
pub fn gravity_nn(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_nn)
}

/// Upward-upward gravity-gradient component, in 1/s².
pub fn gravity_uu(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_uu)
}

/// Easting-northing gravity-gradient component, in 1/s².
pub fn gravity_en(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_en)
}

/// Easting-upward gravity-gradient component, in 1/s².
pub fn gravity_eu(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_eu)
}

/// Northing-upward gravity-gradient component, in 1/s².
pub fn gravity_nu(observer: &Position, prism: &Prism, density: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * density * prism.corner_sum(observer, kernels::kernel_nu)
}
