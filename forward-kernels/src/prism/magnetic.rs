//! Magnetic forward modelling for rectangular prisms.
//!
//! There is no separate magnetic-prism formula: because Maxwell's equations
//! are linear in the magnetization, the field is the second-derivative
//! tensor `U` of the inverse-distance volume integral contracted with the
//! magnetization vector,
//!
//! ```text
//! B(p) = (μ0 / 4π) · U(p) · M
//! ```
//!
//! with `u_ij` the summed second-order corner kernels. The scalar potential
//! uses the first-order kernels instead: `ψ = −(μ0/4π)·M·∇U`, so that
//! `B = −∇ψ` outside the body. Inside the body the contraction yields the
//! potential-gradient part of the field only, matching the convention of
//! the classic prism formulas; no `μ0·M` term is added.

use std::f64::consts::PI;

use crate::constants::VACUUM_MAGNETIC_PERMEABILITY;
use crate::geometry::Position;

use super::{kernels, Prism};

/// All three components of the prism magnetic field at once, in T.
///
/// Returns `(b_e, b_n, b_u)`. The six tensor sums are computed once and
/// contracted with the magnetization, which is cheaper than three
/// per-component calls.
pub fn magnetic_field(
    observer: &Position,
    prism: &Prism,
    magnetization: &[f64; 3],
) -> (f64, f64, f64) {
    let u_ee = prism.corner_sum(observer, kernels::kernel_ee);
    let u_nn = prism.corner_sum(observer, kernels::kernel_nn);
    let u_uu = prism.corner_sum(observer, kernels::kernel_uu);
    let u_en = prism.corner_sum(observer, kernels::kernel_en);
    let u_eu = prism.corner_sum(observer, kernels::kernel_eu);
    let u_nu = prism.corner_sum(observer, kernels::kernel_nu);
    let c_m = VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI);
    (
        c_m * (magnetization[0] * u_ee + magnetization[1] * u_en + magnetization[2] * u_eu),
        c_m * (magnetization[0] * u_en + magnetization[1] * u_nn + magnetization[2] * u_nu),
        c_m * (magnetization[0] * u_eu + magnetization[1] * u_nu + magnetization[2] * u_uu),
    )
}

/// Easting component of the prism magnetic field, in T.
pub fn magnetic_e(observer: &Position, prism: &Prism, magnetization: &[f64; 3]) -> f64 {
    let u_ee = prism.corner_sum(observer, kernels::kernel_ee);
    let u_en = prism.corner_sum(observer, kernels::kernel_en);
    let u_eu = prism.corner_sum(observer, kernels::kernel_eu);
    VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI)
        * (magnetization[0] * u_ee + magnetization[1] * u_en + magnetization[2] * u_eu)
}

/// Northing component of the prism magnetic field, in T.
pub fn magnetic_n(observer: &Position, prism: &Prism, magnetization: &[f64; 3]) -> f64 {
    let u_en = prism.corner_sum(observer, kernels::kernel_en);
    let u_nn = prism.corner_sum(observer, kernels::kernel_nn);
    let u_nu = prism.corner_sum(observer, kernels::kernel_nu);
    VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI)
        * (magnetization[0] * u_en + magnetization[1] * u_nn + magnetization[2] * u_nu)
}

/// Upward component of the prism magnetic field, in T.
pub fn magnetic_u(observer: &Position, prism: &Prism, magnetization: &[f64; 3]) -> f64 {
    let u_eu = prism.corner_sum(observer, kernels::kernel_eu);
    let u_nu = prism.corner_sum(observer, kernels::kernel_nu);
    let u_uu = prism.corner_sum(observer, kernels::kernel_uu);
    VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI)
        * (magnetization[0] * u_eu + magnetization[1] * u_nu + magnetization[2] * u_uu)
}

/// Scalar magnetic potential of the prism, in T·m, with `B = −∇ψ` outside
/// the body.
pub fn magnetic_pot(observer: &Position, prism: &Prism, magnetization: &[f64; 3]) -> f64 {
    let du_e = prism.corner_sum(observer, kernels::kernel_e);
    let du_n = prism.corner_sum(observer, kernels::kernel_n);
    let du_u = prism.corner_sum(observer, kernels::kernel_u);
    -VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI)
        * (magnetization[0] * du_e + magnetization[1] * du_n + magnetization[2] * du_u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dipole;
    use approx::assert_relative_eq;

    const MAGNETIZATION: [f64; 3] = [0.8, -0.3, 1.5];

    fn unit_cube() -> Prism {
        Prism::new(-0.5, 0.5, -0.5, 0.5, -0.5, 0.5)
    }

    #[test]
    fn test_components_match_full_field() {
        let cube = unit_cube();
        let observer = Position::new(1.4, -2.2, 0.9);
        let (be, bn, bu) = magnetic_field(&observer, &cube, &MAGNETIZATION);
        assert_relative_eq!(magnetic_e(&observer, &cube, &MAGNETIZATION), be);
        assert_relative_eq!(magnetic_n(&observer, &cube, &MAGNETIZATION), bn);
        assert_relative_eq!(magnetic_u(&observer, &cube, &MAGNETIZATION), bu);
    }

    #[test]
    fn test_far_field_approaches_dipole() {
        let cube = unit_cube();
        let moment = [
            MAGNETIZATION[0] * cube.volume(),
            MAGNETIZATION[1] * cube.volume(),
            MAGNETIZATION[2] * cube.volume(),
        ];
        let center = cube.center();
        // Larger multiples would start losing digits to cancellation in the
        // corner sums, which is a property of the closed forms themselves.
        let mut previous_error = f64::INFINITY;
        for &distance in &[10.0, 100.0] {
            let observer = Position::new(0.6 * distance, 0.0, 0.8 * distance);
            let (be, bn, bu) = magnetic_field(&observer, &cube, &MAGNETIZATION);
            let (de, dn, du) = dipole::magnetic_field(&observer, &center, &moment);
            let norm = (de * de + dn * dn + du * du).sqrt();
            let error = (((be - de).powi(2) + (bn - dn).powi(2) + (bu - du).powi(2)).sqrt()) / norm;
            assert!(error < previous_error);
            previous_error = error;
        }
        assert!(previous_error < 1e-4);
    }

    #[test]
    fn test_potential_far_field_approaches_dipole() {
        let cube = unit_cube();
        let moment = [
            MAGNETIZATION[0] * cube.volume(),
            MAGNETIZATION[1] * cube.volume(),
            MAGNETIZATION[2] * cube.volume(),
        ];
        let observer = Position::new(30.0, -40.0, 50.0);
        assert_relative_eq!(
            magnetic_pot(&observer, &cube, &MAGNETIZATION),
            dipole::magnetic_pot(&observer, &cube.center(), &moment),
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_field_is_negative_potential_gradient() {
        let cube = unit_cube();
        let observer = Position::new(1.1, 0.4, -1.7);
        let h = 1e-4;
        let fd = -(magnetic_pot(&Position::new(observer.easting + h, observer.northing, observer.upward), &cube, &MAGNETIZATION)
            - magnetic_pot(&Position::new(observer.easting - h, observer.northing, observer.upward), &cube, &MAGNETIZATION))
            / (2.0 * h);
        assert_relative_eq!(
            magnetic_e(&observer, &cube, &MAGNETIZATION),
            fd,
            max_relative = 1e-5
        );
    }

    #[test]
    fn test_boundary_observers_are_finite() {
        let cube = unit_cube();
        for observer in [
            Position::new(0.0, 0.0, 0.5),
            Position::new(0.5, 0.5, 0.5),
            Position::new(0.5, 0.5, -3.0),
            Position::new(0.1, 0.2, -0.3),
        ] {
            let (be, bn, bu) = magnetic_field(&observer, &cube, &MAGNETIZATION);
            assert!(be.is_finite() && bn.is_finite() && bu.is_finite());
            assert!(magnetic_pot(&observer, &cube, &MAGNETIZATION).is_finite());
        }
    }

    #[test]
    fn test_transverse_magnetization_gives_no_axial_anomaly_at_axis() {
        // Purely easting magnetization: by symmetry b_u vanishes on the
        // vertical axis through the cube center.
        let cube = unit_cube();
        let observer = Position::new(0.0, 0.0, 3.0);
        let b_u = magnetic_u(&observer, &cube, &[1.0, 0.0, 0.0]);
        assert!(b_u.abs() < 1e-20);
    }
}
