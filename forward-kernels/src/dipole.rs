//! Magnetic kernels for a point dipole.
//!
//! The magnetic field of a dipole with moment `m` (A·m²) at `q`, observed
//! at `p`, is
//!
//! ```text
//! B(p) = (μ0 / 4π) · [ 3 (m·Δ) Δ / r⁵ − m / r³ ],    Δ = p − q
//! ```
//!
//! together with the scalar potential `ψ = (μ0/4π)(m·Δ)/r³` (so that
//! `B = −∇ψ`) and the six independent components of the symmetric gradient
//! tensor `∂Bᵢ/∂pⱼ`. As with the point mass, `r = 0` is a true singularity
//! and must be guarded by the caller.

use std::f64::consts::PI;

use crate::constants::VACUUM_MAGNETIC_PERMEABILITY;
use crate::geometry::Position;

/// All three components of the dipole magnetic field at once, in T.
///
/// Returns `(b_e, b_n, b_u)`. Prefer this over the per-component functions
/// when the full vector is needed: the displacement, distance powers and
/// dot product are computed once.
pub fn magnetic_field(observer: &Position, source: &Position, moment: &[f64; 3]) -> (f64, f64, f64) {
    let [de, dn, du] = observer.displacement_from(source);
    let r_sq = de * de + dn * dn + du * du;
    let r = r_sq.sqrt();
    let r3 = r_sq * r;
    let r5 = r_sq * r3;
    let dot = moment[0] * de + moment[1] * dn + moment[2] * du;
    let c_m = VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI);
    (
        c_m * (3.0 * dot * de / r5 - moment[0] / r3),
        c_m * (3.0 * dot * dn / r5 - moment[1] / r3),
        c_m * (3.0 * dot * du / r5 - moment[2] / r3),
    )
}

/// Easting component of the dipole magnetic field, in T.
pub fn magnetic_e(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    magnetic_field(observer, source, moment).0
}

/// Northing component of the dipole magnetic field, in T.
pub fn magnetic_n(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    magnetic_field(observer, source, moment).1
}

/// Upward component of the dipole magnetic field, in T.
pub fn magnetic_u(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    magnetic_field(observer, source, moment).2
}

/// Scalar magnetic potential of the dipole, in T·m, with `B = −∇ψ`.
pub fn magnetic_pot(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    let [de, dn, du] = observer.displacement_from(source);
    let r_sq = de * de + dn * dn + du * du;
    let r3 = r_sq * r_sq.sqrt();
    let dot = moment[0] * de + moment[1] * dn + moment[2] * du;
    VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI) * dot / r3
}

#[inline]
fn gradient(observer: &Position, source: &Position, moment: &[f64; 3], i: usize, j: usize) -> f64 {
    let d = observer.displacement_from(source);
    let r_sq = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
    let r = r_sq.sqrt();
    let r5 = r_sq * r_sq * r;
    let r7 = r_sq * r5;
    let dot = moment[0] * d[0] + moment[1] * d[1] + moment[2] * d[2];
    let delta = if i == j { dot } else { 0.0 };
    VACUUM_MAGNETIC_PERMEABILITY / (4.0 * PI)
        * 3.0
        * ((moment[j] * d[i] + moment[i] * d[j] + delta) / r5 - 5.0 * dot * d[i] * d[j] / r7)
}

/// Easting-easting component of the field gradient tensor, in T/m.
pub fn magnetic_ee(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    gradient(observer, source, moment, 0, 0)
}

/// Northing-northing component of the field gradient tensor, in T/m.
pub fn magnetic_nn(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    gradient(observer, source, moment, 1, 1)
}

/// Upward-upward component of the field gradient tensor, in T/m.
pub fn magnetic_uu(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    gradient(observer, source, moment, 2, 2)
}

/// Easting-northing component of the field gradient tensor, in T/m.
pub fn magnetic_en(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    gradient(observer, source, moment, 0, 1)
}

/// Easting-upward component of the field gradient tensor, in T/m.
pub fn magnetic_eu(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    gradient(observer, source, moment, 0, 2)
}

/// Northing-upward component of the field gradient tensor, in T/m.
pub fn magnetic_nu(observer: &Position, source: &Position, moment: &[f64; 3]) -> f64 {
    gradient(observer, source, moment, 1, 2)
}
