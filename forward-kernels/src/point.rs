//! Gravity kernels for a point mass.
//!
//! Closed forms for the potential, the three acceleration components and
//! the six independent gradient-tensor components generated by a point
//! mass on a single observation point:
//!
//! ```text
//! V(p)    = G·m / ‖p − q‖
//! g_i(p)  = −G·m·Δᵢ / ‖p − q‖³
//! g_ij(p) = G·m·(3 ΔᵢΔⱼ − δᵢⱼ r²) / ‖p − q‖⁵
//! ```
//!
//! with `Δ = p − q`. Every function here is singular when the observation
//! point coincides with the source; that singularity is not removable (the
//! field truly diverges), so callers must guard the `r = 0` case before
//! invoking a kernel. The batch engine reports it as a distinguishable
//! error carrying the offending pair of indices.

use crate::constants::GRAVITATIONAL_CONSTANT;
use crate::geometry::Position;

/// Gravitational potential of a point mass, in J/kg.
pub fn gravity_pot(observer: &Position, source: &Position, mass: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * mass / observer.distance_to(source)
}

/// Easting component of the gravitational acceleration, in m/s².
pub fn gravity_e(observer: &Position, source: &Position, mass: f64) -> f64 {
    let [de, dn, du] = observer.displacement_from(source);
    let r_sq = de * de + dn * dn + du * du;
    -GRAVITATIONAL_CONSTANT * mass * de / (r_sq * r_sq.sqrt())
}

/// Northing component of the gravitational acceleration, in m/s².
pub fn gravity_n(observer: &Position, source: &Position, mass: f64) -> f64 {
    let [de, dn, du] = observer.displacement_from(source);
    let r_sq = de * de + dn * dn + du * du;
    -GRAVITATIONAL_CONSTANT * mass * dn / (r_sq * r_sq.sqrt())
}

/// Upward component of the gravitational acceleration, in m/s².
pub fn gravity_u(observer: &Position, source: &Position, mass: f64) -> f64 {
    let [de, dn, du] = observer.displacement_from(source);
    let r_sq = de * de + dn * dn + du * du;
    -GRAVITATIONAL_CONSTANT * mass * du / (r_sq * r_sq.sqrt())
}

#[inline]
fn tensor(observer: &Position, source: &Position, mass: f64, i: usize, j: usize) -> f64 {
    let d = observer.displacement_from(source);
    let r_sq = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
    let r5 = r_sq * r_sq * r_sq.sqrt();
    let delta = if i == j { r_sq } else { 0.0 };
    GRAVITATIONAL_CONSTANT * mass * (3.0 * d[i] * d[j] - delta) / r5
}

/// Easting-easting gravity-gradient component, in 1/s².
pub fn gravity_ee(observer: &Position, source: &Position, mass: f64) -> f64 {
    tensor(observer, source, mass, 0, 0)
}

/// Northing-northing gravity-gradient component, in 1/s².
pub fn gravity_nn(observer: &Position, source: &Position, mass: f64) -> f64 {
    tensor(observer, source, mass, 1, 1)
}

/// Upward-upward gravity-gradient component, in 1/s².
pub fn gravity_uu(observer: &Position, source: &Position, mass: f64) -> f64 {
    tensor(observer, source, mass, 2, 2)
}

/// Easting-northing gravity-gradient component, in 1/s².
pub fn gravity_en(observer: &Position, source: &Position, mass: f64) -> f64 {
    tensor(observer, source, mass, 0, 1)
}

/// Easting-upward gravity-gradient component, in 1/s².
pub fn gravity_eu(observer: &Position, source: &Position, mass: f64) -> f64 {
    tensor(observer, source, mass, 0, 2)
}

/// Northing-upward gravity-gradient component, in 1/s².
pub fn gravity_nu(observer: &Position, source: &Position, mass: f64) -> f64 {
    tensor(observer, source, mass, 1, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MASS: f64 = 2.5e8;

    #[test]
    fn test_potential_depends_only_on_distance() {
        let source = Position::new(10.0, -4.0, 7.0);
        let r = 123.0;
        // Several observers at the same distance in different directions.
        let observers = [
            Position::new(source.easting + r, source.northing, source.upward),
            Position::new(source.easting, source.northing - r, source.upward),
            Position::new(source.easting, source.northing, source.upward + r),
            Position::new(
                source.easting + r / 3.0_f64.sqrt(),
                source.northing + r / 3.0_f64.sqrt(),
                source.upward - r / 3.0_f64.sqrt(),
            ),
        ];
        let reference = gravity_pot(&observers[0], &source, MASS);
        for observer in &observers[1..] {
            assert_relative_eq!(
                gravity_pot(observer, &source, MASS),
                reference,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_acceleration_points_toward_the_mass() {
        let source = Position::origin();
        let above = Position::new(0.0, 0.0, 50.0);
        assert!(gravity_u(&above, &source, MASS) < 0.0);
        assert!(gravity_e(&above, &source, MASS).abs() < 1e-30);
        assert!(gravity_n(&above, &source, MASS).abs() < 1e-30);
    }

    #[test]
    fn test_acceleration_is_potential_gradient() {
        let source = Position::new(1.0, 2.0, 3.0);
        let observer = Position::new(40.0, -25.0, 18.0);
        let h = 1e-3;
        let fd = (gravity_pot(&Position::new(observer.easting + h, observer.northing, observer.upward), &source, MASS)
            - gravity_pot(&Position::new(observer.easting - h, observer.northing, observer.upward), &source, MASS))
            / (2.0 * h);
        assert_relative_eq!(gravity_e(&observer, &source, MASS), fd, max_relative = 1e-7);
    }

    #[test]
    fn test_tensor_is_acceleration_gradient() {
        let source = Position::origin();
        let observer = Position::new(31.0, -12.0, 25.0);
        let h = 1e-3;
        let fd = (gravity_e(&Position::new(observer.easting, observer.northing, observer.upward + h), &source, MASS)
            - gravity_e(&Position::new(observer.easting, observer.northing, observer.upward - h), &source, MASS))
            / (2.0 * h);
        assert_relative_eq!(gravity_eu(&observer, &source, MASS), fd, max_relative = 1e-7);
    }

    #[test]
    fn test_tensor_trace_vanishes() {
        let source = Position::new(-3.0, 8.0, 0.5);
        let observer = Position::new(17.0, 4.0, -22.0);
        let trace = gravity_ee(&observer, &source, MASS)
            + gravity_nn(&observer, &source, MASS)
            + gravity_uu(&observer, &source, MASS);
        let scale = gravity_ee(&observer, &source, MASS).abs();
        assert!(trace.abs() < 1e-12 * scale.max(f64::MIN_POSITIVE));
    }
}
