//! Corner kernels of the Nagy closed forms.
//!
//! Each function evaluates one corner term of the triple difference
//! `|||·|||` over the prism bounds. Arguments are the shifted corner
//! coordinates (bound − observation point) and the corner distance; the
//! caller owns the eight-corner sign alternation.
//!
//! The second-order kernels are the Nagy (2000) table for the second
//! derivatives of the inverse-distance volume integral:
//!
//! ```text
//! u_ee = −atan(n·u / e·r)    u_en = ln(u + r)
//! u_nn = −atan(e·u / n·r)    u_eu = ln(n + r)
//! u_uu = −atan(e·n / u·r)    u_nu = ln(e + r)
//! ```

use crate::safe::{safe_atan2, safe_ln};

/// Corner term of the inverse-distance volume integral (potential).
#[inline]
pub fn kernel_pot(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    let east_sq = east * east;
    let north_sq = north * north;
    let up_sq = up * up;
    east * north * safe_ln(up, east_sq + north_sq, radius)
        + east * up * safe_ln(north, east_sq + up_sq, radius)
        + north * up * safe_ln(east, north_sq + up_sq, radius)
        - 0.5 * east_sq * safe_atan2(north * up, east * radius)
        - 0.5 * north_sq * safe_atan2(east * up, north * radius)
        - 0.5 * up_sq * safe_atan2(east * north, up * radius)
}

/// Corner term of the easting derivative of the volume integral.
#[inline]
pub fn kernel_e(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    let east_sq = east * east;
    let north_sq = north * north;
    let up_sq = up * up;
    -(north * safe_ln(up, east_sq + north_sq, radius)
        + up * safe_ln(north, east_sq + up_sq, radius)
        - east * safe_atan2(north * up, east * radius))
}

/// Corner term of the northing derivative of the volume integral.
#[inline]
pub fn kernel_n(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    let east_sq = east * east;
    let north_sq = north * north;
    let up_sq = up * up;
    -(east * safe_ln(up, east_sq + north_sq, radius)
        + up * safe_ln(east, north_sq + up_sq, radius)
        - north * safe_atan2(east * up, north * radius))
}

/// Corner term of the upward derivative of the volume integral.
#[inline]
pub fn kernel_u(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    let east_sq = east * east;
    let north_sq = north * north;
    let up_sq = up * up;
    -(east * safe_ln(north, east_sq + up_sq, radius)
        + north * safe_ln(east, north_sq + up_sq, radius)
        - up * safe_atan2(east * north, up * radius))
}

/// Corner term of the easting-easting second derivative.
#[inline]
pub fn kernel_ee(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    -safe_atan2(north * up, east * radius)
}

/// Corner term of the northing-northing second derivative.
#[inline]
pub fn kernel_nn(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    -safe_atan2(east * up, north * radius)
}

/// Corner term of the upward-upward second derivative.
#[inline]
pub fn kernel_uu(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    -safe_atan2(east * north, up * radius)
}

/// Corner term of the easting-northing second derivative.
#[inline]
pub fn kernel_en(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    safe_ln(up, east * east + north * north, radius)
}

/// Corner term of the easting-upward second derivative.
#[inline]
pub fn kernel_eu(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    safe_ln(north, east * east + up * up, radius)
}

/// Corner term of the northing-upward second derivative.
#[inline]
pub fn kernel_nu(east: f64, north: f64, up: f64, radius: f64) -> f64 {
    safe_ln(east, north * north + up * up, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn radius(e: f64, n: f64, u: f64) -> f64 {
        (e * e + n * n + u * u).sqrt()
    }

    #[test]
    fn test_kernels_finite_on_singular_manifolds() {
        // The derivative relations between the families are checked through
        // the summed quantities in the gravity module; here every corner
        // kernel must stay finite on and off the singular manifolds.
        let kernels: [fn(f64, f64, f64, f64) -> f64; 10] = [
            kernel_pot, kernel_e, kernel_n, kernel_u, kernel_ee, kernel_nn, kernel_uu, kernel_en,
            kernel_eu, kernel_nu,
        ];
        for &(e, n, u) in &[
            (1.0, 2.0, 3.0),
            (0.0, 2.0, 3.0),
            (0.0, 0.0, 3.0),
            (0.0, 0.0, 0.0),
            (-1.0, 0.0, 0.0),
        ] {
            let r = radius(e, n, u);
            for kernel in kernels {
                assert!(kernel(e, n, u, r).is_finite());
            }
        }
    }

    #[test]
    fn test_diagonal_kernels_sum_to_quarter_turn() {
        // For positive shifts the three arctangent arguments satisfy
        // atan(nu/er) + atan(eu/nr) + atan(en/ur) = π/2.
        let (e, n, u) = (0.7, 1.3, 2.9);
        let r = radius(e, n, u);
        let sum = kernel_ee(e, n, u, r) + kernel_nn(e, n, u, r) + kernel_uu(e, n, u, r);
        assert_relative_eq!(sum, -std::f64::consts::FRAC_PI_2, max_relative = 1e-12);
    }

    #[test]
    fn test_kernel_symmetry_under_axis_exchange() {
        let (e, n, u) = (0.4, -1.1, 2.2);
        let r = radius(e, n, u);
        // Exchanging the easting and northing arguments maps kernel_e to
        // kernel_n and fixes kernel_en.
        assert_relative_eq!(kernel_e(e, n, u, r), kernel_n(n, e, u, r), max_relative = 1e-14);
        assert_relative_eq!(kernel_en(e, n, u, r), kernel_en(n, e, u, r), max_relative = 1e-14);
    }
}
