//! Physical constants shared by every kernel family.
//!
//! All kernels assume SI units throughout; these constants are the only
//! global configuration in the crate and are never mutated.

/// Newtonian gravitational constant in m³/(kg·s²) (CODATA 2018).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

/// Vacuum magnetic permeability in H/m (CODATA 2018).
pub const VACUUM_MAGNETIC_PERMEABILITY: f64 = 1.25663706212e-6;
