//! # Closed-form gravity and magnetic kernels
//!
//! Analytical kernels for forward modelling of gravitational and magnetic
//! field quantities produced by simple source bodies: point masses, point
//! dipoles, rectangular prisms and spherical-shell segments (tesseroids).
//! Each kernel maps one (source, observation point) pair to one scalar
//! field quantity; summation over many sources belongs to the companion
//! engine crate.
//!
//! ## Features
//!
//! - Potential, vector components and gradient-tensor components for
//!   gravity and magnetics, all in SI units and double precision
//! - Removable singularities (observation points on faces, edges, vertices
//!   or inside a body) evaluate to their finite limits through a single set
//!   of vetted safe primitives
//! - Pure functions of their arguments: no global state, trivially
//!   parallelizable
//!
//! ## Example
//!
//! ```rust
//! use geo_forward_kernels::prism::gravity::gravity_u;
//! use geo_forward_kernels::{Position, Prism};
//!
//! let prism = Prism::new(-100.0, 100.0, -100.0, 100.0, -300.0, -100.0);
//! let observer = Position::new(0.0, 0.0, 10.0);
//! // The body below pulls downward.
//! assert!(gravity_u(&observer, &prism, 2670.0) < 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod dipole;
pub mod error;
pub mod geometry;
pub mod point;
pub mod prism;
pub mod safe;
pub mod tesseroid;

pub use error::GeometryError;
pub use geometry::Position;
pub use prism::Prism;
pub use tesseroid::Tesseroid;
