//! # Gravity and magnetic forward-modelling engine
//!
//! Batch evaluation of gravitational and magnetic field quantities from
//! collections of source bodies (point masses, dipoles, rectangular prisms,
//! tesseroids) on collections of observation points. The closed-form
//! single-pair kernels live in the companion kernels crate; this crate adds
//! the data model, the error taxonomy, the dense all-pairs accumulation
//! loop with scalar and parallel execution, and the dispatch layer that
//! selects the kernel family for a request.
//!
//! ## Features
//!
//! - Dense all-pairs accumulation, linear in `|sources| × |observers|`
//! - Scalar reference path plus a rayon-parallel path (default-on
//!   `parallel` cargo feature), selectable per call
//! - Fail-fast validation: invalid geometry and unsupported combinations
//!   are reported before any kernel runs, with the offending source index
//!
//! ## Example
//!
//! ```rust
//! use geo_forward_engine::kernels::{Position, Prism};
//! use geo_forward_engine::{
//!     evaluate, EngineConfig, FieldComponent, FieldQuantity, FieldRequest, Source,
//! };
//!
//! let sources = vec![Source::prism(
//!     Prism::new(-100.0, 100.0, -100.0, 100.0, -300.0, -100.0),
//!     2670.0,
//! )];
//! let observers = vec![Position::new(0.0, 0.0, 10.0), Position::new(50.0, 0.0, 10.0)];
//! let request = FieldRequest::gravity(FieldQuantity::Component(FieldComponent::Upward));
//! let g_u = evaluate(&sources, &observers, request, &EngineConfig::default()).unwrap();
//! assert_eq!(g_u.len(), 2);
//! assert!(g_u[0] < 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod request;
pub mod source;

pub use engine::{
    evaluate, evaluate_field, evaluate_tensor, parallel_available, EngineConfig, ExecutionMode,
};
pub use error::ForwardError;
pub use request::{FieldComponent, FieldQuantity, FieldRequest, PhysicsDomain, TensorComponent};
pub use source::{Source, SourceGeometry, SourceProperty};

/// Re-export of the kernel crate for direct access to the single-pair
/// kernels and geometry types.
pub use geo_forward_kernels as kernels;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
