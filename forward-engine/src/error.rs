//! Error types for forward evaluations.

use geo_forward_kernels::GeometryError;
use thiserror::Error;

use crate::request::{FieldQuantity, PhysicsDomain};

/// Errors raised by the forward-modelling engine.
///
/// Everything except [`ForwardError::ObserverOnSource`] is detected during
/// planning, before any kernel is evaluated. `ObserverOnSource` is the one
/// genuinely non-removable singularity: the field of a zero-size source
/// diverges at the source itself, so the engine refuses to return a number
/// there and reports which pair of inputs collided instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForwardError {
    /// An observation point coincides with a point-like source.
    #[error(
        "observation point {observer_index} coincides with point-like source {source_index}; \
         the field diverges there"
    )]
    ObserverOnSource {
        /// Index of the offending source in the input slice
        source_index: usize,
        /// Index of the offending observation point in the input slice
        observer_index: usize,
    },

    /// No kernel implements the requested combination.
    #[error("source {index} ({shape} with {property}): no kernel for {quantity:?} in the {domain:?} domain")]
    UnsupportedCombination {
        /// Index of the source in the input slice
        index: usize,
        /// Shape of the source
        shape: &'static str,
        /// Property carried by the source
        property: &'static str,
        /// Requested physics domain
        domain: PhysicsDomain,
        /// Requested quantity
        quantity: FieldQuantity,
    },

    /// A property variant that cannot be attached to the source's geometry.
    #[error("source {index}: a {shape} source cannot carry a {property} property")]
    IncompatibleProperty {
        /// Index of the source in the input slice
        index: usize,
        /// Shape of the source
        shape: &'static str,
        /// Property carried by the source
        property: &'static str,
    },

    /// Malformed source geometry.
    #[error("source {index}: invalid geometry")]
    InvalidGeometry {
        /// Index of the source in the input slice
        index: usize,
        /// The underlying validation failure
        #[source]
        source: GeometryError,
    },
}

/// A specialized `Result` type for forward evaluations.
pub type Result<T> = std::result::Result<T, ForwardError>;

impl ForwardError {
    /// Returns `true` for the non-removable singularity error.
    pub fn is_singularity(&self) -> bool {
        matches!(self, ForwardError::ObserverOnSource { .. })
    }

    /// Returns `true` for errors raised at dispatch time, before any kernel
    /// evaluation.
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            ForwardError::UnsupportedCombination { .. }
                | ForwardError::IncompatibleProperty { .. }
                | ForwardError::InvalidGeometry { .. }
        )
    }
}
