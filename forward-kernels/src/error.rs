//! Error types for source-geometry validation.

use thiserror::Error;

/// Errors raised when a body's parameters do not describe a valid geometry.
///
/// These are detected by the `validate` methods on [`crate::Prism`] and
/// [`crate::Tesseroid`] before any field evaluation takes place. A swapped
/// bound pair is never silently reordered: doing so would flip the sign of
/// every corner term and hide the caller's bug behind a wrong-magnitude
/// result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A lower bound exceeds its paired upper bound.
    #[error("negative extent on the {axis} axis: {lower} > {upper}")]
    NegativeExtent {
        /// Axis on which the bounds are swapped
        axis: &'static str,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// A radial bound is negative.
    #[error("negative {name} radius: {value}")]
    NegativeRadius {
        /// Which radial bound is negative
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// A latitude bound lies outside [-90°, 90°].
    #[error("{name} latitude {value} outside [-90°, 90°]")]
    LatitudeOutOfRange {
        /// Which latitude bound is out of range
        name: &'static str,
        /// The offending value in degrees
        value: f64,
    },

    /// A coordinate or bound is NaN or infinite.
    #[error("non-finite {name}: {value}")]
    NonFinite {
        /// Name of the offending parameter
        name: &'static str,
        /// The offending value
        value: f64,
    },
}

/// A specialized `Result` type for geometry validation.
pub type Result<T> = std::result::Result<T, GeometryError>;

impl GeometryError {
    /// Returns `true` if the error is a swapped bound pair.
    pub fn is_extent_error(&self) -> bool {
        matches!(self, GeometryError::NegativeExtent { .. })
    }

    /// Returns `true` if the error is an out-of-range spherical bound.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            GeometryError::NegativeRadius { .. } | GeometryError::LatitudeOutOfRange { .. }
        )
    }
}
