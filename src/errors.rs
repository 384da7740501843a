//! Shared error types and the input checks used across submodules.

use thiserror::Error;

use crate::math::Scalar;

/// Top-level error type for the crate.
///
/// Every variant is a domain error: the inputs were numbers, but not numbers
/// the formula is defined for. Nothing is clamped or corrected on the way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RfError {
    /// A quantity that must be strictly positive was zero or negative.
    #[error("{name} must be > 0, got {value}")]
    NonPositive {
        /// Name of the offending argument.
        name: &'static str,
        /// Value that was supplied.
        value: Scalar,
    },
    /// A quantity that must be non-negative was negative.
    #[error("{name} must be >= 0, got {value}")]
    Negative {
        /// Name of the offending argument.
        name: &'static str,
        /// Value that was supplied.
        value: Scalar,
    },
    /// A quantity used as a divisor was zero.
    #[error("{name} must be non-zero")]
    Zero {
        /// Name of the offending argument.
        name: &'static str,
    },
    /// NaN or infinite input.
    #[error("{name} must be finite")]
    NotFinite {
        /// Name of the offending argument.
        name: &'static str,
    },
    /// A Fresnel evaluation point does not lie strictly inside the path.
    #[error("point at {distance} m lies outside a {total} m path")]
    OutsidePath {
        /// Distance from the first terminal to the point.
        distance: Scalar,
        /// Total path length.
        total: Scalar,
    },
    /// Fresnel zones are numbered from one.
    #[error("Fresnel zone order must be >= 1")]
    InvalidOrder,
    /// A bounded model coefficient fell outside its interval.
    #[error("{name} must lie in [{min}, {max}), got {value}")]
    OutOfRange {
        /// Name of the offending argument.
        name: &'static str,
        /// Value that was supplied.
        value: Scalar,
        /// Inclusive lower bound.
        min: Scalar,
        /// Exclusive upper bound.
        max: Scalar,
    },
    /// A list input (layers, poles) was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// A mode string did not name a supported variant.
    #[error("unsupported mode: {0}")]
    UnknownMode(String),
    /// Array operands could not be broadcast to a common shape.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type for the crate.
pub type RfResult<T> = Result<T, RfError>;

/// Rejects NaN and infinities.
pub(crate) fn require_finite(name: &'static str, value: Scalar) -> RfResult<Scalar> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RfError::NotFinite { name })
    }
}

/// Accepts finite values strictly greater than zero.
pub(crate) fn require_positive(name: &'static str, value: Scalar) -> RfResult<Scalar> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(RfError::NonPositive { name, value })
    }
}

/// Accepts finite values greater than or equal to zero.
pub(crate) fn require_non_negative(name: &'static str, value: Scalar) -> RfResult<Scalar> {
    require_finite(name, value)?;
    if value < 0.0 {
        Err(RfError::Negative { name, value })
    } else {
        Ok(value)
    }
}

/// Accepts finite, non-zero values of either sign.
pub(crate) fn require_nonzero(name: &'static str, value: Scalar) -> RfResult<Scalar> {
    require_finite(name, value)?;
    if value == 0.0 {
        Err(RfError::Zero { name })
    } else {
        Ok(value)
    }
}
