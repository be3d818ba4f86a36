//! Error types for the Viralcast analytics engine.
//!
//! All errors in this crate are *contract violations*: malformed shapes,
//! mismatched dimensions, or non-finite values where finiteness is
//! required. Statistically degenerate inputs (empty series, zero
//! variance, too few regression points) are **not** errors — every
//! estimator documents and returns a neutral default for those, so a
//! caller never has to distinguish "no signal" from "bad call".
//!
//! # Example
//!
//! ```rust
//! use viralcast_core::error::{CoreError, CoreResult};
//!
//! fn check_pair(freqs: &[f64], amps: &[f64]) -> CoreResult<()> {
//!     if freqs.len() != amps.len() {
//!         return Err(CoreError::length_mismatch(
//!             "frequencies/amplitudes",
//!             freqs.len(),
//!             amps.len(),
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// A specialized `Result` type for engine operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Contract-violation errors for the analytics engine.
///
/// Every variant identifies the violated precondition and the offending
/// values, so batch callers can log a row failure without re-running the
/// computation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Two arrays that must have equal lengths do not.
    #[error("Length mismatch for {what}: {left} vs {right}")]
    LengthMismatch {
        /// Which pair of inputs disagreed
        what: &'static str,
        /// Length of the first input
        left: usize,
        /// Length of the second input
        right: usize,
    },

    /// An input that must be non-empty is empty.
    #[error("Empty input: {what} requires at least {required} element(s)")]
    EmptyInput {
        /// Which input was empty
        what: &'static str,
        /// Minimum required length
        required: usize,
    },

    /// A fixed-width input has the wrong length.
    #[error("Invalid shape for {what}: expected {expected}, got {actual}")]
    InvalidShape {
        /// Which input had the wrong shape
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// A value that must be finite is NaN or infinite.
    #[error("Non-finite value in {what}: {value}")]
    NonFinite {
        /// Which input contained the value
        what: &'static str,
        /// The offending value
        value: f64,
    },

    /// A scalar parameter is outside its documented domain.
    #[error("Parameter {what} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        /// Which parameter was out of range
        what: &'static str,
        /// The offending value
        value: f64,
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },
}

impl CoreError {
    /// Creates a new length-mismatch error.
    #[must_use]
    pub fn length_mismatch(what: &'static str, left: usize, right: usize) -> Self {
        Self::LengthMismatch { what, left, right }
    }

    /// Creates a new empty-input error.
    #[must_use]
    pub fn empty_input(what: &'static str, required: usize) -> Self {
        Self::EmptyInput { what, required }
    }

    /// Creates a new invalid-shape error.
    #[must_use]
    pub fn invalid_shape(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidShape {
            what,
            expected,
            actual,
        }
    }

    /// Creates a new non-finite error.
    #[must_use]
    pub fn non_finite(what: &'static str, value: f64) -> Self {
        Self::NonFinite { what, value }
    }

    /// Creates a new out-of-range error.
    #[must_use]
    pub fn out_of_range(what: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }
}

/// Verifies that every element of `data` is finite.
///
/// Returns the first non-finite value as a [`CoreError::NonFinite`].
pub fn ensure_finite(what: &'static str, data: &[f64]) -> CoreResult<()> {
    match data.iter().copied().find(|v| !v.is_finite()) {
        Some(value) => Err(CoreError::non_finite(what, value)),
        None => Ok(()),
    }
}

/// Verifies that a scalar is finite.
pub fn ensure_finite_scalar(what: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::non_finite(what, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = CoreError::length_mismatch("frequencies/amplitudes", 3, 5);
        let msg = err.to_string();
        assert!(msg.contains("frequencies/amplitudes"));
        assert!(msg.contains('3'));
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_ensure_finite_catches_nan() {
        let data = [1.0, f64::NAN, 2.0];
        assert!(ensure_finite("series", &data).is_err());
        assert!(ensure_finite("series", &[1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_ensure_finite_catches_infinity() {
        let err = ensure_finite("boosts", &[0.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, CoreError::NonFinite { .. }));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = CoreError::out_of_range("target_hour", 25.0, 0.0, 23.0);
        assert!(err.to_string().contains("target_hour"));
    }
}
