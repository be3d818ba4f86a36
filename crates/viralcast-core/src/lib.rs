//! # Viralcast Core
//!
//! Core types, errors, and constant tables for the Viralcast engagement
//! analytics engine.
//!
//! This crate provides the foundational building blocks used by the
//! computation crates:
//!
//! - **Data Types**: [`FeatureVector`] (one batch row), [`RegressionFit`],
//!   and [`OscillatorState`].
//!
//! - **Error Types**: [`CoreError`] for contract violations — malformed
//!   shapes and non-finite inputs. Statistical degeneracy is never an
//!   error; see the [`error`] module docs.
//!
//! - **Constant Tables**: the golden ratio, the harmonic reference grid,
//!   and the platform / content-type multiplier tables, plus
//!   [`EngineTables`] for overriding them in tests.
//!
//! - **Utilities**: small numeric helpers (OLS fit, cosine similarity,
//!   moments) shared by the estimators.
//!
//! ## Example
//!
//! ```rust
//! use viralcast_core::{constants::PHI, utils::linear_fit};
//!
//! let xs = [1.0, 2.0, 3.0];
//! let ys = [2.0, 4.0, 6.0];
//! let fit = linear_fit(&xs, &ys).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! assert!(PHI > 1.6);
//! ```

#![forbid(unsafe_code)]

pub mod constants;
pub mod error;
pub mod types;
pub mod utils;

pub use constants::EngineTables;
pub use error::{CoreError, CoreResult};
pub use types::{FeatureVector, OscillatorState, RegressionFit};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// ```rust
/// use viralcast_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::constants::{EngineTables, INV_PHI, PHI};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{FeatureVector, OscillatorState, RegressionFit};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_valid() {
        assert!(!VERSION.is_empty());
    }
}
