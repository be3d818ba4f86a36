//! # Viralcast Engine
//!
//! Batch feature-extraction and simulation engine that scores
//! short-form content for predicted engagement and viral propagation.
//! A deterministic (given a seed) numeric transformation from input
//! feature vectors to output vectors — no I/O, no persistence, no
//! shared mutable state.
//!
//! # Components
//!
//! - **Fractal Analysis** ([`fractal`]): box-counting dimension,
//!   lacunarity, Hurst exponent, and golden-ratio positional alignment
//!   of a single time series.
//! - **Composite Scoring** ([`scoring`]): golden-ratio resonance,
//!   pairwise coherence, and bounded composite/viral-potential scores.
//! - **Virality & Growth** ([`virality`]): engagement, K-factor, trend
//!   and audience matching, posting-time optimization, and a seeded
//!   stochastic view-growth simulator.
//! - **Batch Execution** ([`batch`]): row-parallel execution over many
//!   content items with order-preserving, fixed-layout output.
//!
//! # Example
//!
//! ```rust
//! use viralcast_engine::prelude::*;
//!
//! let executor = BatchExecutor::default();
//! let rows = vec![FeatureVector {
//!     frequencies: vec![256.0, 341.3],
//!     amplitudes: vec![1.0, 0.8],
//!     engagement_rate: 55.0,
//!     ..Default::default()
//! }];
//!
//! let outcome = executor.score_batch(&rows).unwrap();
//! assert_eq!(outcome.rows.dim(), (1, 4));
//! ```

#![forbid(unsafe_code)]

pub mod batch;
pub mod fractal;
pub mod scoring;
pub mod virality;

pub use batch::{
    BatchConfig, BatchError, BatchExecutor, BatchOutcome, FailurePolicy, RowFailure,
    SCORE_COLUMNS, VIRALITY_COLUMNS,
};
pub use fractal::{
    box_counting_dimension, box_counting_fit, hurst_exponent, lacunarity, phi_alignment,
    DEFAULT_BOX_SCALES,
};
pub use scoring::CompositeScorer;
pub use virality::{peak_views, GrowthConfig, GrowthState, ViralityEngine, WEEK_HOURS};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Unified error type for engine operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A caller contract violation in an estimator
    #[error("contract violation: {0}")]
    Contract(#[from] viralcast_core::CoreError),

    /// A batch-level failure
    #[error("batch error: {0}")]
    Batch(#[from] batch::BatchError),
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::{BatchConfig, BatchExecutor, BatchOutcome, FailurePolicy};
    pub use crate::scoring::CompositeScorer;
    pub use crate::virality::{GrowthConfig, ViralityEngine};
    pub use crate::{EngineError, Result};
    pub use viralcast_core::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_conversion() {
        let core = viralcast_core::CoreError::empty_input("series", 1);
        let engine: EngineError = core.into();
        assert!(matches!(engine, EngineError::Contract(_)));
    }
}
