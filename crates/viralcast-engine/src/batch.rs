//! Batch Execution Layer
//!
//! Iterates the scoring and virality pipelines row-wise over a slice of
//! [`FeatureVector`]s, producing one fixed-layout output row per input
//! row. Rows are independent pure computations, so they are executed in
//! parallel with rayon; output order always matches input order.
//!
//! Row failures are isolated by default: a contract violation on one
//! row fills that output row with NaN and is reported alongside the
//! result, while every other row still computes. The
//! [`FailurePolicy::Atomic`] policy fails the whole batch on the first
//! bad row instead.

use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use viralcast_core::constants::EngineTables;
use viralcast_core::error::{CoreError, CoreResult};
use viralcast_core::types::FeatureVector;

use crate::fractal::{box_counting_dimension, DEFAULT_BOX_SCALES};
use crate::scoring::CompositeScorer;
use crate::virality::{peak_views, GrowthConfig, ViralityEngine};

/// Scoring-batch output columns:
/// `[composite_score, phi_resonance, coherence, viral_potential]`.
pub const SCORE_COLUMNS: usize = 4;

/// Virality-batch output columns:
/// `[viral_score, k_factor, peak_views_estimate]`.
pub const VIRALITY_COLUMNS: usize = 3;

/// What to do when a row violates a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Record the failure, fill the row with NaN, keep going (default).
    #[default]
    Isolate,
    /// Abort the whole batch on the first failing row.
    Atomic,
}

/// Configuration for a [`BatchExecutor`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Row-failure handling policy.
    pub failure_policy: FailurePolicy,
    /// Base seed for the per-row growth-simulation generators. Every
    /// row derives its own generator from this seed, so a batch is
    /// reproducible and identical input rows produce identical output
    /// rows.
    pub seed: u64,
    /// Growth-simulator tunables.
    pub growth: GrowthConfig,
}

/// Batch-level errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BatchError {
    /// A row failed under the [`FailurePolicy::Atomic`] policy.
    #[error("row {row} failed: {source}")]
    Row {
        /// Index of the failing input row.
        row: usize,
        /// The underlying contract violation.
        #[source]
        source: CoreError,
    },
}

/// A recorded per-row failure under [`FailurePolicy::Isolate`].
#[derive(Debug)]
pub struct RowFailure {
    /// Index of the failing input row.
    pub row: usize,
    /// The underlying contract violation.
    pub error: CoreError,
}

/// Result of a batch run: the output matrix plus any isolated row
/// failures (always empty under [`FailurePolicy::Atomic`]).
#[derive(Debug)]
pub struct BatchOutcome {
    /// N × width output matrix; row i corresponds to input row i.
    /// Failed rows are NaN-filled.
    pub rows: Array2<f64>,
    /// Rows that violated their contract, in index order.
    pub failures: Vec<RowFailure>,
}

impl BatchOutcome {
    /// `true` when every row computed successfully.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Row-parallel executor for the scoring and virality pipelines.
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    config: BatchConfig,
    scorer: CompositeScorer,
    virality: ViralityEngine,
}

impl BatchExecutor {
    /// Creates an executor with the process-wide constant tables.
    #[must_use]
    pub fn new(config: BatchConfig) -> Self {
        Self::with_tables(config, EngineTables::default())
    }

    /// Creates an executor with explicit tables (for tests).
    #[must_use]
    pub fn with_tables(config: BatchConfig, tables: EngineTables) -> Self {
        let scorer = CompositeScorer::new(tables.clone());
        let virality = ViralityEngine::new(tables, config.growth);
        Self {
            config,
            scorer,
            virality,
        }
    }

    /// Scores every row: fractal/resonance inputs → composite score →
    /// viral potential.
    ///
    /// Output columns: `[composite_score, phi_resonance, coherence,
    /// viral_potential]`.
    ///
    /// # Errors
    ///
    /// Only under [`FailurePolicy::Atomic`], when a row violates its
    /// contract.
    pub fn score_batch(&self, requests: &[FeatureVector]) -> Result<BatchOutcome, BatchError> {
        debug!(rows = requests.len(), "running scoring batch");
        self.run(requests, |fv| self.score_row(fv))
    }

    /// Computes engagement, K-factor, and a peak-views estimate for
    /// every row.
    ///
    /// Output columns: `[viral_score, k_factor, peak_views_estimate]`.
    ///
    /// # Errors
    ///
    /// Only under [`FailurePolicy::Atomic`], when a row violates its
    /// contract.
    pub fn virality_batch(&self, requests: &[FeatureVector]) -> Result<BatchOutcome, BatchError> {
        debug!(rows = requests.len(), "running virality batch");
        self.run(requests, |fv| self.virality_row(fv))
    }

    /// One scoring-pipeline row.
    fn score_row(&self, fv: &FeatureVector) -> CoreResult<[f64; SCORE_COLUMNS]> {
        let fractal_dimension = if fv.fractal_series.is_empty() {
            fv.fractal_dimension
        } else {
            let scales: &[f64] = if fv.fractal_scales.is_empty() {
                &DEFAULT_BOX_SCALES
            } else {
                &fv.fractal_scales
            };
            box_counting_dimension(&fv.fractal_series, scales)?
        };

        let phi_resonance = self.scorer.phi_resonance(&fv.frequencies, &fv.amplitudes)?;
        let coherence = self.scorer.coherence(&fv.oscillator_states)?;
        let composite = self.scorer.composite_score(
            fractal_dimension,
            phi_resonance,
            coherence,
            &fv.emotional_spectrum,
        )?;
        let viral_potential = self.scorer.viral_potential(
            fv.engagement_rate,
            composite,
            fv.platform_id,
            fv.content_type_id,
        )?;

        Ok([composite, phi_resonance, coherence, viral_potential])
    }

    /// One virality-pipeline row.
    fn virality_row(&self, fv: &FeatureVector) -> CoreResult<[f64; VIRALITY_COLUMNS]> {
        let viral_score = self.virality.engagement_score(
            &fv.hashtag_scores,
            &fv.timing_factors,
            fv.emotional_intensity,
            fv.platform_id,
        )?;
        let k_factor = self.virality.k_factor(
            fv.engagement_rate,
            fv.share_probability,
            fv.network_reach,
            fv.uniqueness,
        )?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let trajectory = self.virality.simulate_growth(
            fv.initial_views,
            k_factor,
            fv.decay_rate,
            fv.growth_steps,
            &fv.external_boosts,
            &mut rng,
        )?;

        Ok([viral_score, k_factor, peak_views(&trajectory)])
    }

    /// Runs `row_fn` over all rows in parallel and gathers the results
    /// into an N × W matrix, preserving input order.
    fn run<const W: usize, F>(
        &self,
        requests: &[FeatureVector],
        row_fn: F,
    ) -> Result<BatchOutcome, BatchError>
    where
        F: Fn(&FeatureVector) -> CoreResult<[f64; W]> + Sync,
    {
        let results: Vec<CoreResult<[f64; W]>> = requests.par_iter().map(&row_fn).collect();

        let mut rows = Array2::from_elem((requests.len(), W), f64::NAN);
        let mut failures = Vec::new();
        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(values) => {
                    for (j, value) in values.into_iter().enumerate() {
                        rows[[i, j]] = value;
                    }
                }
                Err(error) => match self.config.failure_policy {
                    FailurePolicy::Atomic => {
                        return Err(BatchError::Row {
                            row: i,
                            source: error,
                        })
                    }
                    FailurePolicy::Isolate => {
                        warn!(row = i, error = %error, "isolated row failure");
                        failures.push(RowFailure { row: i, error });
                    }
                },
            }
        }

        Ok(BatchOutcome { rows, failures })
    }
}
