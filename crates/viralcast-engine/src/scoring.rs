//! Composite Scoring
//!
//! Combines fractal, resonance, and coherence signals into bounded
//! composite scores. Every public metric documents its output range and
//! is clamped there at the point of return — a score never escapes its
//! range even transiently.

use viralcast_core::constants::{EngineTables, PHI, RESONANCE_WINDOW, VIRAL_BOOST_THRESHOLDS};
use viralcast_core::error::{ensure_finite, ensure_finite_scalar, CoreError, CoreResult};
use viralcast_core::types::OscillatorState;
use viralcast_core::utils::mean;

/// Composite scorer carrying the harmonic and multiplier tables.
///
/// `Default` uses the process-wide constant tables; tests substitute
/// their own via [`CompositeScorer::new`].
#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    tables: EngineTables,
}

impl CompositeScorer {
    /// Creates a scorer with explicit tables.
    #[must_use]
    pub fn new(tables: EngineTables) -> Self {
        Self { tables }
    }

    /// The tables this scorer evaluates against.
    #[must_use]
    pub fn tables(&self) -> &EngineTables {
        &self.tables
    }

    /// Golden-ratio resonance of a spectrum against the seven harmonic
    /// references. Range [0, 1].
    ///
    /// Each (frequency, amplitude) pair contributes a Gaussian-weighted
    /// term per reference:
    /// `amplitude · weight · exp(−(freq/ref − 1)² / 0.1)`, and the sum
    /// is normalized by `pairs × 7`. An empty spectrum scores 0.0.
    ///
    /// # Errors
    ///
    /// Fails fast when the two arrays differ in length or contain
    /// non-finite values.
    #[allow(clippy::cast_precision_loss)]
    pub fn phi_resonance(&self, frequencies: &[f64], amplitudes: &[f64]) -> CoreResult<f64> {
        if frequencies.len() != amplitudes.len() {
            return Err(CoreError::length_mismatch(
                "frequencies/amplitudes",
                frequencies.len(),
                amplitudes.len(),
            ));
        }
        ensure_finite("frequencies", frequencies)?;
        ensure_finite("amplitudes", amplitudes)?;
        if frequencies.is_empty() {
            return Ok(0.0);
        }

        let mut sum = 0.0;
        for (&freq, &amp) in frequencies.iter().zip(amplitudes) {
            for (&harmonic, &weight) in self
                .tables
                .harmonic_frequencies
                .iter()
                .zip(&self.tables.harmonic_weights)
            {
                let detune = freq / harmonic - 1.0;
                sum += amp * weight * (-(detune * detune) / RESONANCE_WINDOW).exp();
            }
        }

        let n = (frequencies.len() * self.tables.harmonic_frequencies.len()) as f64;
        Ok((sum / n).clamp(0.0, 1.0))
    }

    /// Average pairwise coherence of a set of oscillator states.
    /// Range [0, 1]; neutral 0.5 below 2 states.
    ///
    /// Each unordered pair contributes
    /// `(cos(Δphase) + (1 − |Δamplitude|)) / 2`.
    ///
    /// # Errors
    ///
    /// Fails fast when any phase or amplitude is non-finite.
    #[allow(clippy::cast_precision_loss)]
    pub fn coherence(&self, states: &[OscillatorState]) -> CoreResult<f64> {
        for state in states {
            ensure_finite_scalar("oscillator phase", state.phase)?;
            ensure_finite_scalar("oscillator amplitude", state.amplitude)?;
        }
        if states.len() < 2 {
            return Ok(0.5);
        }

        let mut sum = 0.0;
        let mut pairs = 0usize;
        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1..] {
                let phase_term = (a.phase - b.phase).cos();
                let amp_term = 1.0 - (a.amplitude - b.amplitude).abs();
                sum += (phase_term + amp_term) / 2.0;
                pairs += 1;
            }
        }
        Ok((sum / pairs as f64).clamp(0.0, 1.0))
    }

    /// Composite quality score. Range [0, 100].
    ///
    /// Weighted blend of proximity of the fractal dimension to φ
    /// (0.30), resonance (0.30), coherence (0.25), and the mean of the
    /// emotional values (0.15; 0.5 when empty), scaled to [0, 100].
    ///
    /// # Errors
    ///
    /// Fails fast on non-finite scalar inputs or emotional values.
    pub fn composite_score(
        &self,
        fractal_dimension: f64,
        phi_resonance: f64,
        coherence: f64,
        emotional_values: &[f64],
    ) -> CoreResult<f64> {
        ensure_finite_scalar("fractal_dimension", fractal_dimension)?;
        ensure_finite_scalar("phi_resonance", phi_resonance)?;
        ensure_finite_scalar("coherence", coherence)?;
        ensure_finite("emotional_values", emotional_values)?;

        let phi_proximity = (1.0 - (fractal_dimension - PHI).abs() / PHI).clamp(0.0, 1.0);
        let emotional = if emotional_values.is_empty() {
            0.5
        } else {
            mean(emotional_values)
        };

        let blended = 0.30 * phi_proximity + 0.30 * phi_resonance + 0.25 * coherence + 0.15 * emotional;
        Ok((blended * 100.0).clamp(0.0, 100.0))
    }

    /// Viral potential of a scored content item.
    ///
    /// `(engagement/100) · (score/100)`, multiplied by the platform and
    /// content-type tables (identity for out-of-range ids), boosted when
    /// the composite score exceeds the fixed thresholds (80 → ×1.2,
    /// 60 → ×1.1), then scaled by `φ^(v/2 − 0.5)`. Deliberately not
    /// clamped above — downstream consumers apply their own cap.
    ///
    /// # Errors
    ///
    /// Fails fast when `engagement_rate` is outside [0, 100] or either
    /// scalar is non-finite.
    pub fn viral_potential(
        &self,
        engagement_rate: f64,
        composite_score: f64,
        platform_id: usize,
        content_type_id: usize,
    ) -> CoreResult<f64> {
        ensure_finite_scalar("engagement_rate", engagement_rate)?;
        ensure_finite_scalar("composite_score", composite_score)?;
        if !(0.0..=100.0).contains(&engagement_rate) {
            return Err(CoreError::out_of_range(
                "engagement_rate",
                engagement_rate,
                0.0,
                100.0,
            ));
        }

        let mut value = (engagement_rate / 100.0) * (composite_score / 100.0);
        value *= self.tables.platform_multiplier(platform_id);
        value *= self.tables.content_type_multiplier(content_type_id);

        for &(threshold, boost) in &VIRAL_BOOST_THRESHOLDS {
            if composite_score > threshold {
                value *= boost;
                break;
            }
        }

        value *= PHI.powf(value / 2.0 - 0.5);
        Ok(value.max(0.0))
    }
}
