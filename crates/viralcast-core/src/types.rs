//! Core data types shared across the Viralcast engine.
//!
//! The central type is [`FeatureVector`]: one row of a batch request.
//! Every field is optional in spirit — callers populate what they have
//! and each consumer applies the documented default for anything left
//! at its [`Default`] value. The engine never mutates a `FeatureVector`.

use serde::{Deserialize, Serialize};

/// Result of an ordinary-least-squares fit in log–log space.
///
/// `n_points` is the number of (x, y) pairs that entered the fit; a fit
/// is only meaningful when `n_points >= 2`, and estimators substitute a
/// policy default below that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Number of points in the fit.
    pub n_points: usize,
}

/// Phase/amplitude state of one oscillator, the unit of the pairwise
/// coherence estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorState {
    /// Phase in radians.
    pub phase: f64,
    /// Amplitude, nominally in [0, 1].
    pub amplitude: f64,
}

impl OscillatorState {
    /// Creates a new oscillator state.
    #[must_use]
    pub fn new(phase: f64, amplitude: f64) -> Self {
        Self { phase, amplitude }
    }
}

/// One row of a batch request: the named numeric features describing a
/// single content item.
///
/// Defaults (applied when a field is left at its `Default` value):
///
/// | field | default | consumer behavior |
/// |---|---|---|
/// | `fractal_series` | empty | use `fractal_dimension` directly |
/// | `fractal_scales` | empty | engine's default scale ladder |
/// | `fractal_dimension` | 1.5 | midpoint of the [0, 3] range |
/// | `frequencies`/`amplitudes` | empty | resonance 0.0 |
/// | `oscillator_states` | empty | coherence 0.5 (neutral) |
/// | `emotional_spectrum` | empty | emotional mean 0.5 |
/// | `hashtag_scores`/`timing_factors` | empty | contribution 0.0 |
/// | `emotional_intensity` | 0.5 | |
/// | `engagement_rate` | 50.0 | midpoint of [0, 100] |
/// | `share_probability` | 0.1 | |
/// | `network_reach` | 1.0 | |
/// | `uniqueness` | 0.5 | |
/// | `platform_id`/`content_type_id` | 0 | TikTok / short video |
/// | `initial_views` | 100.0 | |
/// | `decay_rate` | 0.1 | |
/// | `growth_steps` | 30 | |
/// | `external_boosts` | empty | zero boost every step |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Time series the fractal dimension is estimated from.
    #[serde(default)]
    pub fractal_series: Vec<f64>,
    /// Box-counting scales for `fractal_series`.
    #[serde(default)]
    pub fractal_scales: Vec<f64>,
    /// Precomputed fractal dimension, used when `fractal_series` is empty.
    pub fractal_dimension: f64,
    /// Spectral component frequencies in Hz.
    #[serde(default)]
    pub frequencies: Vec<f64>,
    /// Amplitudes paired with `frequencies`.
    #[serde(default)]
    pub amplitudes: Vec<f64>,
    /// Oscillator states for the coherence estimator.
    #[serde(default)]
    pub oscillator_states: Vec<OscillatorState>,
    /// Per-emotion signal strengths, each nominally in [0, 1].
    #[serde(default)]
    pub emotional_spectrum: Vec<f64>,
    /// Hashtag relevance scores, ordered by rank.
    #[serde(default)]
    pub hashtag_scores: Vec<f64>,
    /// Posting-timing quality factors, each nominally in [0, 1].
    #[serde(default)]
    pub timing_factors: Vec<f64>,
    /// Aggregate emotional intensity in [0, 1].
    pub emotional_intensity: f64,
    /// Observed engagement rate in [0, 100].
    pub engagement_rate: f64,
    /// Probability that a viewer shares the content.
    pub share_probability: f64,
    /// Average reach per share.
    pub network_reach: f64,
    /// Content uniqueness in [0, 1].
    pub uniqueness: f64,
    /// Platform id (see the constant tables).
    pub platform_id: usize,
    /// Content-type id (see the constant tables).
    pub content_type_id: usize,
    /// Content embedding for audience matching.
    #[serde(default)]
    pub content_embedding: Vec<f64>,
    /// Audience embedding for audience matching.
    #[serde(default)]
    pub audience_embedding: Vec<f64>,
    /// Audience size in accounts.
    pub audience_size: f64,
    /// Historical audience engagement rate in [0, 100].
    pub audience_engagement_rate: f64,
    /// View count at the start of the growth simulation.
    pub initial_views: f64,
    /// Per-step view decay rate.
    pub decay_rate: f64,
    /// Number of growth-simulation steps.
    pub growth_steps: usize,
    /// External per-step view boosts (zero beyond its length).
    #[serde(default)]
    pub external_boosts: Vec<f64>,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            fractal_series: Vec::new(),
            fractal_scales: Vec::new(),
            fractal_dimension: 1.5,
            frequencies: Vec::new(),
            amplitudes: Vec::new(),
            oscillator_states: Vec::new(),
            emotional_spectrum: Vec::new(),
            hashtag_scores: Vec::new(),
            timing_factors: Vec::new(),
            emotional_intensity: 0.5,
            engagement_rate: 50.0,
            share_probability: 0.1,
            network_reach: 1.0,
            uniqueness: 0.5,
            platform_id: 0,
            content_type_id: 0,
            content_embedding: Vec::new(),
            audience_embedding: Vec::new(),
            audience_size: 0.0,
            audience_engagement_rate: 0.0,
            initial_views: 100.0,
            decay_rate: 0.1,
            growth_steps: 30,
            external_boosts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_defaults() {
        let fv = FeatureVector::default();
        assert_eq!(fv.fractal_dimension, 1.5);
        assert_eq!(fv.engagement_rate, 50.0);
        assert_eq!(fv.growth_steps, 30);
        assert!(fv.frequencies.is_empty());
    }

    #[test]
    fn test_feature_vector_roundtrip() {
        let fv = FeatureVector {
            frequencies: vec![256.0, 341.3],
            amplitudes: vec![1.0, 0.8],
            platform_id: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&fv).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(fv, back);
    }

    #[test]
    fn test_sparse_deserialization_fills_defaults() {
        // Callers populate only the columns they have.
        let json = r#"{
            "fractal_dimension": 1.8,
            "emotional_intensity": 0.7,
            "engagement_rate": 62.0,
            "share_probability": 0.2,
            "network_reach": 50.0,
            "uniqueness": 0.9,
            "platform_id": 1,
            "content_type_id": 0,
            "audience_size": 10000.0,
            "audience_engagement_rate": 4.5,
            "initial_views": 250.0,
            "decay_rate": 0.05,
            "growth_steps": 10
        }"#;
        let fv: FeatureVector = serde_json::from_str(json).unwrap();
        assert_eq!(fv.fractal_dimension, 1.8);
        assert!(fv.hashtag_scores.is_empty());
        assert!(fv.external_boosts.is_empty());
    }

    #[test]
    fn test_oscillator_state_new() {
        let s = OscillatorState::new(0.5, 0.8);
        assert_eq!(s.phase, 0.5);
        assert_eq!(s.amplitude, 0.8);
    }
}
