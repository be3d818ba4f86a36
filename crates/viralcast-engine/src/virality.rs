//! Virality & Growth Simulation
//!
//! Engagement scoring, K-factor estimation, trend and audience
//! matching, posting-time optimization, and a discrete-time stochastic
//! view-growth simulator. Randomness is confined to an injected
//! generator so concurrent simulations never contend on shared RNG
//! state and seeded runs reproduce exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};
use viralcast_core::constants::{EngineTables, HASHTAG_RANK_DECAY, PHI};
use viralcast_core::error::{ensure_finite, ensure_finite_scalar, CoreError, CoreResult};
use viralcast_core::utils::{cosine_similarity, mean};

/// Number of hourly samples in one week of engagement history.
pub const WEEK_HOURS: usize = 168;

/// Steepness of the logistic squash applied to engagement scores.
const ENGAGEMENT_SIGMOID_STEEPNESS: f64 = 0.1;

/// Tunables for the growth simulator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Symmetric relative noise applied to each step's net growth.
    /// 0.05 means ±5%; 0 disables the perturbation entirely.
    pub noise_amplitude: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            noise_amplitude: 0.05,
        }
    }
}

/// Mutable state of one growth-simulation run.
///
/// Never shared across concurrent runs; each simulation owns its state
/// for the duration of the run.
#[derive(Debug, Clone)]
pub struct GrowthState {
    /// Current view count, floored at 0 after every step.
    pub current_views: f64,
    /// Virality coefficient: new viewers per existing viewer per step.
    pub k_factor: f64,
    /// Per-step view decay rate.
    pub decay_rate: f64,
}

impl GrowthState {
    /// Advances the state by one step and returns the new view count.
    ///
    /// `net = views·k − views·decay + boost`, perturbed by a symmetric
    /// relative noise term drawn from `rng`.
    pub fn step<R: Rng + ?Sized>(&mut self, boost: f64, noise_amplitude: f64, rng: &mut R) -> f64 {
        let net_growth =
            self.current_views * self.k_factor - self.current_views * self.decay_rate + boost;
        let perturbation = if noise_amplitude > 0.0 {
            rng.gen_range(-noise_amplitude..=noise_amplitude)
        } else {
            0.0
        };
        self.current_views = (self.current_views + net_growth * (1.0 + perturbation)).max(0.0);
        self.current_views
    }
}

/// Virality estimator carrying the platform tables and growth tunables.
#[derive(Debug, Clone, Default)]
pub struct ViralityEngine {
    tables: EngineTables,
    growth: GrowthConfig,
}

impl ViralityEngine {
    /// Creates an engine with explicit tables and growth tunables.
    #[must_use]
    pub fn new(tables: EngineTables, growth: GrowthConfig) -> Self {
        Self { tables, growth }
    }

    /// The growth tunables this engine simulates with.
    #[must_use]
    pub fn growth_config(&self) -> GrowthConfig {
        self.growth
    }

    /// Predicted engagement score for a content item. Range [0, 100].
    ///
    /// Hashtag scores are blended with geometrically diminishing rank
    /// weights (`0.85^rank`), timing factors contribute their mean, and
    /// the blend `0.30·hashtag + 0.25·timing + 0.35·emotional + 0.10`
    /// is platform-multiplied, scaled to 0–100, and passed through a
    /// logistic squash centered at 50.
    ///
    /// # Errors
    ///
    /// Fails fast on non-finite inputs.
    pub fn engagement_score(
        &self,
        hashtag_scores: &[f64],
        timing_factors: &[f64],
        emotional_intensity: f64,
        platform_id: usize,
    ) -> CoreResult<f64> {
        ensure_finite("hashtag_scores", hashtag_scores)?;
        ensure_finite("timing_factors", timing_factors)?;
        ensure_finite_scalar("emotional_intensity", emotional_intensity)?;

        let hashtag = if hashtag_scores.is_empty() {
            0.0
        } else {
            let mut weighted = 0.0;
            let mut weight_sum = 0.0;
            let mut weight = 1.0;
            for &score in hashtag_scores {
                weighted += score * weight;
                weight_sum += weight;
                weight *= HASHTAG_RANK_DECAY;
            }
            weighted / weight_sum
        };

        let timing = mean(timing_factors);
        let blended = 0.30 * hashtag + 0.25 * timing + 0.35 * emotional_intensity + 0.10;
        let raw = blended * self.tables.platform_multiplier(platform_id) * 100.0;

        // Logistic squash centered at 50 keeps the prediction realistic
        // for extreme inputs.
        let squashed = 100.0 / (1.0 + (-(ENGAGEMENT_SIGMOID_STEEPNESS) * (raw - 50.0)).exp());
        Ok(squashed.clamp(0.0, 100.0))
    }

    /// Virality coefficient: expected new viewers per existing viewer.
    ///
    /// `base = (engagement/100) · share_probability · network_reach`,
    /// amplified by `1 + uniqueness·φ`. Values above the viral
    /// threshold of 1.0 are dampened to `1 + ln(v)·φ`, which keeps
    /// growth sub-linear above the threshold while preserving the
    /// ordering of more-viral inputs.
    ///
    /// # Errors
    ///
    /// Fails fast when `engagement_rate` is outside [0, 100],
    /// `share_probability` or `uniqueness` are outside [0, 1], or
    /// `network_reach` is negative.
    pub fn k_factor(
        &self,
        engagement_rate: f64,
        share_probability: f64,
        network_reach: f64,
        uniqueness: f64,
    ) -> CoreResult<f64> {
        ensure_finite_scalar("engagement_rate", engagement_rate)?;
        ensure_finite_scalar("share_probability", share_probability)?;
        ensure_finite_scalar("network_reach", network_reach)?;
        ensure_finite_scalar("uniqueness", uniqueness)?;
        if !(0.0..=100.0).contains(&engagement_rate) {
            return Err(CoreError::out_of_range(
                "engagement_rate",
                engagement_rate,
                0.0,
                100.0,
            ));
        }
        if !(0.0..=1.0).contains(&share_probability) {
            return Err(CoreError::out_of_range(
                "share_probability",
                share_probability,
                0.0,
                1.0,
            ));
        }
        if !(0.0..=1.0).contains(&uniqueness) {
            return Err(CoreError::out_of_range("uniqueness", uniqueness, 0.0, 1.0));
        }
        if network_reach < 0.0 {
            return Err(CoreError::out_of_range(
                "network_reach",
                network_reach,
                0.0,
                f64::INFINITY,
            ));
        }

        let base = (engagement_rate / 100.0) * share_probability * network_reach;
        let amplified = base * (1.0 + uniqueness * PHI);
        if amplified > 1.0 {
            Ok(1.0 + amplified.ln() * PHI)
        } else {
            Ok(amplified)
        }
    }

    /// Alignment of content features with a trend vector. Range [0, 1].
    ///
    /// Cosine similarity over the overlapping prefix of the two
    /// vectors, boosted by `1 + 0.5·trend_velocity`.
    ///
    /// # Errors
    ///
    /// Fails fast on non-finite inputs.
    pub fn trend_alignment(
        &self,
        content_features: &[f64],
        trend_features: &[f64],
        trend_velocity: f64,
    ) -> CoreResult<f64> {
        ensure_finite("content_features", content_features)?;
        ensure_finite("trend_features", trend_features)?;
        ensure_finite_scalar("trend_velocity", trend_velocity)?;

        let similarity = cosine_similarity(content_features, trend_features);
        Ok((similarity * (1.0 + 0.5 * trend_velocity)).clamp(0.0, 1.0))
    }

    /// Quality of a posting slot given one week of hourly engagement
    /// history. Range [0, 1].
    ///
    /// Historical hours are averaged with an `exp(−distance/10)` decay,
    /// where distance combines circular hour distance with circular day
    /// distance weighted 3×. The platform's peak hour adds a bonus of
    /// `exp(−|Δhour|/4) · 0.2`, and the result is
    /// `0.8·historical + bonus`.
    ///
    /// # Errors
    ///
    /// Fails fast unless `historical_engagement` has exactly 168
    /// finite samples, `target_hour < 24`, and `target_day < 7`.
    #[allow(clippy::cast_precision_loss)]
    pub fn posting_time_score(
        &self,
        historical_engagement: &[f64],
        target_hour: u32,
        target_day: u32,
        platform_id: usize,
    ) -> CoreResult<f64> {
        if historical_engagement.len() != WEEK_HOURS {
            return Err(CoreError::invalid_shape(
                "historical_engagement",
                WEEK_HOURS,
                historical_engagement.len(),
            ));
        }
        ensure_finite("historical_engagement", historical_engagement)?;
        if target_hour >= 24 {
            return Err(CoreError::out_of_range(
                "target_hour",
                f64::from(target_hour),
                0.0,
                23.0,
            ));
        }
        if target_day >= 7 {
            return Err(CoreError::out_of_range(
                "target_day",
                f64::from(target_day),
                0.0,
                6.0,
            ));
        }

        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for (slot, &engagement) in historical_engagement.iter().enumerate() {
            let hour = (slot % 24) as u32;
            let day = (slot / 24) as u32;
            let distance =
                f64::from(circular_distance(target_hour, hour, 24))
                    + 3.0 * f64::from(circular_distance(target_day, day, 7));
            let weight = (-distance / 10.0).exp();
            weighted += weight * engagement;
            weight_sum += weight;
        }
        let historical = weighted / weight_sum;

        let peak = self.tables.peak_hour(platform_id);
        let peak_distance = f64::from(circular_distance(target_hour, peak, 24));
        let bonus = (-peak_distance / 4.0).exp() * 0.2;

        Ok((0.8 * historical + bonus).clamp(0.0, 1.0))
    }

    /// Resonance between content and its audience. Range [0, 1].
    ///
    /// Cosine similarity of the two embeddings (truncated to the
    /// shorter length) scaled by a logarithmic audience-size factor
    /// (`min(ln(size+1)/20, 1)`) and an engagement factor
    /// (`0.5 + rate/200`).
    ///
    /// # Errors
    ///
    /// Fails fast when `audience_size` is negative,
    /// `audience_engagement_rate` is outside [0, 100], or either
    /// embedding contains non-finite values.
    pub fn audience_resonance(
        &self,
        content_embedding: &[f64],
        audience_embedding: &[f64],
        audience_size: f64,
        audience_engagement_rate: f64,
    ) -> CoreResult<f64> {
        ensure_finite("content_embedding", content_embedding)?;
        ensure_finite("audience_embedding", audience_embedding)?;
        ensure_finite_scalar("audience_size", audience_size)?;
        ensure_finite_scalar("audience_engagement_rate", audience_engagement_rate)?;
        if audience_size < 0.0 {
            return Err(CoreError::out_of_range(
                "audience_size",
                audience_size,
                0.0,
                f64::INFINITY,
            ));
        }
        if !(0.0..=100.0).contains(&audience_engagement_rate) {
            return Err(CoreError::out_of_range(
                "audience_engagement_rate",
                audience_engagement_rate,
                0.0,
                100.0,
            ));
        }

        let similarity = cosine_similarity(content_embedding, audience_embedding);
        let size_factor = ((audience_size + 1.0).ln() / 20.0).min(1.0);
        let engagement_factor = 0.5 + audience_engagement_rate / 200.0;
        Ok((similarity * size_factor * engagement_factor).clamp(0.0, 1.0))
    }

    /// Simulates a view-count trajectory over `steps` discrete steps.
    ///
    /// Returns `steps + 1` values, starting with `initial_views` at
    /// step 0. Each step applies the growth recurrence with a symmetric
    /// random perturbation of the net growth (see [`GrowthConfig`]);
    /// views are floored at 0 every step. Boosts beyond the length of
    /// `external_boosts` are 0.
    ///
    /// The generator is injected so runs are reproducible under a
    /// seeded RNG; production callers may seed from entropy.
    ///
    /// # Errors
    ///
    /// Fails fast when `initial_views` is negative or any numeric input
    /// is non-finite.
    pub fn simulate_growth<R: Rng + ?Sized>(
        &self,
        initial_views: f64,
        k_factor: f64,
        decay_rate: f64,
        steps: usize,
        external_boosts: &[f64],
        rng: &mut R,
    ) -> CoreResult<Vec<f64>> {
        ensure_finite_scalar("initial_views", initial_views)?;
        ensure_finite_scalar("k_factor", k_factor)?;
        ensure_finite_scalar("decay_rate", decay_rate)?;
        ensure_finite("external_boosts", external_boosts)?;
        if initial_views < 0.0 {
            return Err(CoreError::out_of_range(
                "initial_views",
                initial_views,
                0.0,
                f64::INFINITY,
            ));
        }

        let mut state = GrowthState {
            current_views: initial_views,
            k_factor,
            decay_rate,
        };
        let mut trajectory = Vec::with_capacity(steps + 1);
        trajectory.push(initial_views);
        for t in 0..steps {
            let boost = external_boosts.get(t).copied().unwrap_or(0.0);
            trajectory.push(state.step(boost, self.growth.noise_amplitude, rng));
        }
        Ok(trajectory)
    }
}

/// Distance between two positions on a ring of `period` slots.
fn circular_distance(a: u32, b: u32, period: u32) -> u32 {
    let d = a.abs_diff(b) % period;
    d.min(period - d)
}

/// Maximum view count reached along a trajectory; 0 for an empty one.
#[must_use]
pub fn peak_views(trajectory: &[f64]) -> f64 {
    trajectory.iter().copied().fold(0.0, f64::max)
}
