//! Fixed constant tables for the analytics engine.
//!
//! All tables here are process-wide, read-only data: the golden ratio,
//! the harmonic reference grid used by the resonance estimator, and the
//! per-platform / per-content-type multiplier tables. Nothing in this
//! module is runtime-tunable; tests that need different values go
//! through [`EngineTables`], which carries a copy of every table.

use serde::{Deserialize, Serialize};

/// The golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Reciprocal of the golden ratio (`1/φ = φ - 1`).
pub const INV_PHI: f64 = PHI - 1.0;

/// The seven harmonic reference frequencies, in Hz.
///
/// A geometric ladder from 256 Hz to its octave at 512 Hz with the
/// 341.3 Hz (`512/φ` ≈ `256·4/3`) reference at the center.
pub const HARMONIC_FREQUENCIES: [f64; 7] = [256.0, 288.0, 320.0, 341.3, 384.0, 426.7, 512.0];

/// Weights for the harmonic references, symmetric around the central
/// frequency: `[φ⁻², φ⁻¹, φ/2, 1, φ/2, φ⁻¹, φ⁻²]`.
pub const HARMONIC_WEIGHTS: [f64; 7] = [
    INV_PHI * INV_PHI,
    INV_PHI,
    PHI / 2.0,
    1.0,
    PHI / 2.0,
    INV_PHI,
    INV_PHI * INV_PHI,
];

/// Width of the Gaussian window around each harmonic reference.
pub const RESONANCE_WINDOW: f64 = 0.1;

/// Platform identifiers for the multiplier and peak-hour tables.
pub const PLATFORM_TIKTOK: usize = 0;
/// Instagram platform id.
pub const PLATFORM_INSTAGRAM: usize = 1;
/// YouTube platform id.
pub const PLATFORM_YOUTUBE: usize = 2;
/// Twitter platform id.
pub const PLATFORM_TWITTER: usize = 3;

/// Per-platform virality multipliers, indexed by platform id.
pub const PLATFORM_MULTIPLIERS: [f64; 4] = [1.3, 1.1, 1.0, 1.15];

/// Per-platform peak posting hour (local time), indexed by platform id.
pub const PLATFORM_PEAK_HOURS: [u32; 4] = [19, 17, 20, 12];

/// Peak posting hour for platforms outside the table.
pub const DEFAULT_PEAK_HOUR: u32 = 12;

/// Content-type identifiers for the multiplier table.
pub const CONTENT_VIDEO_SHORT: usize = 0;
/// Long-form video content-type id.
pub const CONTENT_VIDEO_LONG: usize = 1;
/// Still-image content-type id.
pub const CONTENT_IMAGE: usize = 2;
/// Text-post content-type id.
pub const CONTENT_TEXT: usize = 3;

/// Per-content-type virality multipliers, indexed by content-type id.
pub const CONTENT_TYPE_MULTIPLIERS: [f64; 4] = [1.25, 1.0, 1.1, 0.9];

/// Geometric decay applied to ranked hashtag scores.
pub const HASHTAG_RANK_DECAY: f64 = 0.85;

/// Composite-score thresholds and boosts used by the viral-potential
/// estimator: above 80 → ×1.2, above 60 → ×1.1.
pub const VIRAL_BOOST_THRESHOLDS: [(f64, f64); 2] = [(80.0, 1.2), (60.0, 1.1)];

/// A copy of every constant table, for callers (mostly tests) that need
/// to substitute their own values.
///
/// [`EngineTables::default()`] mirrors the module-level constants; the
/// engine never mutates a table after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineTables {
    /// Harmonic reference frequencies in Hz.
    pub harmonic_frequencies: [f64; 7],
    /// Weights paired with `harmonic_frequencies`.
    pub harmonic_weights: [f64; 7],
    /// Per-platform virality multipliers.
    pub platform_multipliers: Vec<f64>,
    /// Per-content-type virality multipliers.
    pub content_type_multipliers: Vec<f64>,
    /// Per-platform peak posting hours.
    pub platform_peak_hours: Vec<u32>,
    /// Peak hour for platforms outside the table.
    pub default_peak_hour: u32,
}

impl Default for EngineTables {
    fn default() -> Self {
        Self {
            harmonic_frequencies: HARMONIC_FREQUENCIES,
            harmonic_weights: HARMONIC_WEIGHTS,
            platform_multipliers: PLATFORM_MULTIPLIERS.to_vec(),
            content_type_multipliers: CONTENT_TYPE_MULTIPLIERS.to_vec(),
            platform_peak_hours: PLATFORM_PEAK_HOURS.to_vec(),
            default_peak_hour: DEFAULT_PEAK_HOUR,
        }
    }
}

impl EngineTables {
    /// Multiplier for a platform id; identity (1.0) out of range.
    #[must_use]
    pub fn platform_multiplier(&self, platform_id: usize) -> f64 {
        self.platform_multipliers
            .get(platform_id)
            .copied()
            .unwrap_or(1.0)
    }

    /// Multiplier for a content-type id; identity (1.0) out of range.
    #[must_use]
    pub fn content_type_multiplier(&self, content_type_id: usize) -> f64 {
        self.content_type_multipliers
            .get(content_type_id)
            .copied()
            .unwrap_or(1.0)
    }

    /// Peak posting hour for a platform id, falling back to the default
    /// for unknown platforms.
    #[must_use]
    pub fn peak_hour(&self, platform_id: usize) -> u32 {
        self.platform_peak_hours
            .get(platform_id)
            .copied()
            .unwrap_or(self.default_peak_hour)
    }
}
