//! Fractal Analysis
//!
//! Estimators for fractal structure in a single numeric time series:
//! box-counting dimension, lacunarity, Hurst exponent, and golden-ratio
//! positional alignment. All estimators are total functions over
//! well-typed input — statistically degenerate series produce the
//! documented neutral defaults, never an error or a NaN.

use rayon::prelude::*;
use tracing::debug;
use viralcast_core::constants::{INV_PHI, PHI};
use viralcast_core::error::{ensure_finite, CoreError, CoreResult};
use viralcast_core::types::RegressionFit;
use viralcast_core::utils::{linear_fit, mean, std_dev, variance};

/// Scale ladder used when a caller does not supply one.
pub const DEFAULT_BOX_SCALES: [f64; 5] = [1.0, 2.0, 4.0, 8.0, 16.0];

/// Dimension returned when the log–log regression is degenerate:
/// the midpoint of the [0, 3] output range.
pub const DIMENSION_FALLBACK: f64 = 1.5;

/// Hurst exponent returned when fewer than 2 lag points are usable:
/// the uncorrelated-series value.
pub const HURST_FALLBACK: f64 = 0.5;

/// Estimates the box-counting fractal dimension of a series.
///
/// For each scale `s`, the series is traversed in order and a box is
/// counted every time `floor(value / s)` changes from the previous
/// sample (plus one initial box). `log(count)` is regressed against
/// `log(scale)` by OLS and the dimension is the negative of the fitted
/// slope, clamped to [0, 3].
///
/// Degenerate regressions (fewer than 2 scales, or zero variance in the
/// log-scales) return [`DIMENSION_FALLBACK`].
///
/// # Errors
///
/// Fails fast when `data` is empty, or when `data` or `scales` contain
/// non-finite or non-positive-scale values.
pub fn box_counting_dimension(data: &[f64], scales: &[f64]) -> CoreResult<f64> {
    let fit = box_counting_fit(data, scales)?;
    Ok(match fit {
        Some(fit) => (-fit.slope).clamp(0.0, 3.0),
        None => {
            debug!(
                n_scales = scales.len(),
                "box-counting regression degenerate, returning fallback dimension"
            );
            DIMENSION_FALLBACK
        }
    })
}

/// The log–log regression behind [`box_counting_dimension`], for
/// callers that want to inspect slope, intercept, and point count.
///
/// Returns `Ok(None)` when the regression is degenerate.
///
/// # Errors
///
/// Same contract as [`box_counting_dimension`].
pub fn box_counting_fit(data: &[f64], scales: &[f64]) -> CoreResult<Option<RegressionFit>> {
    if data.is_empty() {
        return Err(CoreError::empty_input("series", 1));
    }
    ensure_finite("series", data)?;
    ensure_finite("scales", scales)?;
    if let Some(&bad) = scales.iter().find(|&&s| s <= 0.0) {
        return Err(CoreError::out_of_range(
            "scale",
            bad,
            f64::MIN_POSITIVE,
            f64::INFINITY,
        ));
    }

    let mut sorted = scales.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // box_count is always >= 1, so both logs are finite.
    let (log_scales, log_counts): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .map(|&s| (s.ln(), (box_count(data, s) as f64).ln()))
        .unzip();

    Ok(linear_fit(&log_scales, &log_counts))
}

/// Number of distinct boxes the series transitions through at `scale`.
fn box_count(data: &[f64], scale: f64) -> usize {
    let mut count = 1;
    let mut prev = (data[0] / scale).floor();
    for &value in &data[1..] {
        let boxed = (value / scale).floor();
        if boxed != prev {
            count += 1;
            prev = boxed;
        }
    }
    count
}

/// Estimates lacunarity: the heterogeneity of above-mean mass across
/// sliding windows of the series.
///
/// For each box size `b` (sizes of 0 or larger than the series are
/// skipped), a window of width `b` slides across the series and the
/// count of samples exceeding the series mean is taken as the window's
/// mass. Each box size contributes `1 + variance/mean²` of its masses
/// (skipped when the mean mass is 0), and the contributions are
/// averaged. Returns the neutral value 1.0 when no box size
/// contributes.
///
/// # Errors
///
/// Fails fast when `data` is empty or contains non-finite values.
#[allow(clippy::cast_precision_loss)]
pub fn lacunarity(data: &[f64], box_sizes: &[usize]) -> CoreResult<f64> {
    if data.is_empty() {
        return Err(CoreError::empty_input("series", 1));
    }
    ensure_finite("series", data)?;

    let series_mean = mean(data);
    let mut sum = 0.0;
    let mut contributing = 0usize;

    for &b in box_sizes {
        if b == 0 || b > data.len() {
            continue;
        }
        let masses: Vec<f64> = data
            .windows(b)
            .map(|w| w.iter().filter(|&&v| v > series_mean).count() as f64)
            .collect();
        let m = mean(&masses);
        if m > 0.0 {
            sum += 1.0 + variance(&masses) / (m * m);
            contributing += 1;
        }
    }

    if contributing == 0 {
        return Ok(1.0);
    }
    Ok(sum / contributing as f64)
}

/// Estimates the Hurst exponent via rescaled-range (R/S) analysis.
///
/// For each lag in `2..min(20, n/2)` the series is partitioned into
/// non-overlapping chunks of that length; each chunk's range of the
/// mean-centered cumulative sum is divided by its standard deviation
/// (chunks with zero deviation are skipped) and the ratios averaged.
/// `log(R/S)` is regressed against `log(lag)` and the slope, clamped to
/// [0, 1], is the exponent. Per-lag values are computed in parallel;
/// the final fit over at most 18 points is single-threaded.
///
/// Returns [`HURST_FALLBACK`] (0.5) when fewer than 2 lags yield a
/// finite value.
///
/// # Errors
///
/// Fails fast when `data` is empty or contains non-finite values.
pub fn hurst_exponent(data: &[f64]) -> CoreResult<f64> {
    if data.is_empty() {
        return Err(CoreError::empty_input("series", 1));
    }
    ensure_finite("series", data)?;

    let max_lag = 20.min(data.len() / 2);
    if max_lag <= 2 {
        return Ok(HURST_FALLBACK);
    }

    let points: Vec<(f64, f64)> = (2..max_lag)
        .into_par_iter()
        .filter_map(|lag| {
            let rs = rescaled_range(data, lag)?;
            let log_rs = rs.ln();
            log_rs
                .is_finite()
                .then_some(((lag as f64).ln(), log_rs))
        })
        .collect();

    if points.len() < 2 {
        debug!(
            usable_lags = points.len(),
            "too few R/S lag points, returning neutral Hurst exponent"
        );
        return Ok(HURST_FALLBACK);
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
    Ok(match linear_fit(&xs, &ys) {
        Some(fit) => fit.slope.clamp(0.0, 1.0),
        None => HURST_FALLBACK,
    })
}

/// Average R/S statistic across non-overlapping chunks of length `lag`.
///
/// `None` when every chunk has zero deviation.
#[allow(clippy::cast_precision_loss)]
fn rescaled_range(data: &[f64], lag: usize) -> Option<f64> {
    let mut ratios = Vec::with_capacity(data.len() / lag);
    for chunk in data.chunks_exact(lag) {
        let chunk_mean = mean(chunk);
        let s = std_dev(chunk);
        if s <= 0.0 {
            continue;
        }
        let mut cumulative = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &value in chunk {
            cumulative += value - chunk_mean;
            min = min.min(cumulative);
            max = max.max(cumulative);
        }
        ratios.push((max - min) / s);
    }
    if ratios.is_empty() {
        None
    } else {
        Some(mean(&ratios))
    }
}

/// Measures how much of the series' absolute mass sits at the five
/// golden-section index positions (`n/φ²`, `n/φ`, `n/2`, `n·(1/φ)`,
/// `n·(1/φ)²`).
///
/// The positional-to-total mass ratio is scaled by 5 and compared to φ;
/// alignment is `1 − |ratio − φ|/φ`, clamped to [0, 1]. An all-zero
/// series has alignment 0.
///
/// # Errors
///
/// Fails fast when `data` is empty or contains non-finite values.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn phi_alignment(data: &[f64]) -> CoreResult<f64> {
    if data.is_empty() {
        return Err(CoreError::empty_input("series", 1));
    }
    ensure_finite("series", data)?;

    let total: f64 = data.iter().map(|v| v.abs()).sum();
    if total <= 0.0 {
        return Ok(0.0);
    }

    let n = data.len() as f64;
    let positions = [
        n / (PHI * PHI),
        n / PHI,
        n / 2.0,
        n * INV_PHI,
        n * INV_PHI * INV_PHI,
    ];

    let positional: f64 = positions
        .iter()
        .map(|&p| {
            let idx = (p.floor() as usize).min(data.len() - 1);
            data[idx].abs()
        })
        .sum();

    let ratio = 5.0 * positional / total;
    Ok((1.0 - (ratio - PHI).abs() / PHI).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_straight_line_dimension_near_one() {
        // A ramp occupies boxes linearly in 1/scale, so the log-log
        // slope is -1 and the dimension estimate is ~1.
        let data = ramp(256);
        let dim = box_counting_dimension(&data, &DEFAULT_BOX_SCALES).unwrap();
        assert_abs_diff_eq!(dim, 1.0, epsilon = 0.15);
    }

    #[test]
    fn test_dimension_always_in_range() {
        let noisy: Vec<f64> = (0..200).map(|i| ((i * 7919) % 101) as f64 * 0.37).collect();
        for scales in [&[0.5, 1.0, 2.0][..], &DEFAULT_BOX_SCALES[..]] {
            let dim = box_counting_dimension(&noisy, scales).unwrap();
            assert!((0.0..=3.0).contains(&dim), "dimension {dim} out of range");
        }
    }

    #[test]
    fn test_dimension_degenerate_scales_fallback() {
        // One scale (and repeated scales) leave the regression without
        // variance in x.
        let data = ramp(64);
        assert_eq!(
            box_counting_dimension(&data, &[2.0]).unwrap(),
            DIMENSION_FALLBACK
        );
        assert_eq!(
            box_counting_dimension(&data, &[2.0, 2.0, 2.0]).unwrap(),
            DIMENSION_FALLBACK
        );
    }

    #[test]
    fn test_dimension_contract_violations() {
        assert!(box_counting_dimension(&[], &DEFAULT_BOX_SCALES).is_err());
        assert!(box_counting_dimension(&[1.0, f64::NAN], &DEFAULT_BOX_SCALES).is_err());
        assert!(box_counting_dimension(&[1.0, 2.0], &[1.0, -2.0]).is_err());
        assert!(box_counting_dimension(&[1.0, 2.0], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_box_counting_fit_exposes_points() {
        let data = ramp(128);
        let fit = box_counting_fit(&data, &DEFAULT_BOX_SCALES).unwrap().unwrap();
        assert_eq!(fit.n_points, DEFAULT_BOX_SCALES.len());
        assert!(fit.slope < 0.0);
    }

    #[test]
    fn test_lacunarity_constant_series_neutral() {
        // No sample ever exceeds the mean, so no box size contributes.
        let data = vec![3.0; 50];
        assert_eq!(lacunarity(&data, &[2, 5, 10]).unwrap(), 1.0);
    }

    #[test]
    fn test_lacunarity_skips_oversized_boxes() {
        let data = ramp(10);
        // All box sizes exceed the series; neutral result.
        assert_eq!(lacunarity(&data, &[11, 100]).unwrap(), 1.0);
    }

    #[test]
    fn test_lacunarity_heterogeneous_above_one() {
        // A bursty series: long quiet stretches with dense spikes.
        let mut data = vec![0.0; 100];
        for i in 40..50 {
            data[i] = 10.0;
        }
        let lac = lacunarity(&data, &[5, 10, 20]).unwrap();
        assert!(lac > 1.0, "bursty series should exceed neutral: {lac}");
    }

    #[test]
    fn test_lacunarity_empty_is_error() {
        assert!(lacunarity(&[], &[2]).is_err());
    }

    #[test]
    fn test_hurst_trending_series_high() {
        // A monotone ramp is maximally persistent.
        let data = ramp(400);
        let h = hurst_exponent(&data).unwrap();
        assert!(h > 0.7, "trending series should be persistent: {h}");
        assert!(h <= 1.0);
    }

    #[test]
    fn test_hurst_short_series_neutral() {
        assert_eq!(hurst_exponent(&[1.0, 2.0, 3.0]).unwrap(), HURST_FALLBACK);
    }

    #[test]
    fn test_hurst_constant_series_neutral() {
        // Every chunk has zero deviation, so no lag yields an R/S value.
        let data = vec![5.0; 100];
        assert_eq!(hurst_exponent(&data).unwrap(), HURST_FALLBACK);
    }

    #[test]
    fn test_phi_alignment_zero_series() {
        assert_eq!(phi_alignment(&[0.0; 32]).unwrap(), 0.0);
    }

    #[test]
    fn test_phi_alignment_in_range() {
        let data: Vec<f64> = (0..144).map(|i| ((i as f64) * 0.13).sin()).collect();
        let alignment = phi_alignment(&data).unwrap();
        assert!((0.0..=1.0).contains(&alignment));
    }

    #[test]
    fn test_phi_alignment_single_sample() {
        // All five positions collapse onto index 0.
        let alignment = phi_alignment(&[2.5]).unwrap();
        assert!((0.0..=1.0).contains(&alignment));
    }
}
