//! Numeric helper functions shared by the estimators.

use crate::types::RegressionFit;

/// Arithmetic mean; 0.0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population variance; 0.0 for a slice with fewer than 2 elements.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation.
#[must_use]
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Ordinary least squares over (x, y) pairs.
///
/// Returns `None` when fewer than 2 points are supplied or when the
/// x-values have no variance (the regression denominator would be
/// zero). Callers substitute their documented policy default in that
/// case rather than dividing by zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<RegressionFit> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let sum_x: f64 = xs[..n].iter().sum();
    let sum_y: f64 = ys[..n].iter().sum();
    let sum_xy: f64 = xs[..n].iter().zip(&ys[..n]).map(|(x, y)| x * y).sum();
    let sum_xx: f64 = xs[..n].iter().map(|x| x * x).sum();

    let denominator = n_f * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return None;
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n_f;
    Some(RegressionFit {
        slope,
        intercept,
        n_points: n,
    })
}

/// Cosine similarity over the overlapping prefix of two vectors.
///
/// Truncation to the shorter length is deliberate: embedding producers
/// on either side of the batch boundary do not always agree on width.
/// Returns 0.0 when the overlap is empty or either prefix has zero
/// norm.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let dot: f64 = a[..n].iter().zip(&b[..n]).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a[..n].iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b[..n].iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a < f64::EPSILON || norm_b < f64::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
