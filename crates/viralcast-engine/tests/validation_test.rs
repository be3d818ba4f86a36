//! Validation tests proving the documented properties of the engine's
//! estimators against known mathematical results.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use viralcast_core::prelude::*;
use viralcast_engine::prelude::*;
use viralcast_engine::{
    box_counting_dimension, hurst_exponent, lacunarity, phi_alignment, DEFAULT_BOX_SCALES,
    WEEK_HOURS,
};

/// A straight-line series sampled at unit granularity has box-counting
/// dimension near 1.
#[test]
fn validate_line_dimension_near_one() {
    let line: Vec<f64> = (0..512).map(f64::from).collect();
    let dim = box_counting_dimension(&line, &DEFAULT_BOX_SCALES).unwrap();

    println!("Line dimension estimate: {dim:.4}");
    assert!(
        (dim - 1.0).abs() < 0.15,
        "line dimension should be near 1.0, got {dim}"
    );
}

/// Dimension stays in [0, 3] for a spread of input shapes.
#[test]
fn validate_dimension_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..20 {
        let n = rng.gen_range(2..400);
        let series: Vec<f64> = (0..n).map(|_| rng.gen_range(-100.0..100.0)).collect();
        let dim = box_counting_dimension(&series, &DEFAULT_BOX_SCALES).unwrap();
        assert!((0.0..=3.0).contains(&dim), "dimension {dim} out of [0, 3]");
    }
}

/// White noise has no long-range dependence: the Hurst exponent should
/// average near 0.5 across repeated trials.
#[test]
fn validate_hurst_white_noise() {
    let trials = 16;
    let mut sum = 0.0;
    for seed in 0..trials {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise: Vec<f64> = (0..600).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let h = hurst_exponent(&noise).unwrap();
        assert!((0.0..=1.0).contains(&h), "Hurst {h} out of [0, 1]");
        sum += h;
    }
    let average = sum / trials as f64;

    println!("White-noise Hurst average over {trials} trials: {average:.4}");
    // Short-lag R/S estimates carry a known upward bias, so the
    // tolerance is generous.
    assert!(
        (average - 0.5).abs() < 0.2,
        "white noise should average near 0.5, got {average}"
    );
}

/// Lacunarity of a heterogeneous series exceeds the neutral 1.0 while a
/// structureless one stays at it.
#[test]
fn validate_lacunarity_separates_texture() {
    let flat = vec![1.0; 200];
    assert_eq!(lacunarity(&flat, &[4, 8, 16]).unwrap(), 1.0);

    let mut bursty = vec![0.0; 200];
    for i in (0..200).step_by(40) {
        bursty[i] = 25.0;
    }
    let lac = lacunarity(&bursty, &[4, 8, 16]).unwrap();
    println!("Bursty lacunarity: {lac:.4}");
    assert!(lac > 1.0);
}

/// Resonance and composite scores stay in their documented ranges for
/// arbitrary finite inputs, including degenerate ones.
#[test]
fn validate_score_ranges() {
    let scorer = CompositeScorer::default();
    let mut rng = ChaCha8Rng::seed_from_u64(23);

    // Degenerate inputs
    assert_eq!(scorer.phi_resonance(&[], &[]).unwrap(), 0.0);
    assert_eq!(scorer.coherence(&[]).unwrap(), 0.5);
    let degenerate = scorer.composite_score(0.0, 0.0, 0.0, &[]).unwrap();
    assert!((0.0..=100.0).contains(&degenerate));

    // Arbitrary finite inputs
    for _ in 0..50 {
        let n = rng.gen_range(1..12);
        let freqs: Vec<f64> = (0..n).map(|_| rng.gen_range(1.0..2000.0)).collect();
        let amps: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..10.0)).collect();
        let resonance = scorer.phi_resonance(&freqs, &amps).unwrap();
        assert!((0.0..=1.0).contains(&resonance));

        let composite = scorer
            .composite_score(
                rng.gen_range(0.0..3.0),
                resonance,
                rng.gen_range(0.0..1.0),
                &amps,
            )
            .unwrap();
        assert!((0.0..=100.0).contains(&composite));
    }
}

/// A spectrum sitting on a harmonic reference outscores one far from
/// every reference.
#[test]
fn validate_resonance_harmonic_ordering() {
    let scorer = CompositeScorer::default();
    let on = scorer.phi_resonance(&[256.0], &[1.0]).unwrap();
    let off = scorer.phi_resonance(&[1000.0], &[1.0]).unwrap();
    println!("Resonance at 256 Hz: {on:.4}, at 1000 Hz: {off:.4}");
    assert!(on > off);
}

/// K-factor is monotone in uniqueness with everything else fixed.
#[test]
fn validate_k_factor_uniqueness_monotonicity() {
    let engine = ViralityEngine::default();
    let high = engine.k_factor(50.0, 0.2, 100.0, 0.9).unwrap();
    let low = engine.k_factor(50.0, 0.2, 100.0, 0.1).unwrap();
    println!("K-factor: uniqueness 0.9 → {high:.4}, 0.1 → {low:.4}");
    assert!(high > low);
}

/// Posting at the platform's peak hour scores at least as well as
/// posting 6 hours away, all else equal.
#[test]
fn validate_peak_hour_dominance() {
    let engine = ViralityEngine::default();
    let history = vec![0.5; WEEK_HOURS];

    // TikTok's peak hour is 19.
    let at_peak = engine.posting_time_score(&history, 19, 3, 0).unwrap();
    let away = engine.posting_time_score(&history, 13, 3, 0).unwrap();
    println!("Posting score at peak: {at_peak:.4}, 6h away: {away:.4}");
    assert!(at_peak >= away);
}

/// Growth with k == decay and no boosts drifts nowhere: the noise term
/// scales a zero net growth.
#[test]
fn validate_balanced_growth_is_flat() {
    let engine = ViralityEngine::default();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let trajectory = engine
        .simulate_growth(10_000.0, 0.25, 0.25, 200, &[], &mut rng)
        .unwrap();
    for &v in &trajectory {
        assert!((v - 10_000.0).abs() < 1e-6, "drift detected: {v}");
    }
}

/// View counts never go negative, even under pathological decay.
#[test]
fn validate_views_never_negative() {
    let engine = ViralityEngine::default();
    for seed in 0..8 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let trajectory = engine
            .simulate_growth(100.0, 0.01, 3.0, 150, &[10.0, -500.0], &mut rng)
            .unwrap();
        assert!(trajectory.iter().all(|&v| v >= 0.0));
    }
}

/// The batch layer is idempotent over identical rows and preserves row
/// order regardless of parallel execution.
#[test]
fn validate_batch_row_correspondence() {
    let executor = BatchExecutor::default();

    let row = FeatureVector {
        frequencies: vec![288.0, 426.7],
        amplitudes: vec![0.7, 0.9],
        emotional_spectrum: vec![0.4, 0.9],
        engagement_rate: 70.0,
        platform_id: 1,
        content_type_id: 2,
        ..Default::default()
    };

    let identical = vec![row.clone(); 16];
    let outcome = executor.score_batch(&identical).unwrap();
    assert!(outcome.is_complete());
    let first = outcome.rows.row(0).to_owned();
    for i in 1..identical.len() {
        assert_eq!(outcome.rows.row(i), first, "row {i} diverged");
    }

    // Distinct rows come back in input order: tag each row through its
    // engagement rate and check the matching single-row result.
    let distinct: Vec<FeatureVector> = (0..12)
        .map(|i| FeatureVector {
            engagement_rate: 20.0 + f64::from(i) * 5.0,
            ..row.clone()
        })
        .collect();
    let batched = executor.score_batch(&distinct).unwrap();
    for (i, fv) in distinct.iter().enumerate() {
        let single = executor.score_batch(std::slice::from_ref(fv)).unwrap();
        assert_eq!(batched.rows.row(i), single.rows.row(0), "row {i} reordered");
    }
}

/// An all-zero series has zero golden-ratio alignment; any other series
/// stays within [0, 1].
#[test]
fn validate_phi_alignment_bounds() {
    assert_eq!(phi_alignment(&[0.0; 64]).unwrap(), 0.0);

    let mut rng = ChaCha8Rng::seed_from_u64(89);
    for _ in 0..20 {
        let n = rng.gen_range(1..300);
        let series: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let alignment = phi_alignment(&series).unwrap();
        assert!((0.0..=1.0).contains(&alignment));
    }
}
