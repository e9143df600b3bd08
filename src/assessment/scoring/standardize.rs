//! Standardization formulas: T scores, percentile ranks, reliability, and
//! confidence intervals.
//!
//! The assumed mean inter-item correlation for the Spearman-Brown estimate
//! is a documented simplification; `cronbach_alpha` exists for back-testing
//! against a full item-by-person matrix and is not part of the scoring
//! pipeline.

use serde::{Deserialize, Serialize};

/// Assumed mean inter-item correlation for the Spearman-Brown estimate.
pub const ASSUMED_ITEM_CORRELATION: f64 = 0.3;

/// 95% two-sided normal quantile.
const CI_Z: f64 = 1.96;

/// 95% confidence interval around a standardized score, clamped to [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: u8,
    pub upper: u8,
}

impl ConfidenceInterval {
    pub const ZERO: Self = Self { lower: 0, upper: 0 };
}

/// Convert a raw percent score to a T score (mean 50, sd 10), rounded and
/// clamped to [0,100]. A degenerate norm (sd = 0) maps everything to 50.
pub fn t_score(raw: f64, mean: f64, sd: f64) -> u8 {
    if sd == 0.0 {
        return 50;
    }
    let t = ((raw - mean) / sd) * 10.0 + 50.0;
    t.round().clamp(0.0, 100.0) as u8
}

/// Percentile rank (0-100) of a T score under the reference normal
/// distribution.
pub fn percentile_rank(t: u8) -> u8 {
    let z = (f64::from(t) - 50.0) / 10.0;
    let p = if z >= 0.0 {
        normal_cdf(z)
    } else {
        1.0 - normal_cdf(-z)
    };
    (p * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Abramowitz-Stegun 26.2.19 rational approximation of the standard normal
/// CDF for z >= 0 (|error| < 1.5e-7).
fn normal_cdf(z: f64) -> f64 {
    debug_assert!(z >= 0.0);
    const D1: f64 = 0.049_867_347_0;
    const D2: f64 = 0.021_141_006_1;
    const D3: f64 = 0.003_277_626_3;
    const D4: f64 = 0.000_038_003_6;
    const D5: f64 = 0.000_048_890_6;
    const D6: f64 = 0.000_005_383_0;

    let poly = 1.0 + z * (D1 + z * (D2 + z * (D3 + z * (D4 + z * (D5 + z * D6)))));
    1.0 - 0.5 * poly.powi(-16)
}

/// Spearman-Brown prophecy estimate of internal consistency from the item
/// count alone, rounded to two decimals.
pub fn spearman_brown(item_count: usize) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    let k = item_count as f64;
    let r = ASSUMED_ITEM_CORRELATION;
    let alpha = (k * r) / (1.0 + (k - 1.0) * r);
    (alpha * 100.0).round() / 100.0
}

/// Cronbach's alpha from a person x item score matrix, clamped to [0,1].
/// Returns 0 for fewer than two items, ragged rows, or zero total-score
/// variance. Diagnostic only.
pub fn cronbach_alpha(matrix: &[Vec<f64>]) -> f64 {
    let k = matrix.first().map(Vec::len).unwrap_or(0);
    if k < 2 || matrix.iter().any(|person| person.len() != k) {
        return 0.0;
    }

    let item_variance_sum: f64 = (0..k)
        .map(|i| {
            let scores: Vec<f64> = matrix.iter().map(|person| person[i]).collect();
            variance(&scores)
        })
        .sum();

    let totals: Vec<f64> = matrix.iter().map(|person| person.iter().sum()).collect();
    let total_variance = variance(&totals);
    if total_variance == 0.0 {
        return 0.0;
    }

    let k = k as f64;
    let alpha = (k / (k - 1.0)) * (1.0 - item_variance_sum / total_variance);
    alpha.clamp(0.0, 1.0)
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Standard error of measurement.
pub fn standard_error(sd: f64, reliability: f64) -> f64 {
    sd * (1.0 - reliability).max(0.0).sqrt()
}

/// Symmetric 95% interval around a standardized score, bounds clamped to
/// [0,100].
pub fn confidence_interval(score: u8, se: f64) -> ConfidenceInterval {
    let margin = CI_Z * se;
    let score = f64::from(score);
    ConfidenceInterval {
        lower: (score - margin).round().clamp(0.0, 100.0) as u8,
        upper: (score + margin).round().clamp(0.0, 100.0) as u8,
    }
}
