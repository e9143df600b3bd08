//! Response-quality heuristics.
//!
//! Every detector is advisory: the outputs feed warning lists and a
//! reliability flag, and never alter or discard answer records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fraction of sign reversals among interior points above which a sequence
/// counts as oscillating.
const ZIGZAG_THRESHOLD: f64 = 0.6;

/// Share of consistent pairs required for the paired check to pass.
const PAIR_PASS_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponsePattern {
    Normal,
    StraightLining { value: u8 },
    ZigZag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub pattern: ResponsePattern,
    pub flagged: bool,
    pub detail: String,
}

/// Inspect one trait-type's answer values in original answer order.
pub fn detect_response_pattern(values: &[u8]) -> PatternReport {
    let Some(&first) = values.first() else {
        return PatternReport {
            pattern: ResponsePattern::Normal,
            flagged: false,
            detail: "no answers recorded".to_string(),
        };
    };

    if values.iter().all(|&v| v == first) {
        return PatternReport {
            pattern: ResponsePattern::StraightLining { value: first },
            flagged: true,
            detail: format!("every item was answered with {first}"),
        };
    }

    if values.len() > 2 {
        let mut reversals = 0usize;
        for i in 2..values.len() {
            let prev = i16::from(values[i - 1]) - i16::from(values[i - 2]);
            let curr = i16::from(values[i]) - i16::from(values[i - 1]);
            if prev != 0 && curr.signum() != prev.signum() {
                reversals += 1;
            }
        }
        let ratio = reversals as f64 / (values.len() - 2) as f64;
        if ratio > ZIGZAG_THRESHOLD {
            return PatternReport {
                pattern: ResponsePattern::ZigZag,
                flagged: true,
                detail: "answers alternate in a regular up-down pattern".to_string(),
            };
        }
    }

    PatternReport {
        pattern: ResponsePattern::Normal,
        flagged: false,
        detail: "response pattern looks normal".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasLevel {
    None,
    Low,
    Moderate,
    High,
}

impl BiasLevel {
    pub const fn label(self) -> &'static str {
        match self {
            BiasLevel::None => "none",
            BiasLevel::Low => "low",
            BiasLevel::Moderate => "moderate",
            BiasLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub has_bias: bool,
    pub level: BiasLevel,
    /// Mean probe score, rounded to two decimals.
    pub average: f64,
}

/// Grade social-desirability bias from the probe-item scores. High probe
/// means suggest the respondent is presenting an idealized self.
pub fn social_desirability_bias(probe_values: &[u8]) -> BiasReport {
    if probe_values.is_empty() {
        return BiasReport {
            has_bias: false,
            level: BiasLevel::None,
            average: 0.0,
        };
    }

    let avg = probe_values.iter().map(|&v| f64::from(v)).sum::<f64>() / probe_values.len() as f64;
    let level = if avg >= 4.5 {
        BiasLevel::High
    } else if avg >= 4.0 {
        BiasLevel::Moderate
    } else if avg >= 3.5 {
        BiasLevel::Low
    } else {
        BiasLevel::None
    };

    BiasReport {
        has_bias: avg >= 4.0,
        level,
        average: (avg * 100.0).round() / 100.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairOutcome {
    pub first: String,
    pub second: String,
    pub score_first: u8,
    pub score_second: u8,
    pub consistent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedConsistency {
    pub consistent: bool,
    /// Share of pairs within one point of each other, rounded to two
    /// decimals.
    pub ratio: f64,
    pub outcomes: Vec<PairOutcome>,
}

/// Compare answers on item pairs expected to elicit similar responses.
/// Unanswered pair members score as 0.
pub fn paired_consistency(
    answers: &HashMap<&str, u8>,
    pairs: &[(&str, &str)],
) -> PairedConsistency {
    let mut outcomes = Vec::with_capacity(pairs.len());
    let mut consistent_count = 0usize;

    for &(a, b) in pairs {
        let score_a = answers.get(a).copied().unwrap_or(0);
        let score_b = answers.get(b).copied().unwrap_or(0);
        let consistent = score_a.abs_diff(score_b) <= 1;
        if consistent {
            consistent_count += 1;
        }
        outcomes.push(PairOutcome {
            first: a.to_string(),
            second: b.to_string(),
            score_first: score_a,
            score_second: score_b,
            consistent,
        });
    }

    let ratio = if pairs.is_empty() {
        0.0
    } else {
        consistent_count as f64 / pairs.len() as f64
    };

    PairedConsistency {
        consistent: ratio >= PAIR_PASS_RATIO,
        ratio: (ratio * 100.0).round() / 100.0,
        outcomes,
    }
}
