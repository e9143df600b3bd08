//! Age-band reference norms and norm-collection statistics.
//!
//! The seeded values are provisional placeholders; once a domain/band cell
//! accumulates enough anonymized samples it is marked established and can
//! be replaced through [`NormTable::update`].

use crate::assessment::catalog::AgeBand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sample size at which a norm stops being provisional.
pub const ESTABLISHED_SAMPLE_SIZE: u32 = 100;

/// Score domain a norm applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormDomain {
    Intelligence,
    Interest,
    Cognitive,
}

impl NormDomain {
    pub const fn label(self) -> &'static str {
        match self {
            NormDomain::Intelligence => "intelligence",
            NormDomain::Interest => "interest",
            NormDomain::Cognitive => "cognitive",
        }
    }
}

/// Reference distribution for one domain x age-band cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeNorm {
    pub mean: f64,
    pub sd: f64,
    pub sample_size: u32,
}

impl AgeNorm {
    pub fn is_established(&self) -> bool {
        self.sample_size >= ESTABLISHED_SAMPLE_SIZE
    }
}

/// Fallback when a cell is missing entirely.
const FALLBACK_NORM: AgeNorm = AgeNorm {
    mean: 50.0,
    sd: 10.0,
    sample_size: 0,
};

#[derive(Debug, Clone, PartialEq)]
pub struct NormTable {
    entries: BTreeMap<(NormDomain, AgeBand), AgeNorm>,
}

impl Default for NormTable {
    fn default() -> Self {
        Self::seeded()
    }
}

impl NormTable {
    /// Provisional seed values (sample size 0 throughout).
    pub fn seeded() -> Self {
        let seed = |mean: f64, sd: f64| AgeNorm {
            mean,
            sd,
            sample_size: 0,
        };
        let mut entries = BTreeMap::new();
        entries.insert((NormDomain::Intelligence, AgeBand::Young), seed(35.0, 6.0));
        entries.insert((NormDomain::Intelligence, AgeBand::Middle), seed(38.0, 7.0));
        entries.insert((NormDomain::Intelligence, AgeBand::Teen), seed(40.0, 8.0));
        entries.insert((NormDomain::Interest, AgeBand::Young), seed(32.0, 5.0));
        entries.insert((NormDomain::Interest, AgeBand::Middle), seed(35.0, 6.0));
        entries.insert((NormDomain::Interest, AgeBand::Teen), seed(37.0, 7.0));
        entries.insert((NormDomain::Cognitive, AgeBand::Young), seed(60.0, 15.0));
        entries.insert((NormDomain::Cognitive, AgeBand::Middle), seed(70.0, 12.0));
        entries.insert((NormDomain::Cognitive, AgeBand::Teen), seed(80.0, 10.0));
        Self { entries }
    }

    pub fn get(&self, domain: NormDomain, band: AgeBand) -> AgeNorm {
        self.entries
            .get(&(domain, band))
            .copied()
            .unwrap_or(FALLBACK_NORM)
    }

    /// Explicit update once real samples are available.
    pub fn update(&mut self, domain: NormDomain, band: AgeBand, norm: AgeNorm) {
        self.entries.insert((domain, band), norm);
    }

    pub fn status(&self) -> Vec<NormStatus> {
        self.entries
            .iter()
            .map(|(&(domain, band), norm)| NormStatus {
                domain,
                band,
                mean: norm.mean,
                sd: norm.sd,
                sample_size: norm.sample_size,
                provisional: !norm.is_established(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormStatus {
    pub domain: NormDomain,
    pub band: AgeBand,
    pub mean: f64,
    pub sd: f64,
    pub sample_size: u32,
    pub provisional: bool,
}

/// Descriptive statistics over a collected sample. All-zero for an empty
/// sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptives {
    pub n: usize,
    pub mean: f64,
    pub sd: f64,
    pub min: f64,
    pub max: f64,
    pub standard_error: f64,
    pub interval_lower: f64,
    pub interval_upper: f64,
}

pub fn descriptive_statistics(values: &[f64]) -> Descriptives {
    let n = values.len();
    if n == 0 {
        return Descriptives {
            n: 0,
            mean: 0.0,
            sd: 0.0,
            min: 0.0,
            max: 0.0,
            standard_error: 0.0,
            interval_lower: 0.0,
            interval_upper: 0.0,
        };
    }

    let round2 = |v: f64| (v * 100.0).round() / 100.0;
    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let sd = variance.sqrt();
    let se = sd / nf.sqrt();
    let margin = 1.96 * se;

    Descriptives {
        n,
        mean: round2(mean),
        sd: round2(sd),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        standard_error: round2(se),
        interval_lower: round2(mean - margin),
        interval_upper: round2(mean + margin),
    }
}

/// Quality grade attached to a collected sample before it may enter a norm
/// pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Good,
    Fair,
    Poor,
}

impl DataQuality {
    pub const fn label(self) -> &'static str {
        match self {
            DataQuality::Good => "good",
            DataQuality::Fair => "fair",
            DataQuality::Poor => "poor",
        }
    }
}

/// Observable signals used to grade a completed session.
#[derive(Debug, Clone, Default)]
pub struct QualitySignals {
    /// Raw percent scores across all questionnaire traits.
    pub trait_percents: Vec<u8>,
    /// Mean visual-search completion time, if any rounds were played.
    pub avg_search_seconds: Option<f64>,
    /// Total divergent-production answers across rounds.
    pub divergent_answer_count: usize,
    /// Wall-clock session duration, when known.
    pub elapsed_seconds: Option<f64>,
}

/// Heuristic data-quality grade. Penalties: implausibly fast completion,
/// near-uniform trait scores, sub-human visual-search times, and sparse
/// divergent answers.
pub fn assess_data_quality(signals: &QualitySignals) -> DataQuality {
    let mut score: i32 = 100;

    if let Some(elapsed) = signals.elapsed_seconds {
        // Expected session length is around fifteen minutes.
        if elapsed < 15.0 * 60.0 * 0.3 {
            score -= 30;
        }
    }

    let distinct = {
        let mut values = signals.trait_percents.clone();
        values.sort_unstable();
        values.dedup();
        values.len()
    };
    if !signals.trait_percents.is_empty() && distinct < 3 {
        score -= 40;
    }

    if let Some(avg) = signals.avg_search_seconds {
        if avg < 10.0 {
            score -= 20;
        }
    }

    if signals.divergent_answer_count < 3 {
        score -= 10;
    }

    if score >= 80 {
        DataQuality::Good
    } else if score >= 50 {
        DataQuality::Fair
    } else {
        DataQuality::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_table_is_fully_provisional() {
        let table = NormTable::seeded();
        assert_eq!(table.status().len(), 9);
        assert!(table.status().iter().all(|status| status.provisional));
    }

    #[test]
    fn update_can_establish_a_norm() {
        let mut table = NormTable::seeded();
        table.update(
            NormDomain::Intelligence,
            AgeBand::Middle,
            AgeNorm {
                mean: 41.2,
                sd: 6.4,
                sample_size: 240,
            },
        );
        let norm = table.get(NormDomain::Intelligence, AgeBand::Middle);
        assert!(norm.is_established());
        assert_eq!(norm.mean, 41.2);
    }

    #[test]
    fn missing_cell_falls_back_to_neutral_norm() {
        let table = NormTable {
            entries: BTreeMap::new(),
        };
        let norm = table.get(NormDomain::Interest, AgeBand::Teen);
        assert_eq!(norm.mean, 50.0);
        assert_eq!(norm.sd, 10.0);
    }

    #[test]
    fn descriptives_of_empty_sample_are_zero() {
        let stats = descriptive_statistics(&[]);
        assert_eq!(stats.n, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.interval_upper, 0.0);
    }

    #[test]
    fn descriptives_basic_sample() {
        let stats = descriptive_statistics(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.n, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.sd, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!(stats.interval_lower < stats.mean && stats.mean < stats.interval_upper);
    }

    #[test]
    fn uniform_scores_downgrade_quality() {
        let signals = QualitySignals {
            trait_percents: vec![60; 14],
            avg_search_seconds: Some(25.0),
            divergent_answer_count: 8,
            elapsed_seconds: Some(1200.0),
        };
        assert_eq!(assess_data_quality(&signals), DataQuality::Fair);
    }

    #[test]
    fn plausible_session_grades_good() {
        let signals = QualitySignals {
            trait_percents: vec![40, 55, 62, 70, 48, 81],
            avg_search_seconds: Some(28.0),
            divergent_answer_count: 9,
            elapsed_seconds: Some(1100.0),
        };
        assert_eq!(assess_data_quality(&signals), DataQuality::Good);
    }

    #[test]
    fn stacked_penalties_grade_poor() {
        let signals = QualitySignals {
            trait_percents: vec![100; 14],
            avg_search_seconds: Some(4.0),
            divergent_answer_count: 0,
            elapsed_seconds: Some(60.0),
        };
        assert_eq!(assess_data_quality(&signals), DataQuality::Poor);
    }
}
