//! Questionnaire scoring: answer records, direction-aware raw scores, and
//! the per-trait standardization pipeline.

pub mod quality;
pub mod standardize;

use crate::assessment::catalog::{self, Direction, QuestionSet, TraitTag};
use crate::assessment::norms::AgeNorm;
use serde::{Deserialize, Serialize};

pub use standardize::ConfidenceInterval;

/// Likert answers with fewer than this many items get a small-sample
/// warning and a reliability flag.
const SMALL_SAMPLE_ITEMS: usize = 5;

/// A Likert answer value, guaranteed in 1..=5 by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertValue(u8);

impl LikertValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Score inversion for reverse-direction items. Involution:
    /// `v.reversed().reversed() == v`.
    pub const fn reversed(self) -> LikertValue {
        LikertValue(6 - self.0)
    }

    pub const fn describe(self) -> &'static str {
        match self.0 {
            1 => "not at all like me",
            2 => "not really like me",
            3 => "somewhat like me",
            4 => "quite like me",
            _ => "exactly like me",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Likert value {value} outside 1..=5")]
pub struct LikertOutOfRange {
    pub value: u8,
}

impl TryFrom<u8> for LikertValue {
    type Error = LikertOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(LikertValue(value))
        } else {
            Err(LikertOutOfRange { value })
        }
    }
}

impl From<LikertValue> for u8 {
    fn from(value: LikertValue) -> u8 {
        value.0
    }
}

/// One respondent answer. Appended to an ordered log, never mutated; the
/// set discriminant is stored explicitly because item ids are only unique
/// within a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub item_id: String,
    pub value: LikertValue,
    pub set: QuestionSet,
}

impl AnswerRecord {
    pub fn new(item_id: impl Into<String>, set: QuestionSet, value: u8) -> Result<Self, LikertOutOfRange> {
        Ok(Self {
            item_id: item_id.into(),
            value: LikertValue::try_from(value)?,
            set,
        })
    }
}

/// Direction-corrected item score.
pub fn adjusted_score(direction: Direction, value: LikertValue) -> u8 {
    match direction {
        Direction::Forward => value.get(),
        Direction::Reverse => value.reversed().get(),
    }
}

/// Per-trait raw aggregate. The denominator counts only matched records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScore {
    pub raw_sum: u32,
    pub answered: usize,
    /// Percent of the maximum possible over the matched records, rounded.
    pub raw_percent: u8,
}

impl RawScore {
    pub const ZERO: Self = Self {
        raw_sum: 0,
        answered: 0,
        raw_percent: 0,
    };
}

/// Direction-corrected values for one trait, in original answer order.
/// Records referencing unknown item ids are silently skipped.
fn adjusted_values(records: &[AnswerRecord], tag: TraitTag) -> Vec<u8> {
    records
        .iter()
        .filter(|record| record.set == tag.set())
        .filter_map(|record| {
            let item = catalog::find(record.set, &record.item_id)?;
            (item.tag == tag).then(|| adjusted_score(item.direction, record.value))
        })
        .collect()
}

/// Aggregate the raw score for one trait.
pub fn raw_trait_score(records: &[AnswerRecord], tag: TraitTag) -> RawScore {
    let values = adjusted_values(records, tag);
    if values.is_empty() {
        return RawScore::ZERO;
    }

    let raw_sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    let max = (values.len() * usize::from(LikertValue::MAX)) as f64;
    let raw_percent = (f64::from(raw_sum) / max * 100.0).round() as u8;

    RawScore {
        raw_sum,
        answered: values.len(),
        raw_percent,
    }
}

/// Fully standardized per-trait result. Derived on demand; never persisted
/// as ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitScore {
    pub raw_percent: u8,
    pub standard: u8,
    pub percentile: u8,
    pub interval: ConfidenceInterval,
    pub reliability: f64,
    pub warnings: Vec<String>,
    pub reliability_flag: bool,
}

impl TraitScore {
    pub const fn empty() -> Self {
        Self {
            raw_percent: 0,
            standard: 0,
            percentile: 0,
            interval: ConfidenceInterval::ZERO,
            reliability: 0.0,
            warnings: Vec::new(),
            reliability_flag: false,
        }
    }
}

/// Score one trait end to end: raw percent, T score against the age norm,
/// percentile, Spearman-Brown reliability, confidence interval, and
/// response-pattern warnings.
pub fn score_trait(records: &[AnswerRecord], tag: TraitTag, norm: &AgeNorm) -> TraitScore {
    let values = adjusted_values(records, tag);
    if values.is_empty() {
        return TraitScore::empty();
    }

    let raw_sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    let max = (values.len() * usize::from(LikertValue::MAX)) as f64;
    let raw_percent = (f64::from(raw_sum) / max * 100.0).round() as u8;

    let standard = standardize::t_score(f64::from(raw_percent), norm.mean, norm.sd);
    let percentile = standardize::percentile_rank(standard);
    let reliability = standardize::spearman_brown(values.len());
    let se = standardize::standard_error(norm.sd, reliability);
    let interval = standardize::confidence_interval(standard, se);

    let mut warnings = Vec::new();
    let mut reliability_flag = false;

    let pattern = quality::detect_response_pattern(&values);
    if pattern.flagged {
        warnings.push(format!(
            "{}: unusual response pattern ({})",
            tag.name(),
            pattern.detail
        ));
        reliability_flag = true;
    }

    if values.len() < SMALL_SAMPLE_ITEMS {
        warnings.push(format!(
            "{}: only {} item(s) answered, result may be unreliable",
            tag.name(),
            values.len()
        ));
        reliability_flag = true;
    }

    TraitScore {
        raw_percent,
        standard,
        percentile,
        interval,
        reliability,
        warnings,
        reliability_flag,
    }
}
