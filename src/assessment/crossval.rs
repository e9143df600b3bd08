//! Cross-validation between questionnaire self-report and behavioral task
//! performance.
//!
//! The two instruments measure overlapping constructs through fixed weight
//! tables. Agreement between them drives how much the behavioral signal is
//! allowed to pull the integrated score away from the self-report.

use crate::assessment::behavioral::{TaskCategory, TaskScores};
use crate::assessment::catalog::IntelligenceDimension;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gap magnitudes for the per-dimension agreement label.
const ALIGNED_GAP: f64 = 15.0;
const MILD_GAP: f64 = 30.0;

/// Maximum expected-vs-actual gap for a task to count as validated.
const VALIDATION_TOLERANCE: f64 = 25.0;

/// Score substituted for a dimension the questionnaire never measured.
const NEUTRAL_SCORE: u8 = 50;

/// How strongly each behavioral task loads on an intelligence dimension.
/// Interpersonal has no behavioral counterpart and is skipped.
pub fn dimension_task_weights(
    dimension: IntelligenceDimension,
) -> &'static [(TaskCategory, f64)] {
    use IntelligenceDimension as Dim;
    use TaskCategory as Task;
    match dimension {
        Dim::Linguistic => &[
            (Task::Memory, 0.30),
            (Task::Creativity, 0.25),
            (Task::Logic, 0.10),
        ],
        Dim::Logical => &[(Task::Logic, 0.60), (Task::Attention, 0.45)],
        Dim::Spatial => &[
            (Task::Memory, 0.35),
            (Task::Attention, 0.35),
            (Task::Creativity, 0.30),
        ],
        Dim::Musical => &[(Task::Memory, 0.15), (Task::Creativity, 0.10)],
        Dim::Bodily => &[(Task::Creativity, 0.15)],
        Dim::Interpersonal => &[],
        Dim::Intrapersonal => &[(Task::Attention, 0.15)],
        Dim::Naturalistic => &[
            (Task::Attention, 0.05),
            (Task::Logic, 0.15),
            (Task::Creativity, 0.20),
        ],
    }
}

/// The same loadings viewed from the task side, used to predict a task
/// score from the questionnaire profile.
pub fn task_dimension_weights(
    category: TaskCategory,
) -> &'static [(IntelligenceDimension, f64)] {
    use IntelligenceDimension as Dim;
    match category {
        TaskCategory::Attention => &[
            (Dim::Logical, 0.45),
            (Dim::Spatial, 0.35),
            (Dim::Intrapersonal, 0.15),
            (Dim::Naturalistic, 0.05),
        ],
        TaskCategory::Memory => &[
            (Dim::Linguistic, 0.30),
            (Dim::Spatial, 0.35),
            (Dim::Musical, 0.15),
            (Dim::Logical, 0.20),
        ],
        TaskCategory::Logic => &[
            (Dim::Logical, 0.60),
            (Dim::Spatial, 0.15),
            (Dim::Linguistic, 0.10),
            (Dim::Naturalistic, 0.15),
        ],
        TaskCategory::Creativity => &[
            (Dim::Linguistic, 0.25),
            (Dim::Spatial, 0.30),
            (Dim::Bodily, 0.15),
            (Dim::Naturalistic, 0.20),
            (Dim::Musical, 0.10),
        ],
    }
}

/// Direction-aware verdict on one dimension's self-report/performance gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgreementLabel {
    Aligned,
    MildDivergence,
    SelfReportHigher,
    PerformanceHigher,
}

impl AgreementLabel {
    pub const fn describe(self) -> &'static str {
        match self {
            AgreementLabel::Aligned => "self-report and task performance align",
            AgreementLabel::MildDivergence => "self-report and task performance mildly diverge",
            AgreementLabel::SelfReportHigher => "self-report runs well above task performance",
            AgreementLabel::PerformanceHigher => "task performance runs well above self-report",
        }
    }
}

fn label_for_gap(gap: f64) -> AgreementLabel {
    if gap.abs() <= ALIGNED_GAP {
        AgreementLabel::Aligned
    } else if gap.abs() <= MILD_GAP {
        AgreementLabel::MildDivergence
    } else if gap > 0.0 {
        AgreementLabel::SelfReportHigher
    } else {
        AgreementLabel::PerformanceHigher
    }
}

/// Agreement between the questionnaire and the behavioral estimate for one
/// dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionConsistency {
    pub dimension: IntelligenceDimension,
    pub questionnaire: u8,
    /// Weighted behavioral estimate, two decimals.
    pub behavioral: f64,
    /// Signed gap, questionnaire minus behavioral. Positive means the
    /// respondent rates themselves above their measured performance.
    pub gap: f64,
    /// 100 minus the gap magnitude, floored at 0.
    pub agreement: u8,
    pub label: AgreementLabel,
}

/// Consistency across every dimension with a behavioral counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub overall: u8,
    pub by_dimension: BTreeMap<IntelligenceDimension, DimensionConsistency>,
    pub reliable: bool,
    pub flagged: bool,
}

/// Weighted behavioral estimate for one dimension, when any task loads on
/// it.
fn behavioral_estimate(dimension: IntelligenceDimension, tasks: &TaskScores) -> Option<f64> {
    let weights = dimension_task_weights(dimension);
    if weights.is_empty() {
        return None;
    }
    let total: f64 = weights.iter().map(|&(_, w)| w).sum();
    let weighted: f64 = weights
        .iter()
        .map(|&(task, w)| w * f64::from(tasks.get(task)))
        .sum();
    Some(weighted / total)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Compare the questionnaire profile against the behavioral estimates.
/// Dimensions the questionnaire never measured enter at the neutral 50.
pub fn consistency_report(
    questionnaire: &BTreeMap<IntelligenceDimension, u8>,
    tasks: &TaskScores,
) -> ConsistencyReport {
    let mut by_dimension = BTreeMap::new();

    for dimension in IntelligenceDimension::ALL {
        let Some(estimate) = behavioral_estimate(dimension, tasks) else {
            continue;
        };
        let reported = questionnaire.get(&dimension).copied().unwrap_or(NEUTRAL_SCORE);
        let gap = f64::from(reported) - estimate;
        let agreement = (100.0 - gap.abs()).max(0.0).round() as u8;
        by_dimension.insert(
            dimension,
            DimensionConsistency {
                dimension,
                questionnaire: reported,
                behavioral: round2(estimate),
                gap: round2(gap),
                agreement,
                label: label_for_gap(gap),
            },
        );
    }

    let overall = if by_dimension.is_empty() {
        0
    } else {
        let sum: u32 = by_dimension.values().map(|c| u32::from(c.agreement)).sum();
        (f64::from(sum) / by_dimension.len() as f64).round() as u8
    };

    ConsistencyReport {
        overall,
        reliable: overall >= 70,
        flagged: overall < 50,
        by_dimension,
    }
}

/// How much weight the behavioral estimate earns in the integrated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const fn behavioral_weight(self) -> f64 {
        match self {
            Confidence::High => 0.4,
            Confidence::Medium => 0.3,
            Confidence::Low => 0.2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

fn confidence_for(total_weight: f64, agreement: u8) -> Confidence {
    if total_weight >= 0.5 && agreement >= 70 {
        Confidence::High
    } else if total_weight >= 0.3 || agreement >= 50 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Questionnaire score adjusted toward the behavioral estimate, in
/// proportion to the confidence in that estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedScore {
    pub dimension: IntelligenceDimension,
    pub questionnaire: u8,
    pub behavioral: Option<f64>,
    pub confidence: Confidence,
    pub integrated: u8,
}

pub fn integrated_scores(
    questionnaire: &BTreeMap<IntelligenceDimension, u8>,
    tasks: &TaskScores,
    consistency: &ConsistencyReport,
) -> Vec<IntegratedScore> {
    IntelligenceDimension::ALL
        .iter()
        .map(|&dimension| {
            let reported = questionnaire.get(&dimension).copied().unwrap_or(NEUTRAL_SCORE);
            match behavioral_estimate(dimension, tasks) {
                None => IntegratedScore {
                    dimension,
                    questionnaire: reported,
                    behavioral: None,
                    confidence: Confidence::Low,
                    integrated: reported,
                },
                Some(estimate) => {
                    let total_weight: f64 = dimension_task_weights(dimension)
                        .iter()
                        .map(|&(_, w)| w)
                        .sum();
                    let agreement = consistency
                        .by_dimension
                        .get(&dimension)
                        .map(|c| c.agreement)
                        .unwrap_or(0);
                    let confidence = confidence_for(total_weight, agreement);
                    let w = confidence.behavioral_weight();
                    let blended = f64::from(reported) * (1.0 - w) + estimate * w;
                    IntegratedScore {
                        dimension,
                        questionnaire: reported,
                        behavioral: Some(round2(estimate)),
                        confidence,
                        integrated: blended.round().clamp(0.0, 100.0) as u8,
                    }
                }
            }
        })
        .collect()
}

/// Check one task's measured score against what the questionnaire profile
/// predicts for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityValidation {
    pub category: TaskCategory,
    /// Prediction from the questionnaire profile, two decimals.
    pub expected: f64,
    pub actual: u8,
    pub gap: f64,
    pub validated: bool,
}

pub fn validate_abilities(
    questionnaire: &BTreeMap<IntelligenceDimension, u8>,
    tasks: &TaskScores,
) -> Vec<AbilityValidation> {
    TaskCategory::ALL
        .iter()
        .map(|&category| {
            let weights = task_dimension_weights(category);
            let total: f64 = weights.iter().map(|&(_, w)| w).sum();
            let weighted: f64 = weights
                .iter()
                .map(|&(dim, w)| {
                    let score = questionnaire.get(&dim).copied().unwrap_or(NEUTRAL_SCORE);
                    w * f64::from(score)
                })
                .sum();
            let expected = weighted / total;
            let actual = tasks.get(category);
            let gap = f64::from(actual) - expected;
            AbilityValidation {
                category,
                expected: round2(expected),
                actual,
                gap: round2(gap),
                validated: gap.abs() <= VALIDATION_TOLERANCE,
            }
        })
        .collect()
}

/// Overall reliability verdict for the combined assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityTier {
    High,
    Moderate,
    Caution,
}

impl ReliabilityTier {
    pub const fn describe(self) -> &'static str {
        match self {
            ReliabilityTier::High => "results are mutually consistent and can be read directly",
            ReliabilityTier::Moderate => "results are broadly usable; flagged dimensions deserve a second look",
            ReliabilityTier::Caution => "results disagree substantially; interpret with caution",
        }
    }
}

/// Full cross-validation output for one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub consistency: ConsistencyReport,
    pub integrated: Vec<IntegratedScore>,
    pub validations: Vec<AbilityValidation>,
    pub tier: ReliabilityTier,
    pub flags: Vec<String>,
}

/// Run the whole cross-validation pass: per-dimension consistency,
/// confidence-weighted integration, ability validation, and the tier
/// verdict.
pub fn integrated_assessment(
    questionnaire: &BTreeMap<IntelligenceDimension, u8>,
    tasks: &TaskScores,
) -> OverallAssessment {
    let consistency = consistency_report(questionnaire, tasks);
    let integrated = integrated_scores(questionnaire, tasks, &consistency);
    let validations = validate_abilities(questionnaire, tasks);

    let validated_count = validations.iter().filter(|v| v.validated).count();
    let mut flags = Vec::new();

    let tier = if consistency.overall >= 70 && validated_count >= 3 {
        ReliabilityTier::High
    } else if consistency.overall >= 50 {
        for item in consistency.by_dimension.values() {
            if item.gap.abs() > MILD_GAP {
                flags.push(format!(
                    "{}: {}",
                    item.dimension.name(),
                    item.label.describe()
                ));
            }
        }
        ReliabilityTier::Moderate
    } else {
        flags.push("possible inattention during the behavioral tasks".to_string());
        flags.push("possible unfamiliarity with the task formats".to_string());
        flags.push("self-perception may not match current abilities".to_string());
        ReliabilityTier::Caution
    };

    OverallAssessment {
        consistency,
        integrated,
        validations,
        tier,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_questionnaire(score: u8) -> BTreeMap<IntelligenceDimension, u8> {
        IntelligenceDimension::ALL
            .iter()
            .map(|&dim| (dim, score))
            .collect()
    }

    fn uniform_tasks(score: u8) -> TaskScores {
        TaskScores {
            attention: score,
            memory: score,
            logic: score,
            creativity: score,
        }
    }

    #[test]
    fn identical_profiles_agree_perfectly() {
        let report = consistency_report(&uniform_questionnaire(60), &uniform_tasks(60));
        assert_eq!(report.overall, 100);
        assert!(report.reliable);
        assert!(!report.flagged);
        assert!(report
            .by_dimension
            .values()
            .all(|c| c.label == AgreementLabel::Aligned));
    }

    #[test]
    fn interpersonal_has_no_behavioral_counterpart() {
        let report = consistency_report(&uniform_questionnaire(60), &uniform_tasks(60));
        assert!(!report
            .by_dimension
            .contains_key(&IntelligenceDimension::Interpersonal));
        assert_eq!(report.by_dimension.len(), 7);
    }

    #[test]
    fn logical_gap_is_signed_and_mild() {
        let mut questionnaire = uniform_questionnaire(60);
        questionnaire.insert(IntelligenceDimension::Logical, 80);
        let tasks = TaskScores {
            attention: 70,
            memory: 60,
            logic: 60,
            creativity: 60,
        };
        let report = consistency_report(&questionnaire, &tasks);
        let logical = &report.by_dimension[&IntelligenceDimension::Logical];
        // (0.60 * 60 + 0.45 * 70) / 1.05 = 64.29
        assert!((logical.behavioral - 64.29).abs() < 1e-9);
        assert!((logical.gap - 15.71).abs() < 1e-9);
        assert_eq!(logical.label, AgreementLabel::MildDivergence);
        assert_eq!(logical.agreement, 84);
    }

    #[test]
    fn large_positive_gap_labels_self_report_higher() {
        let mut questionnaire = uniform_questionnaire(50);
        questionnaire.insert(IntelligenceDimension::Logical, 95);
        let tasks = uniform_tasks(40);
        let report = consistency_report(&questionnaire, &tasks);
        assert_eq!(
            report.by_dimension[&IntelligenceDimension::Logical].label,
            AgreementLabel::SelfReportHigher
        );
    }

    #[test]
    fn missing_questionnaire_dimension_defaults_to_neutral() {
        let questionnaire = BTreeMap::new();
        let report = consistency_report(&questionnaire, &uniform_tasks(50));
        for item in report.by_dimension.values() {
            assert_eq!(item.questionnaire, 50);
        }
    }

    #[test]
    fn confidence_scales_behavioral_weight() {
        assert_eq!(Confidence::High.behavioral_weight(), 0.4);
        assert_eq!(Confidence::Medium.behavioral_weight(), 0.3);
        assert_eq!(Confidence::Low.behavioral_weight(), 0.2);
        // Strong loading plus strong agreement earns high confidence.
        assert_eq!(confidence_for(1.05, 90), Confidence::High);
        // Weak loading but decent agreement stays medium.
        assert_eq!(confidence_for(0.15, 60), Confidence::Medium);
        assert_eq!(confidence_for(0.15, 20), Confidence::Low);
    }

    #[test]
    fn integration_pulls_toward_the_behavioral_estimate() {
        let mut questionnaire = uniform_questionnaire(60);
        questionnaire.insert(IntelligenceDimension::Logical, 80);
        let tasks = TaskScores {
            attention: 70,
            memory: 60,
            logic: 60,
            creativity: 60,
        };
        let report = consistency_report(&questionnaire, &tasks);
        let integrated = integrated_scores(&questionnaire, &tasks, &report);
        let logical = integrated
            .iter()
            .find(|s| s.dimension == IntelligenceDimension::Logical)
            .expect("logical present");
        // Agreement 84 and loading 1.05 give high confidence, weight 0.4:
        // 80 * 0.6 + 64.29 * 0.4 = 73.7.
        assert_eq!(logical.confidence, Confidence::High);
        assert_eq!(logical.integrated, 74);
        assert!(logical.integrated < logical.questionnaire);
    }

    #[test]
    fn unmapped_dimension_keeps_the_questionnaire_score() {
        let questionnaire = uniform_questionnaire(72);
        let tasks = uniform_tasks(30);
        let report = consistency_report(&questionnaire, &tasks);
        let integrated = integrated_scores(&questionnaire, &tasks, &report);
        let interpersonal = integrated
            .iter()
            .find(|s| s.dimension == IntelligenceDimension::Interpersonal)
            .expect("interpersonal present");
        assert_eq!(interpersonal.integrated, 72);
        assert_eq!(interpersonal.behavioral, None);
    }

    #[test]
    fn ability_validation_tolerates_moderate_gaps() {
        let questionnaire = uniform_questionnaire(60);
        let tasks = TaskScores {
            attention: 50,
            memory: 80,
            logic: 20,
            creativity: 60,
        };
        let validations = validate_abilities(&questionnaire, &tasks);
        let by_category = |c: TaskCategory| {
            validations
                .iter()
                .find(|v| v.category == c)
                .expect("all categories present")
        };
        // Expected is 60 everywhere under a uniform profile.
        assert!(by_category(TaskCategory::Attention).validated);
        assert!(by_category(TaskCategory::Memory).validated);
        assert!(!by_category(TaskCategory::Logic).validated);
        assert!((by_category(TaskCategory::Logic).gap + 40.0).abs() < 1e-9);
    }

    #[test]
    fn consistent_session_earns_high_tier() {
        let assessment = integrated_assessment(&uniform_questionnaire(65), &uniform_tasks(65));
        assert_eq!(assessment.tier, ReliabilityTier::High);
        assert!(assessment.flags.is_empty());
    }

    #[test]
    fn divergent_session_earns_caution_with_standing_flags() {
        let assessment = integrated_assessment(&uniform_questionnaire(95), &uniform_tasks(5));
        assert_eq!(assessment.tier, ReliabilityTier::Caution);
        assert_eq!(assessment.flags.len(), 3);
    }

    #[test]
    fn moderate_tier_names_the_divergent_dimensions() {
        // Estimates sit at 55 everywhere, so each mapped dimension gaps by
        // 31: agreement 69 overall and no task validates.
        let questionnaire = uniform_questionnaire(86);
        let tasks = uniform_tasks(55);
        let assessment = integrated_assessment(&questionnaire, &tasks);
        assert_eq!(assessment.tier, ReliabilityTier::Moderate);
        assert!(assessment
            .flags
            .iter()
            .any(|flag| flag.contains("Logical-Mathematical")));
    }
}
