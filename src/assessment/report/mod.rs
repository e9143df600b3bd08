//! Report composition.
//!
//! Everything statistically derived is computed locally and always present.
//! The narrative section comes from an external generator and is strictly
//! optional: a generator failure is recorded on the report, never cached,
//! and never blocks the rest.

pub mod analysis;
pub mod format;
pub mod narrative;

use crate::assessment::behavioral::TaskScores;
use crate::assessment::catalog::{IntelligenceDimension, InterestDimension};
use crate::assessment::crossval::OverallAssessment;
use crate::assessment::norms::DataQuality;
use crate::assessment::scoring::TraitScore;
use crate::assessment::store::{Profile, SessionState};
use self::analysis::DimensionInsight;
use self::narrative::{NarrativeGenerator, NarrativeReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// The complete assessment report for one session.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    pub profile: Option<Profile>,
    pub intelligence: BTreeMap<IntelligenceDimension, TraitScore>,
    pub interests: BTreeMap<InterestDimension, TraitScore>,
    pub tasks: TaskScores,
    pub assessment: OverallAssessment,
    pub holland_code: String,
    pub strengths: Vec<DimensionInsight>,
    pub improvements: Vec<DimensionInsight>,
    pub overall: &'static str,
    pub data_quality: DataQuality,
    pub warnings: Vec<String>,
    /// The markdown block that was (or would be) sent to the generator.
    pub summary: String,
    pub narrative: Option<NarrativeReport>,
    pub narrative_error: Option<String>,
}

fn standard_map<K: Copy + Ord>(scores: &BTreeMap<K, TraitScore>) -> BTreeMap<K, u8> {
    scores
        .iter()
        .map(|(&dim, score)| (dim, score.standard))
        .collect()
}

fn average<K: Copy + Ord>(values: &BTreeMap<K, u8>) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u32 = values.values().map(|&v| u32::from(v)).sum();
    (f64::from(sum) / values.len() as f64).round() as u8
}

/// Compose the report. When a generator is supplied the markdown summary is
/// sent to it; on failure the statistical sections stand alone.
pub fn compose(
    session: &SessionState,
    generator: Option<&dyn NarrativeGenerator>,
) -> AssessmentReport {
    let intelligence = session.trait_scores();
    let interests = session.interest_scores();
    let tasks = session.behavioral.task_scores();
    let assessment = session.integrated_assessment();
    let summary = format::markdown_summary(session);

    let intelligence_standard = standard_map(&intelligence);
    let interest_standard = standard_map(&interests);

    let cognitive_avg = {
        let total = u16::from(tasks.attention)
            + u16::from(tasks.memory)
            + u16::from(tasks.logic)
            + u16::from(tasks.creativity);
        (total / 4) as u8
    };

    let (narrative, narrative_error) = match generator {
        None => (None, None),
        Some(generator) => match generator.generate(&summary) {
            Ok(report) => (Some(report), None),
            Err(err) => {
                tracing::warn!(error = %err, "narrative generation failed");
                (None, Some(err.to_string()))
            }
        },
    };

    AssessmentReport {
        generated_at: Utc::now(),
        profile: session.profile.clone(),
        holland_code: analysis::holland_code(&interest_standard),
        strengths: analysis::strengths(&intelligence_standard),
        improvements: analysis::improvements(&intelligence_standard),
        overall: analysis::overall_assessment(average(&intelligence_standard), cognitive_avg),
        data_quality: session.data_quality(),
        warnings: session.warnings(),
        intelligence,
        interests,
        tasks,
        assessment,
        summary,
        narrative,
        narrative_error,
    }
}
