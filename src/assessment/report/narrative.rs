//! Narrative generator boundary.
//!
//! The generator receives the opaque markdown summary and returns a JSON
//! document matching [`NarrativeReport`]. Anything transport-specific lives
//! behind the [`NarrativeGenerator`] trait; this module only owns the
//! schema and payload parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One highlighted strength in the narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthHighlight {
    pub dimension: String,
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// VARK-style learning preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStyle {
    pub primary: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerInterests {
    pub holland_code: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeMetadata {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// The narrative document the generator is asked to produce. Every section
/// beyond the overall summary is optional so partial payloads still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeReport {
    pub overall_summary: String,
    #[serde(default)]
    pub strength_analysis: Vec<StrengthHighlight>,
    #[serde(default)]
    pub development_suggestions: Vec<String>,
    #[serde(default)]
    pub learning_style: Option<LearningStyle>,
    #[serde(default)]
    pub career_interests: Option<CareerInterests>,
    #[serde(default)]
    pub potential_prediction: Option<String>,
    #[serde(default)]
    pub attention_points: Vec<String>,
    #[serde(default)]
    pub metadata: Option<NarrativeMetadata>,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("generator credentials are not configured")]
    MissingCredentials,
    #[error("could not reach the generator: {0}")]
    Transport(String),
    #[error("generator responded with status {status}")]
    Status { status: u16 },
    #[error("generator returned an empty response")]
    EmptyResponse,
    #[error("generator payload could not be parsed")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Produces a narrative from the markdown assessment summary.
pub trait NarrativeGenerator {
    fn generate(&self, summary: &str) -> Result<NarrativeReport, GeneratorError>;
}

/// Generators routinely wrap the JSON document in a markdown code fence.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse a raw generator response into the narrative schema.
pub fn parse_narrative_payload(raw: &str) -> Result<NarrativeReport, GeneratorError> {
    let body = strip_code_fences(raw);
    if body.is_empty() {
        return Err(GeneratorError::EmptyResponse);
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{"overallSummary": "A curious and balanced profile."}"#;

    #[test]
    fn plain_json_parses() {
        let report = parse_narrative_payload(MINIMAL).expect("parses");
        assert_eq!(report.overall_summary, "A curious and balanced profile.");
        assert!(report.strength_analysis.is_empty());
        assert!(report.learning_style.is_none());
    }

    #[test]
    fn fenced_json_parses() {
        let fenced = format!("```json\n{MINIMAL}\n```");
        let report = parse_narrative_payload(&fenced).expect("parses");
        assert_eq!(report.overall_summary, "A curious and balanced profile.");

        let bare_fence = format!("```\n{MINIMAL}\n```");
        assert!(parse_narrative_payload(&bare_fence).is_ok());
    }

    #[test]
    fn empty_response_is_its_own_error() {
        assert!(matches!(
            parse_narrative_payload("   "),
            Err(GeneratorError::EmptyResponse)
        ));
        assert!(matches!(
            parse_narrative_payload("```json\n```"),
            Err(GeneratorError::EmptyResponse)
        ));
    }

    #[test]
    fn malformed_payload_reports_parse_error() {
        assert!(matches!(
            parse_narrative_payload("{\"overallSummary\": 42}"),
            Err(GeneratorError::MalformedPayload(_))
        ));
    }

    #[test]
    fn full_payload_round_trips_camel_case() {
        let raw = r#"{
            "overallSummary": "Strong spatial reasoning.",
            "strengthAnalysis": [
                {"dimension": "Spatial", "summary": "Sees structure quickly.", "suggestions": ["building kits"]}
            ],
            "developmentSuggestions": ["daily reading"],
            "learningStyle": {"primary": "visual", "description": "learns from diagrams"},
            "careerInterests": {"hollandCode": "IRA", "fields": ["engineering"]},
            "potentialPrediction": "Likely to enjoy design work.",
            "attentionPoints": ["short attention during repetitive tasks"],
            "metadata": {"model": "narrator-1"}
        }"#;
        let report = parse_narrative_payload(raw).expect("parses");
        assert_eq!(report.strength_analysis[0].dimension, "Spatial");
        assert_eq!(
            report.career_interests.as_ref().map(|c| c.holland_code.as_str()),
            Some("IRA")
        );
        assert_eq!(report.attention_points.len(), 1);
    }
}
