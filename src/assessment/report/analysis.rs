//! Statistically derived report sections: Holland code, strength and
//! improvement picks, and the qualitative overall line. These stay
//! available even when the narrative generator fails.

use crate::assessment::catalog::{IntelligenceDimension, InterestDimension};
use serde::Serialize;
use std::collections::BTreeMap;

const STRENGTH_COUNT: usize = 3;
const IMPROVEMENT_COUNT: usize = 2;

/// Holland code: the letters of the top three interest dimensions, ordered
/// by standardized score. Ties resolve in RIASEC order.
pub fn holland_code(scores: &BTreeMap<InterestDimension, u8>) -> String {
    let mut ranked: Vec<_> = scores.iter().map(|(&dim, &score)| (dim, score)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(3)
        .map(|(dim, _)| dim.code())
        .collect()
}

/// One dimension picked out for the report, with canned advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionInsight {
    pub dimension: IntelligenceDimension,
    pub score: u8,
    pub advice: &'static str,
}

const fn strength_advice(dimension: IntelligenceDimension) -> &'static str {
    use IntelligenceDimension as Dim;
    match dimension {
        Dim::Linguistic => "keep a journal, retell stories, try word games together",
        Dim::Logical => "offer puzzles, strategy games, and small experiments",
        Dim::Spatial => "provide building kits, maps, and drawing materials",
        Dim::Musical => "encourage an instrument or rhythm and singing games",
        Dim::Bodily => "make room for sports, dance, and hands-on crafts",
        Dim::Interpersonal => "arrange group projects and cooperative games",
        Dim::Intrapersonal => "support journaling and independent projects",
        Dim::Naturalistic => "plan outdoor observation, collections, gardening",
    }
}

const fn improvement_advice(dimension: IntelligenceDimension) -> &'static str {
    use IntelligenceDimension as Dim;
    match dimension {
        Dim::Linguistic => "read aloud together a little every day",
        Dim::Logical => "practice counting and sorting games in daily routines",
        Dim::Spatial => "start with simple jigsaw puzzles and block play",
        Dim::Musical => "add background music and simple clapping rhythms",
        Dim::Bodily => "build in short daily movement breaks",
        Dim::Interpersonal => "create low-pressure chances to play with peers",
        Dim::Intrapersonal => "ask gentle reflection questions after activities",
        Dim::Naturalistic => "take short nature walks and name what you find",
    }
}

fn ranked(scores: &BTreeMap<IntelligenceDimension, u8>) -> Vec<(IntelligenceDimension, u8)> {
    let mut ranked: Vec<_> = scores.iter().map(|(&dim, &score)| (dim, score)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Top-scoring dimensions with enrichment advice.
pub fn strengths(scores: &BTreeMap<IntelligenceDimension, u8>) -> Vec<DimensionInsight> {
    ranked(scores)
        .into_iter()
        .take(STRENGTH_COUNT)
        .map(|(dimension, score)| DimensionInsight {
            dimension,
            score,
            advice: strength_advice(dimension),
        })
        .collect()
}

/// Lowest-scoring dimensions with gentle starting points.
pub fn improvements(scores: &BTreeMap<IntelligenceDimension, u8>) -> Vec<DimensionInsight> {
    let mut ranked = ranked(scores);
    ranked.reverse();
    ranked
        .into_iter()
        .take(IMPROVEMENT_COUNT)
        .map(|(dimension, score)| DimensionInsight {
            dimension,
            score,
            advice: improvement_advice(dimension),
        })
        .collect()
}

/// Qualitative one-liner from the mean intelligence and cognitive scores.
pub fn overall_assessment(intelligence_avg: u8, cognitive_avg: u8) -> &'static str {
    let combined = (u16::from(intelligence_avg) + u16::from(cognitive_avg)) / 2;
    if intelligence_avg >= 75 && combined >= 70 {
        "a clearly profiled, well-developed set of strengths"
    } else if intelligence_avg >= 60 || combined >= 60 {
        "a balanced profile with several areas standing out"
    } else {
        "an emerging profile; scores will sharpen with more practice and retesting"
    }
}
