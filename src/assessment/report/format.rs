//! Markdown assessment summary.
//!
//! This is the opaque text block handed to the narrative generator, and it
//! doubles as the human-readable session dump for the demo binary.

use crate::assessment::behavioral::TaskCategory;
use crate::assessment::catalog::{self, QuestionSet};
use crate::assessment::scoring::TraitScore;
use crate::assessment::store::SessionState;
use std::fmt::Write as _;

fn push_scores<K: Copy>(
    out: &mut String,
    scores: &std::collections::BTreeMap<K, TraitScore>,
    name: impl Fn(K) -> &'static str,
) {
    let mut ranked: Vec<_> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.standard.cmp(&a.1.standard));

    let _ = writeln!(
        out,
        "| Dimension | Standard | Percentile | 95% interval | Raw % |"
    );
    let _ = writeln!(out, "|---|---|---|---|---|");
    for (&dim, score) in &ranked {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {}-{} | {} |",
            name(dim),
            score.standard,
            score.percentile,
            score.interval.lower,
            score.interval.upper,
            score.raw_percent
        );
    }

    if !ranked.is_empty() {
        let sum: u32 = ranked.iter().map(|(_, s)| u32::from(s.standard)).sum();
        let average = f64::from(sum) / ranked.len() as f64;
        let _ = writeln!(out, "\nAverage standard score: {:.1}", average);
    }
}

fn push_answers(out: &mut String, session: &SessionState, set: QuestionSet) {
    let records: Vec<_> = session
        .answers
        .records()
        .iter()
        .filter(|record| record.set == set)
        .collect();
    if records.is_empty() {
        let _ = writeln!(out, "No answers recorded.");
        return;
    }

    let _ = writeln!(out, "| Item | Question | Answer |");
    let _ = writeln!(out, "|---|---|---|");
    for record in records {
        let text = catalog::find(set, &record.item_id)
            .map(|item| item.text)
            .unwrap_or("(unknown item)");
        let _ = writeln!(
            out,
            "| {} | {} | {} ({}) |",
            record.item_id,
            text,
            record.value.get(),
            record.value.describe()
        );
    }
}

/// Render the full session into a markdown summary.
pub fn markdown_summary(session: &SessionState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Assessment Summary\n");

    let _ = writeln!(out, "## Basic information\n");
    match &session.profile {
        Some(profile) => {
            let _ = writeln!(out, "- Name: {}", profile.name);
            let _ = writeln!(out, "- Age: {}", profile.age);
            let _ = writeln!(out, "- Gender: {}", profile.gender.label());
            let _ = writeln!(out, "- Age band: {}", session.band().describe());
        }
        None => {
            let _ = writeln!(out, "- No profile recorded");
            let _ = writeln!(out, "- Age band (fallback): {}", session.band().describe());
        }
    }

    let _ = writeln!(out, "\n## Intelligence scores\n");
    push_scores(&mut out, &session.trait_scores(), |dim| dim.name());

    let _ = writeln!(out, "\n## Interest scores\n");
    let interests = session.interest_scores();
    push_scores(&mut out, &interests, |dim| dim.name());
    let code_input = interests
        .iter()
        .map(|(&dim, score)| (dim, score.standard))
        .collect();
    let code = super::analysis::holland_code(&code_input);
    if !code.is_empty() {
        let _ = writeln!(out, "\nHolland code: {code}");
    }

    let _ = writeln!(out, "\n## Behavioral tasks\n");
    let tasks = session.behavioral.task_scores();
    let _ = writeln!(out, "| Task | Score |");
    let _ = writeln!(out, "|---|---|");
    for category in TaskCategory::ALL {
        let _ = writeln!(out, "| {} | {} |", category.name(), tasks.get(category));
    }
    let _ = writeln!(
        out,
        "\nRounds played: {} visual search, {} memory, {} logic, {} creative",
        session.behavioral.visual_search_rounds().len(),
        session.behavioral.memory_rounds().len(),
        session.behavioral.logic_rounds().len(),
        session.behavioral.creative_rounds().len()
    );

    let _ = writeln!(out, "\n## Consistency\n");
    let assessment = session.integrated_assessment();
    let _ = writeln!(
        out,
        "Overall agreement: {} ({})",
        assessment.consistency.overall,
        assessment.tier.describe()
    );
    let _ = writeln!(out, "\n| Dimension | Self-report | Behavioral | Agreement |");
    let _ = writeln!(out, "|---|---|---|---|");
    for item in assessment.consistency.by_dimension.values() {
        let _ = writeln!(
            out,
            "| {} | {} | {:.1} | {} |",
            item.dimension.name(),
            item.questionnaire,
            item.behavioral,
            item.agreement
        );
    }

    let warnings = session.warnings();
    if !warnings.is_empty() {
        let _ = writeln!(out, "\n## Warnings\n");
        for warning in warnings {
            let _ = writeln!(out, "- {warning}");
        }
    }

    let _ = writeln!(out, "\n## Intelligence answers\n");
    push_answers(&mut out, session, QuestionSet::Intelligence);
    let _ = writeln!(out, "\n## Interest answers\n");
    push_answers(&mut out, session, QuestionSet::Interest);

    out
}
