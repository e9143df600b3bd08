use growthlens::assessment::behavioral::{
    CreativeRound, LogicRound, MemoryRound, VisualSearchRound,
};
use growthlens::assessment::catalog::{self, AgeBand, IntelligenceDimension, QuestionSet};
use growthlens::assessment::crossval::ReliabilityTier;
use growthlens::assessment::report;
use growthlens::assessment::store::{Gender, Profile, SessionState};

fn answer_everything(session: &mut SessionState, band: AgeBand) {
    for set in [QuestionSet::Intelligence, QuestionSet::Interest] {
        for (index, item) in catalog::items_for_band(set, band).into_iter().enumerate() {
            let value = if item.probe { 2 } else { 3 + (index % 3) as u8 };
            session
                .answers
                .record(item.id, set, value)
                .expect("catalog values are in range");
        }
    }
}

fn play_all_tasks(session: &mut SessionState) {
    for seconds in [16.0, 20.0, 24.0] {
        session
            .behavioral
            .record_visual_search(VisualSearchRound { seconds, errors: 0 });
    }
    for accuracy in [90, 70, 80] {
        session.behavioral.record_memory(MemoryRound { accuracy });
    }
    for correct in [true, false, true] {
        session.behavioral.record_logic(LogicRound {
            correct,
            seconds: 10.0,
        });
    }
    for (prompt, answers) in [
        ("a brick", vec!["paperweight", "doorstop", "garden edge"]),
        ("a paperclip", vec!["hook", "zipper pull"]),
    ] {
        session.behavioral.record_creative(CreativeRound {
            prompt: prompt.to_string(),
            prompt_category: "everyday object".to_string(),
            reference_answers: Vec::new(),
            answers: answers.into_iter().map(String::from).collect(),
        });
    }
}

fn completed_session() -> SessionState {
    let mut session = SessionState::new();
    session.profile = Some(Profile::new("Jona", 11, Gender::Male));
    session.consent.disclaimer_accepted = true;
    answer_everything(&mut session, AgeBand::Middle);
    play_all_tasks(&mut session);
    session
}

#[test]
fn full_session_scores_every_dimension() {
    let session = completed_session();

    let intelligence = session.trait_scores();
    assert_eq!(intelligence.len(), 8);
    for score in intelligence.values() {
        assert!(score.standard <= 100);
        assert!(score.interval.lower <= score.standard);
        assert!(score.standard <= score.interval.upper);
        assert!(score.reliability > 0.0);
    }

    assert_eq!(session.interest_scores().len(), 6);
    assert!(session.behavioral.all_completed());
}

#[test]
fn scoring_is_idempotent_across_calls() {
    let session = completed_session();
    assert_eq!(session.trait_scores(), session.trait_scores());
    assert_eq!(
        session.integrated_assessment(),
        session.integrated_assessment()
    );
}

#[test]
fn cross_validation_produces_a_tier_and_integrated_scores() {
    let session = completed_session();
    let assessment = session.integrated_assessment();

    assert!(matches!(
        assessment.tier,
        ReliabilityTier::High | ReliabilityTier::Moderate | ReliabilityTier::Caution
    ));
    assert_eq!(assessment.integrated.len(), 8);
    assert_eq!(assessment.validations.len(), 4);
    // Interpersonal has no behavioral counterpart; its integrated score is
    // the questionnaire score untouched.
    let interpersonal = assessment
        .integrated
        .iter()
        .find(|s| s.dimension == IntelligenceDimension::Interpersonal)
        .expect("interpersonal integrated");
    assert_eq!(interpersonal.integrated, interpersonal.questionnaire);
}

#[test]
fn probe_heavy_answers_raise_a_bias_warning() {
    let mut session = SessionState::new();
    session.profile = Some(Profile::new("Iva", 9, Gender::Female));
    answer_everything(&mut session, AgeBand::Young);
    // Overwrite the probes with idealized answers.
    for id in ["sds-01", "sds-02", "sds-03", "sds-04"] {
        session
            .answers
            .record(id, QuestionSet::Interest, 5)
            .expect("in range");
    }

    let bias = session.social_desirability();
    assert!(bias.has_bias);
    assert!(session
        .warnings()
        .iter()
        .any(|warning| warning.contains("social desirability")));
}

#[test]
fn report_composes_all_statistical_sections() {
    let session = completed_session();
    let report = report::compose(&session, None);

    assert_eq!(report.intelligence.len(), 8);
    assert_eq!(report.holland_code.len(), 3);
    assert_eq!(report.strengths.len(), 3);
    assert_eq!(report.improvements.len(), 2);
    assert!(report.summary.contains("# Assessment Summary"));
    assert!(report.summary.contains("Jona"));
    assert!(report.narrative.is_none());
}

#[test]
fn archive_then_reset_keeps_history_only() {
    let mut session = completed_session();
    session.archive();
    session.reset();

    assert!(session.profile.is_none());
    assert!(session.answers.records().is_empty());
    assert_eq!(session.behavioral.task_scores().attention, 0);
    assert_eq!(session.history.records().len(), 1);
    assert_eq!(session.history.records()[0].child_name, "Jona");
}

#[test]
fn progress_tracks_band_specific_item_counts() {
    let mut session = SessionState::new();
    session.profile = Some(Profile::new("Rin", 14, Gender::Other));
    let (answered, total) = session.progress(QuestionSet::Intelligence);
    assert_eq!(answered, 0);
    assert_eq!(total, catalog::items_for_band(QuestionSet::Intelligence, AgeBand::Teen).len());

    answer_everything(&mut session, AgeBand::Teen);
    let (answered, total) = session.progress(QuestionSet::Intelligence);
    assert_eq!(answered, total);
}
