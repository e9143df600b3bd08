mod cli;

use clap::Parser;
use cli::{Cli, Command, ItemsArgs, ReportArgs};
use growthlens::assessment::behavioral::{
    CreativeRound, LogicRound, MemoryRound, VisualSearchRound,
};
use growthlens::assessment::catalog::{self, AgeBand, QuestionSet};
use growthlens::assessment::norms::NormTable;
use growthlens::assessment::report::{self, AssessmentReport};
use growthlens::assessment::store::{Gender, Profile, SessionState};
use growthlens::config::AppConfig;
use growthlens::error::AppError;
use growthlens::telemetry;
use tracing::info;

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Report(ReportArgs::default()));

    match command {
        Command::Report(args) => run_report(args, &config),
        Command::Items(args) => run_items(args),
        Command::Norms => run_norms(),
    }
}

fn parse_set(raw: &str) -> Result<QuestionSet, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "intelligence" => Ok(QuestionSet::Intelligence),
        "interest" => Ok(QuestionSet::Interest),
        other => Err(AppError::Input(format!(
            "unknown question set '{other}', expected 'intelligence' or 'interest'"
        ))),
    }
}

fn run_report(args: ReportArgs, config: &AppConfig) -> Result<(), AppError> {
    let session = match args.session {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw).map_err(|err| {
                AppError::Input(format!("could not parse session document: {err}"))
            })?
        }
        None => demo_session(),
    };

    if !config.generator.has_credentials() {
        info!("no generator credentials configured, narrative section skipped");
    }
    // The transport adapter is supplied by embedders; the CLI always
    // renders the statistical report.
    let report = report::compose(&session, None);

    if args.summary {
        println!("{}", report.summary);
    } else {
        render_report(&report);
    }
    Ok(())
}

fn run_items(args: ItemsArgs) -> Result<(), AppError> {
    let band = AgeBand::from_age(args.age).ok_or_else(|| {
        AppError::Input(format!(
            "age {} is outside the supported 7-15 range",
            args.age
        ))
    })?;
    let set = parse_set(&args.set)?;

    println!(
        "{} items for ages {}",
        set.label(),
        band.describe()
    );
    for item in catalog::items_for_band(set, band) {
        let marker = if item.probe { " [probe]" } else { "" };
        println!("- {} | {} | {}{}", item.id, item.tag.name(), item.text, marker);
    }
    Ok(())
}

fn run_norms() -> Result<(), AppError> {
    println!("Norm table");
    for status in NormTable::seeded().status() {
        let state = if status.provisional {
            "provisional"
        } else {
            "established"
        };
        println!(
            "- {} / {}: mean {:.1}, sd {:.1}, n={} ({})",
            status.domain.label(),
            status.band.label(),
            status.mean,
            status.sd,
            status.sample_size,
            state
        );
    }
    Ok(())
}

/// A deterministic sample session so the report command works out of the
/// box.
fn demo_session() -> SessionState {
    let mut session = SessionState::new();
    session.profile = Some(Profile::new("Alex", 10, Gender::Other));
    session.consent.disclaimer_accepted = true;

    for set in [QuestionSet::Intelligence, QuestionSet::Interest] {
        for (index, item) in catalog::items_for_band(set, AgeBand::Middle)
            .into_iter()
            .enumerate()
        {
            let value = if item.probe {
                2
            } else {
                3 + (index % 3) as u8
            };
            if session.answers.record(item.id, set, value).is_err() {
                continue;
            }
        }
    }

    for seconds in [18.0, 22.0, 25.0] {
        session
            .behavioral
            .record_visual_search(VisualSearchRound { seconds, errors: 1 });
    }
    for accuracy in [80, 70, 90] {
        session.behavioral.record_memory(MemoryRound { accuracy });
    }
    for correct in [true, true, false] {
        session.behavioral.record_logic(LogicRound {
            correct,
            seconds: 12.0,
        });
    }
    session.behavioral.record_creative(CreativeRound {
        prompt: "a cardboard box".to_string(),
        prompt_category: "everyday object".to_string(),
        reference_answers: vec!["fort".to_string(), "sled".to_string()],
        answers: vec![
            "rocket".to_string(),
            "puppet stage".to_string(),
            "cat house".to_string(),
        ],
    });
    session.behavioral.record_creative(CreativeRound {
        prompt: "a spoon".to_string(),
        prompt_category: "everyday object".to_string(),
        reference_answers: vec!["catapult".to_string()],
        answers: vec!["drumstick".to_string(), "mirror".to_string()],
    });

    session
}

fn render_report(report: &AssessmentReport) {
    println!("Assessment report");
    match &report.profile {
        Some(profile) => println!(
            "Respondent: {} ({} years, {})",
            profile.name,
            profile.age,
            profile.gender.label()
        ),
        None => println!("Respondent: (no profile)"),
    }
    println!("Overall: {}", report.overall);
    println!("Data quality: {}", report.data_quality.label());

    println!("\nIntelligence scores");
    for (dim, score) in &report.intelligence {
        println!(
            "- {}: {} (pct {}, {}-{})",
            dim.name(),
            score.standard,
            score.percentile,
            score.interval.lower,
            score.interval.upper
        );
    }

    println!("\nInterest scores");
    for (dim, score) in &report.interests {
        println!(
            "- {}: {} (pct {})",
            dim.name(),
            score.standard,
            score.percentile
        );
    }
    if !report.holland_code.is_empty() {
        println!("Holland code: {}", report.holland_code);
    }

    println!("\nBehavioral tasks");
    println!(
        "- attention {}, memory {}, logic {}, creativity {}",
        report.tasks.attention, report.tasks.memory, report.tasks.logic, report.tasks.creativity
    );

    println!(
        "\nConsistency: {} ({})",
        report.assessment.consistency.overall,
        report.assessment.tier.describe()
    );
    for flag in &report.assessment.flags {
        println!("- {flag}");
    }

    if !report.strengths.is_empty() {
        println!("\nStrengths");
        for insight in &report.strengths {
            println!("- {} ({}): {}", insight.dimension.name(), insight.score, insight.advice);
        }
    }
    if !report.improvements.is_empty() {
        println!("\nRoom to grow");
        for insight in &report.improvements {
            println!("- {} ({}): {}", insight.dimension.name(), insight.score, insight.advice);
        }
    }

    if report.warnings.is_empty() {
        println!("\nWarnings: none");
    } else {
        println!("\nWarnings");
        for warning in &report.warnings {
            println!("- {warning}");
        }
    }

    match (&report.narrative, &report.narrative_error) {
        (Some(narrative), _) => {
            println!("\nNarrative\n{}", narrative.overall_summary);
        }
        (None, Some(err)) => println!("\nNarrative unavailable: {err}"),
        (None, None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_session_scores_every_dimension() {
        let session = demo_session();
        assert_eq!(session.trait_scores().len(), 8);
        assert_eq!(session.interest_scores().len(), 6);
        assert!(session.behavioral.all_completed());
    }

    #[test]
    fn parse_set_accepts_both_sets() {
        assert!(matches!(
            parse_set("Intelligence"),
            Ok(QuestionSet::Intelligence)
        ));
        assert!(matches!(parse_set(" interest "), Ok(QuestionSet::Interest)));
        assert!(parse_set("games").is_err());
    }
}
