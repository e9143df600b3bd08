use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "growthlens",
    about = "Score child assessment sessions from the command line",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a session and print the assessment report (default command)
    Report(ReportArgs),
    /// List the questionnaire items applicable to an age
    Items(ItemsArgs),
    /// Show the norm table with provisional/established status
    Norms,
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Path to a JSON session document; omit to score a built-in demo session
    #[arg(long)]
    pub session: Option<PathBuf>,
    /// Print the markdown summary block instead of the rendered report
    #[arg(long)]
    pub summary: bool,
}

#[derive(Args, Debug)]
pub struct ItemsArgs {
    /// Respondent age in years (7-15)
    #[arg(long, default_value_t = 10)]
    pub age: u8,
    /// Question set to list: intelligence or interest
    #[arg(long, default_value = "intelligence")]
    pub set: String,
}
