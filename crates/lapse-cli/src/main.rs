//! Lapse CLI
//!
//! Command-line front end for the FSRS-4.5 scheduler. Card state lives with
//! the caller: pass the difficulty and stability you stored, get the next
//! state back.

mod config;
mod render;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lapse_core::{Card, Deck, Grade};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::render::{Report, TraceStep};

/// Lapse - FSRS-4.5 spaced repetition scheduler
#[derive(Parser)]
#[command(name = "lapse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FSRS-4.5 spaced repetition scheduler")]
#[command(long_about = "Lapse computes FSRS-4.5 scheduling for a single card.\n\nGrades: again (1), hard (2), good (3), easy (4).\nSet RUST_LOG=debug to see each transition.")]
struct Cli {
    /// Deck parameters file (JSON: {"requestedRetentionRate": 0.9, "w": [17 weights]})
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Target retention in (0, 1]; overrides the config file
    #[arg(long, global = true, allow_negative_numbers = true)]
    retention: Option<f64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule a card after its first review
    New {
        /// Grade of the first review
        grade: Grade,
    },

    /// Schedule a card after a later review
    Grade {
        #[command(flatten)]
        card: CardArgs,
        /// Days since the previous review
        #[arg(long, allow_negative_numbers = true)]
        elapsed: f64,
        /// Grade of this review
        grade: Grade,
    },

    /// Show the outcome of every grade for a card
    Preview {
        #[command(flatten)]
        card: CardArgs,
        /// Days since the previous review
        #[arg(long, allow_negative_numbers = true)]
        elapsed: f64,
    },

    /// Replay a review history, each review landing on schedule
    Replay {
        /// Grades in review order; the first one creates the card
        #[arg(required = true)]
        grades: Vec<Grade>,
    },

    /// Show the effective deck parameters
    Params,
}

/// Stored card state
#[derive(Args)]
struct CardArgs {
    /// Current difficulty (1-10)
    #[arg(long, allow_negative_numbers = true)]
    difficulty: f64,
    /// Current stability in days
    #[arg(long, allow_negative_numbers = true)]
    stability: f64,
}

impl CardArgs {
    fn to_card(&self) -> Card {
        // The interval does not feed the next transition
        Card::from_parts(self.difficulty, self.stability, 0.0)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let report = execute(&cli)?;
    render::print(&report, cli.json)
}

/// Run the selected command against the configured deck
fn execute(cli: &Cli) -> anyhow::Result<Report> {
    let deck = config::build_deck(cli.config.as_deref(), cli.retention)?;

    match &cli.command {
        Commands::New { grade } => run_new(&deck, *grade),
        Commands::Grade {
            card,
            elapsed,
            grade,
        } => run_grade(&deck, &card.to_card(), *elapsed, *grade),
        Commands::Preview { card, elapsed } => run_preview(&deck, &card.to_card(), *elapsed),
        Commands::Replay { grades } => run_replay(&deck, grades),
        Commands::Params => Ok(Report::Params(deck.params())),
    }
}

fn run_new(deck: &Deck, grade: Grade) -> anyhow::Result<Report> {
    let card = deck
        .new_card(grade)
        .with_context(|| format!("Failed to schedule new card graded {}", grade))?;
    Ok(Report::Card(card))
}

fn run_grade(deck: &Deck, card: &Card, elapsed: f64, grade: Grade) -> anyhow::Result<Report> {
    let next = deck
        .grade_card(card, elapsed, grade)
        .with_context(|| format!("Failed to grade card as {}", grade))?;
    Ok(Report::Card(next))
}

fn run_preview(deck: &Deck, card: &Card, elapsed: f64) -> anyhow::Result<Report> {
    let preview = deck
        .preview(card, elapsed)
        .context("Failed to preview review outcomes")?;
    Ok(Report::Preview(preview))
}

fn run_replay(deck: &Deck, grades: &[Grade]) -> anyhow::Result<Report> {
    let (&first, rest) = grades
        .split_first()
        .context("Replay needs at least one grade")?;
    let cards = deck.replay(first, rest).context("Failed to replay reviews")?;

    let steps = cards
        .iter()
        .zip(grades)
        .enumerate()
        .map(|(step, (card, &grade))| TraceStep {
            step,
            grade,
            elapsed_days: step.checked_sub(1).map(|prev| cards[prev].interval()),
            card: *card,
        })
        .collect::<Vec<_>>();

    info!("Replayed {} reviews", steps.len());
    Ok(Report::Trace(steps))
}
