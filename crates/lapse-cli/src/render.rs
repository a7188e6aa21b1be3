//! Command output
//!
//! Each command produces a [`Report`]; it is printed either as colored text
//! or as a JSON document.

use colored::Colorize;
use lapse_core::{Card, DeckParams, Grade, PreviewResults};
use serde::Serialize;

/// One row of a replayed review history
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStep {
    pub step: usize,
    pub grade: Grade,
    /// Days since the previous review; absent for the first review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_days: Option<f64>,
    #[serde(flatten)]
    pub card: Card,
}

/// Result of a command
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Card(Card),
    Preview(PreviewResults),
    Trace(Vec<TraceStep>),
    Params(DeckParams),
}

/// Print a report to stdout
pub fn print(report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match report {
        Report::Card(card) => print_card(card),
        Report::Preview(preview) => print_preview(preview),
        Report::Trace(steps) => print_trace(steps),
        Report::Params(params) => print_params(params),
    }

    Ok(())
}

fn grade_label(grade: Grade) -> colored::ColoredString {
    let name = format!("{:5}", grade.as_str());
    match grade {
        Grade::Again => name.as_str().red(),
        Grade::Hard => name.as_str().yellow(),
        Grade::Good => name.as_str().green(),
        Grade::Easy => name.as_str().cyan(),
    }
}

fn print_card(card: &Card) {
    println!("{}: {:.4}", "Difficulty".white().bold(), card.difficulty());
    println!("{}: {:.4} days", "Stability".white().bold(), card.stability());
    println!("{}: {:.2} days", "Interval".white().bold(), card.interval());
}

fn print_preview(preview: &PreviewResults) {
    println!("{}", "=== Review Outcomes ===".cyan().bold());
    println!();
    println!("  {:5}  {:>10}  {:>12}  {:>12}", "grade", "difficulty", "stability", "interval");

    for grade in Grade::ALL {
        let card = preview.get(grade);
        println!(
            "  {}  {:>10.4}  {:>12.4}  {:>12.2}",
            grade_label(grade),
            card.difficulty(),
            card.stability(),
            card.interval()
        );
    }
}

fn print_trace(steps: &[TraceStep]) {
    println!("{}", "=== Review Replay ===".cyan().bold());
    println!();
    println!(
        "  {:>4}  {:5}  {:>10}  {:>10}  {:>12}  {:>12}",
        "step", "grade", "elapsed", "difficulty", "stability", "interval"
    );

    for step in steps {
        let elapsed = match step.elapsed_days {
            Some(days) => format!("{:.2}", days),
            None => "-".dimmed().to_string(),
        };
        println!(
            "  {:>4}  {}  {:>10}  {:>10.4}  {:>12.4}  {:>12.2}",
            step.step,
            grade_label(step.grade),
            elapsed,
            step.card.difficulty(),
            step.card.stability(),
            step.card.interval()
        );
    }
}

fn print_params(params: &DeckParams) {
    println!("{}", "=== Deck Parameters ===".cyan().bold());
    println!();

    if let Some(rate) = params.requested_retention_rate {
        println!("{}: {:.1}%", "Target Retention".white().bold(), rate * 100.0);
    }

    if let Some(w) = &params.w {
        println!("{}:", "Weights".white().bold());
        for (i, value) in w.iter().enumerate() {
            println!("  w[{:>2}] = {}", i, value);
        }
    }
}
