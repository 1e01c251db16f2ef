//! Run summary output
//!
//! One line per enabled platform plus a totals line. This is the whole
//! user-visible result of a run; a partial run must be diagnosable from it
//! alone.

use crate::extract::{ExtractionSummary, Outcome};
use colored::Colorize;

pub fn print_summary(summary: &ExtractionSummary, use_color: bool) {
    for (platform, outcome) in &summary.per_platform {
        let line = match outcome {
            Outcome::Completed {
                programs,
                changed,
                failed,
            } => {
                let status = paint("ok", use_color, |s| s.green());
                let mut line = format!(
                    "{:<12} {}  {} program(s), {} changed",
                    platform, status, programs, changed
                );
                if *failed > 0 {
                    line.push_str(&format!(", {} failed to persist", failed));
                }
                line
            }
            Outcome::Skipped { reason } => {
                let status = paint("skipped", use_color, |s| s.yellow());
                format!("{:<12} {}  {}", platform, status, reason)
            }
            Outcome::Failed { kind, message } => {
                let status = paint("failed", use_color, |s| s.red());
                format!("{:<12} {}  [{}] {}", platform, status, kind, message)
            }
        };
        println!("{}", line);
    }

    println!(
        "total: {} program(s) processed across {} platform(s)",
        summary.total_programs_processed,
        summary.per_platform.len()
    );
}

fn paint(
    text: &str,
    use_color: bool,
    apply: impl FnOnce(&str) -> colored::ColoredString,
) -> String {
    if use_color {
        apply(text).to_string()
    } else {
        text.to_string()
    }
}
