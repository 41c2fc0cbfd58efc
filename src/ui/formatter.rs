//! Pure formatting functions for terminal output.
//!
//! Line builders return plain strings so they can be tested; the `display_*`
//! functions add styling with `console` and print.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::config::RepoTarget;
use crate::pipeline::RepositoryOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the repositories a run would process.
pub fn display_repositories(targets: &[RepoTarget]) {
    println!("{}", style("Configured repositories:").bold());
    for target in targets {
        println!("  - {}", target);
    }
}

/// One summary line for a processed repository
pub fn outcome_line(outcome: &RepositoryOutcome) -> String {
    match &outcome.result {
        Ok(processed) => {
            let agg = &processed.aggregation;
            format!(
                "{}: {} release(s), {} weekday date(s), {} on weekends",
                outcome.target,
                agg.releases,
                agg.rows.len(),
                agg.weekend_releases
            )
        }
        Err(e) => format!("{}: {}", outcome.target, e),
    }
}

/// Display the end-of-run summary.
///
/// Shows one line per repository, then the saved files of the successful ones.
pub fn display_batch_summary(outcomes: &[RepositoryOutcome]) {
    println!("\n{}", style("Summary").bold().underlined());
    for outcome in outcomes {
        match &outcome.result {
            Ok(processed) => {
                display_success(&outcome_line(outcome));
                for path in &processed.files {
                    println!("    {}", style(path.display()).cyan());
                }
            }
            Err(_) => display_error(&outcome_line(outcome)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseStatsError;
    use crate::pipeline::{Aggregation, ProcessedRepository};
    use std::path::PathBuf;

    #[test]
    fn test_outcome_line_success() {
        let outcome = RepositoryOutcome {
            target: RepoTarget::new("daangn", "stackflow"),
            result: Ok(ProcessedRepository {
                aggregation: Aggregation {
                    rows: Vec::new(),
                    tags: Vec::new(),
                    releases: 4,
                    weekend_releases: 1,
                    warnings: Vec::new(),
                },
                files: vec![PathBuf::from("stackflow_release_stats.csv")],
            }),
        };
        assert_eq!(
            outcome_line(&outcome),
            "daangn/stackflow: 4 release(s), 0 weekday date(s), 1 on weekends"
        );
    }

    #[test]
    fn test_outcome_line_failure() {
        let outcome = RepositoryOutcome {
            target: RepoTarget::new("o", "r"),
            result: Err(ReleaseStatsError::fetch("o/r", "HTTP 500")),
        };
        let line = outcome_line(&outcome);
        assert!(line.starts_with("o/r: "));
        assert!(line.contains("HTTP 500"));
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_status("test status");
        display_success("test success");
        display_error("test error");
        display_boundary_warning(&BoundaryWarning::NoReleases {
            repo: "o/r".to_string(),
        });
    }
}
