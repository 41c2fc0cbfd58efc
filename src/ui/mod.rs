//! User interface module - terminal output for the CLI.
//!
//! - `formatter` - Pure line builders and styled display functions
//! - This module - Warnings and failure counts of a finished batch

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_batch_summary, display_boundary_warning, display_error, display_repositories,
    display_status, display_success, outcome_line,
};

use crate::boundary::BoundaryWarning;
use crate::pipeline::RepositoryOutcome;

/// Warnings collected for a repository; a failed repository has none.
pub fn outcome_warnings(outcome: &RepositoryOutcome) -> &[BoundaryWarning] {
    match &outcome.result {
        Ok(processed) => &processed.aggregation.warnings,
        Err(_) => &[],
    }
}

/// Print the warnings collected for a repository.
///
/// Success and failure lines are left to [`display_batch_summary`].
pub fn display_outcome(outcome: &RepositoryOutcome) {
    for warning in outcome_warnings(outcome) {
        display_boundary_warning(warning);
    }
}

/// Number of repositories that failed
pub fn failure_count(outcomes: &[RepositoryOutcome]) -> usize {
    outcomes.iter().filter(|o| o.result.is_err()).count()
}
