use std::fmt;

/// Non-fatal conditions met while aggregating a repository's releases.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The source returned no releases at all
    NoReleases { repo: String },
    /// Every release fell on a weekend, so the report has no rows
    AllOnWeekends { repo: String, count: usize },
    /// A record failed normalization and was dropped (lenient policy)
    SkippedRelease { id: String, reason: String },
    /// Releases left out by the draft/prerelease settings
    ExcludedReleases { drafts: usize, prereleases: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoReleases { repo } => {
                write!(f, "No releases published for '{}'", repo)
            }
            BoundaryWarning::AllOnWeekends { repo, count } => {
                write!(
                    f,
                    "All {} release(s) of '{}' were published on weekends; report is empty",
                    count, repo
                )
            }
            BoundaryWarning::SkippedRelease { id, reason } => {
                write!(f, "Skipped release {}: {}", id, reason)
            }
            BoundaryWarning::ExcludedReleases {
                drafts,
                prereleases,
            } => {
                write!(
                    f,
                    "Excluded {} draft(s) and {} prerelease(s)",
                    drafts, prereleases
                )
            }
        }
    }
}
