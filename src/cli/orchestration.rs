//! Main workflow orchestration logic
//!
//! Turns CLI arguments into an effective configuration and runs the batch.
//! Keeping this out of main.rs lets the workflow be driven programmatically
//! without depending on clap.

use std::path::PathBuf;

use crate::config::{Config, NormalizationPolicy, RepoTarget};
use crate::error::Result;
use crate::github::ReleaseSource;
use crate::pipeline::{run_batch, PipelineOptions, RepositoryOutcome};
use crate::sink::ReportSink;

/// Arguments for the report workflow
///
/// Mirrors the CLI Args; every field left unset keeps the configured value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportWorkflowArgs {
    /// Repositories to process instead of the configured ones
    pub repos: Vec<RepoTarget>,

    /// Output directory override
    pub output_dir: Option<PathBuf>,

    /// API base URL override
    pub api_url: Option<String>,

    /// Sort rows chronologically
    pub sort: bool,

    /// Skip malformed releases instead of failing the repository
    pub lenient: bool,

    /// Also write per-package tag statistics
    pub tag_stats: bool,

    /// Also write the raw release payloads as JSON
    pub raw: bool,
}

impl ReportWorkflowArgs {
    /// Apply the overrides on top of a loaded configuration.
    ///
    /// Flags only switch features on; they never turn off what the file enables.
    pub fn apply(&self, mut config: Config) -> Config {
        if !self.repos.is_empty() {
            config.repositories = self.repos.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.report.output_dir = dir.clone();
        }
        if let Some(url) = &self.api_url {
            config.source.api_base = url.clone();
        }
        if self.sort {
            config.report.sort_by_date = true;
        }
        if self.lenient {
            config.report.policy = NormalizationPolicy::Lenient;
        }
        if self.tag_stats {
            config.report.tag_stats = true;
        }
        if self.raw {
            config.report.raw_dump = true;
        }
        config
    }
}

/// Main report workflow
///
/// Orchestrates the whole run:
/// 1. Derive pipeline options from the configuration
/// 2. Fetch and aggregate each repository in turn
/// 3. Persist each report next to the others in the output directory
///
/// # Returns
///
/// One outcome per repository, or an error if the configuration is unusable
/// or an internal invariant broke.
pub async fn run_report_workflow<S: ReleaseSource + ?Sized>(
    source: &S,
    config: &Config,
) -> Result<Vec<RepositoryOutcome>> {
    let options = PipelineOptions::from_config(config)?;
    let sink = ReportSink::new(&config.report.output_dir);
    run_batch(source, &sink, &config.repositories, &options).await
}
