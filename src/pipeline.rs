//! Per-repository workflow: fetch → normalize → group → emit → persist.
//!
//! The core [`aggregate`] step is synchronous and pure. [`run_repository`]
//! awaits the fetch once and hands the payloads to it; [`run_batch`] runs
//! repositories one after another and keeps going when one of them fails.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::aggregate::{
    emit_rows, group_releases, summarize_tags, AnnotationFormatter, Grouping, ReportRow, RowOrder,
    TagSummary,
};
use crate::boundary::BoundaryWarning;
use crate::config::{Config, NormalizationPolicy, RepoTarget};
use crate::domain::release::{is_draft_payload, is_prerelease_payload, payload_id};
use crate::domain::{DayBoundary, Release};
use crate::error::{ReleaseStatsError, Result};
use crate::github::ReleaseSource;
use crate::sink::{ReportFiles, ReportSink};

/// Everything the aggregation step needs to know
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub grouping: Grouping,
    pub order: RowOrder,
    pub policy: NormalizationPolicy,
    pub include_drafts: bool,
    pub include_prereleases: bool,
    pub tag_stats: bool,
    pub raw_dump: bool,
}

impl PipelineOptions {
    /// Derive options from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let day_boundary = config.report.day_boundary;
        let formatter = AnnotationFormatter::new(&config.report.boilerplate_headers, day_boundary)?;

        Ok(PipelineOptions {
            grouping: Grouping::new(day_boundary, formatter),
            order: RowOrder::from_sort_flag(config.report.sort_by_date),
            policy: config.report.policy,
            include_drafts: config.source.include_drafts,
            include_prereleases: config.source.include_prereleases,
            tag_stats: config.report.tag_stats,
            raw_dump: config.report.raw_dump,
        })
    }

    fn day_boundary(&self) -> DayBoundary {
        self.grouping.day_boundary
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            grouping: Grouping::default(),
            order: RowOrder::default(),
            policy: NormalizationPolicy::default(),
            include_drafts: false,
            include_prereleases: true,
            tag_stats: false,
            raw_dump: false,
        }
    }
}

/// Result of aggregating one repository's payloads
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub rows: Vec<ReportRow>,
    pub tags: Vec<TagSummary>,
    pub releases: usize,
    pub weekend_releases: usize,
    pub warnings: Vec<BoundaryWarning>,
}

/// Aggregation plus the raw payloads it was built from
#[derive(Debug, Clone)]
pub struct RepositoryReport {
    pub target: RepoTarget,
    pub raw: Vec<Value>,
    pub aggregation: Aggregation,
}

impl RepositoryReport {
    /// Files to persist under the given options
    pub fn files<'a>(&'a self, options: &PipelineOptions) -> ReportFiles<'a> {
        ReportFiles {
            rows: &self.aggregation.rows,
            tags: options.tag_stats.then_some(self.aggregation.tags.as_slice()),
            raw: options.raw_dump.then_some(self.raw.as_slice()),
        }
    }
}

/// Outcome of one repository in a batch
#[derive(Debug)]
pub struct RepositoryOutcome {
    pub target: RepoTarget,
    pub result: Result<ProcessedRepository>,
}

/// A repository that was aggregated and written
#[derive(Debug, Clone)]
pub struct ProcessedRepository {
    pub aggregation: Aggregation,
    pub files: Vec<PathBuf>,
}

/// Normalize raw payloads under the given policy.
///
/// Drafts and (optionally) prereleases are dropped before normalization,
/// since drafts have no publish timestamp.
pub fn normalize_all(
    raw: &[Value],
    options: &PipelineOptions,
) -> Result<(Vec<Release>, Vec<BoundaryWarning>)> {
    let mut warnings = Vec::new();
    let mut releases = Vec::with_capacity(raw.len());
    let mut drafts = 0;
    let mut prereleases = 0;

    for payload in raw {
        if !options.include_drafts && is_draft_payload(payload) {
            drafts += 1;
            continue;
        }
        if !options.include_prereleases && is_prerelease_payload(payload) {
            prereleases += 1;
            continue;
        }

        match Release::from_value(payload) {
            Ok(release) => releases.push(release),
            Err(e) if e.is_record_error() && options.policy == NormalizationPolicy::Lenient => {
                let id = payload_id(payload);
                debug!(release = %id, error = %e, "Skipping malformed release");
                warnings.push(BoundaryWarning::SkippedRelease {
                    id,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    if drafts > 0 || prereleases > 0 {
        warnings.push(BoundaryWarning::ExcludedReleases {
            drafts,
            prereleases,
        });
    }

    Ok((releases, warnings))
}

/// Run the core aggregation over one repository's payloads
pub fn aggregate(repo: &str, raw: &[Value], options: &PipelineOptions) -> Result<Aggregation> {
    let (releases, mut warnings) = normalize_all(raw, options)?;

    let buckets = group_releases(&releases, &options.grouping);
    let rows = emit_rows(&buckets, options.order)?;
    let weekend_releases =
        crate::aggregate::grouper::weekend_count(&releases, options.day_boundary());

    if releases.is_empty() {
        warnings.push(BoundaryWarning::NoReleases {
            repo: repo.to_string(),
        });
    } else if rows.is_empty() {
        warnings.push(BoundaryWarning::AllOnWeekends {
            repo: repo.to_string(),
            count: releases.len(),
        });
    }

    let tags = if options.tag_stats {
        summarize_tags(&releases)
    } else {
        Vec::new()
    };

    debug!(
        repo,
        releases = releases.len(),
        weekend = weekend_releases,
        days = rows.len(),
        "Aggregated releases"
    );

    Ok(Aggregation {
        rows,
        tags,
        releases: releases.len(),
        weekend_releases,
        warnings,
    })
}

/// Fetch and aggregate one repository
pub async fn run_repository<S: ReleaseSource + ?Sized>(
    source: &S,
    target: &RepoTarget,
    options: &PipelineOptions,
) -> Result<RepositoryReport> {
    let repo = target.to_string();
    let raw = source
        .fetch(target)
        .await
        .map_err(|e| e.in_repository(&repo))?;
    let aggregation = aggregate(&repo, &raw, options).map_err(|e| e.in_repository(&repo))?;

    Ok(RepositoryReport {
        target: target.clone(),
        raw,
        aggregation,
    })
}

/// Output file stem for each target, in order.
///
/// Targets sharing a repository name (ignoring case) get owner-qualified
/// stems so their files do not overwrite each other.
pub fn file_stems(targets: &[RepoTarget]) -> Vec<String> {
    let mut owners: HashMap<String, HashSet<&str>> = HashMap::new();
    for target in targets {
        owners
            .entry(target.repo.to_lowercase())
            .or_default()
            .insert(target.owner.as_str());
    }

    targets
        .iter()
        .map(|target| match owners.get(&target.repo.to_lowercase()) {
            Some(set) if set.len() > 1 => target.qualified_file_stem(),
            _ => target.file_stem(),
        })
        .collect()
}

/// Process repositories sequentially, isolating failures.
///
/// A fetch, normalization or write failure is recorded in that repository's
/// outcome and the batch moves on. An invariant violation stops the batch.
pub async fn run_batch<S: ReleaseSource + ?Sized>(
    source: &S,
    sink: &ReportSink,
    targets: &[RepoTarget],
    options: &PipelineOptions,
) -> Result<Vec<RepositoryOutcome>> {
    let mut outcomes = Vec::with_capacity(targets.len());
    let mut seen = HashSet::new();

    for (target, stem) in targets.iter().zip(file_stems(targets)) {
        if !seen.insert(target) {
            debug!(repo = %target, "Repository listed more than once");
            outcomes.push(RepositoryOutcome {
                target: target.clone(),
                result: Err(ReleaseStatsError::config("repository is listed more than once")
                    .in_repository(target.to_string())),
            });
            continue;
        }

        info!(repo = %target, "Processing repository");

        let result = match run_repository(source, target, options).await {
            Ok(report) => {
                let written = sink.persist(target, &stem, report.files(options));
                written
                    .map(|files| ProcessedRepository {
                        aggregation: report.aggregation,
                        files,
                    })
                    .map_err(|e| e.in_repository(target.to_string()))
            }
            Err(e) => Err(e),
        };

        match result {
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!(repo = %target, error = %e, "Repository failed");
                outcomes.push(RepositoryOutcome {
                    target: target.clone(),
                    result: Err(e),
                });
            }
            Ok(processed) => outcomes.push(RepositoryOutcome {
                target: target.clone(),
                result: Ok(processed),
            }),
        }
    }

    Ok(outcomes)
}
