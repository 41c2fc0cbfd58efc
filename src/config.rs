use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::aggregate::annotation::default_boilerplate_headers;
use crate::domain::DayBoundary;
use crate::error::ReleaseStatsError;

/// Represents the complete configuration for release-stats.
///
/// Contains the repositories to report on, release source settings and report options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_repositories")]
    pub repositories: Vec<RepoTarget>,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// A repository on the hosting service, identified by owner and name
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
}

impl RepoTarget {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoTarget {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Stem for output file names, e.g. `stackflow`
    pub fn file_stem(&self) -> String {
        self.repo.clone()
    }

    /// Owner-qualified stem, e.g. `daangn_stackflow`
    pub fn qualified_file_stem(&self) -> String {
        format!("{}_{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoTarget {
    type Err = ReleaseStatsError;

    /// Parse `owner/repo`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(RepoTarget::new(owner, repo))
            }
            _ => Err(ReleaseStatsError::config(format!(
                "Repository must be given as OWNER/REPO, got '{}'",
                s
            ))),
        }
    }
}

/// Returns the repositories reported on when none are configured.
fn default_repositories() -> Vec<RepoTarget> {
    vec![
        RepoTarget::new("daangn", "stackflow"),
        RepoTarget::new("daangn", "seed-design"),
    ]
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("release-stats/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

/// Settings for the release source.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub include_drafts: bool,

    #[serde(default = "default_true")]
    pub include_prereleases: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            include_drafts: false,
            include_prereleases: true,
        }
    }
}

/// How records that fail normalization are treated
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationPolicy {
    /// Any malformed record fails the whole repository
    #[default]
    Strict,
    /// Malformed records are skipped and reported as warnings
    Lenient,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Settings for aggregation and report output.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub sort_by_date: bool,

    #[serde(default)]
    pub day_boundary: DayBoundary,

    #[serde(default)]
    pub policy: NormalizationPolicy,

    #[serde(default)]
    pub tag_stats: bool,

    #[serde(default)]
    pub raw_dump: bool,

    #[serde(default = "default_boilerplate_headers")]
    pub boilerplate_headers: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            output_dir: default_output_dir(),
            sort_by_date: false,
            day_boundary: DayBoundary::default(),
            policy: NormalizationPolicy::default(),
            tag_stats: false,
            raw_dump: false,
            boilerplate_headers: default_boilerplate_headers(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repositories: default_repositories(),
            source: SourceConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasestats.toml` in current directory
/// 3. `.releasestats.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> crate::error::Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasestats.toml").exists() {
        fs::read_to_string("./releasestats.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasestats.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> crate::error::Result<Config> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| ReleaseStatsError::config(format!("Invalid configuration: {}", e)))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> crate::error::Result<()> {
    if let Some(target) = config
        .repositories
        .iter()
        .find(|t| t.owner.trim().is_empty() || t.repo.trim().is_empty())
    {
        return Err(ReleaseStatsError::config(format!(
            "Repository entry '{}' needs both owner and repo",
            target
        )));
    }
    if config.source.timeout_secs == 0 {
        return Err(ReleaseStatsError::config("source.timeout_secs must be positive"));
    }
    Ok(())
}
