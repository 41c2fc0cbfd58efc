use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use release_stats::cli::{run_report_workflow, ReportWorkflowArgs};
use release_stats::config::{self, RepoTarget};
use release_stats::github::GitHubClient;
use release_stats::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "release-stats",
    about = "Summarize GitHub release history into per-day CSV reports"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long = "repo",
        value_name = "OWNER/REPO",
        help = "Repository to report on (repeatable, replaces configured repositories)"
    )]
    repos: Vec<RepoTarget>,

    #[arg(short, long, help = "Directory to write reports into")]
    output_dir: Option<PathBuf>,

    #[arg(long, help = "Sort report rows by date instead of first appearance")]
    sort: bool,

    #[arg(long, help = "Skip malformed releases instead of failing the repository")]
    lenient: bool,

    #[arg(long, help = "Also write per-package tag statistics")]
    tag_stats: bool,

    #[arg(long, help = "Also write the raw release payloads as JSON")]
    raw: bool,

    #[arg(long, value_name = "URL", help = "API base URL")]
    api_url: Option<String>,

    #[arg(long, help = "Show configured repositories and exit")]
    list: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

impl Args {
    fn workflow_args(&self) -> ReportWorkflowArgs {
        ReportWorkflowArgs {
            repos: self.repos.clone(),
            output_dir: self.output_dir.clone(),
            api_url: self.api_url.clone(),
            sort: self.sort,
            lenient: self.lenient,
            tag_stats: self.tag_stats,
            raw: self.raw,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-stats {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(args.verbose);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => args.workflow_args().apply(cfg),
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if args.list {
        ui::display_repositories(&config.repositories);
        return Ok(());
    }

    if config.repositories.is_empty() {
        ui::display_error("No repositories configured in releasestats.toml");
        std::process::exit(1);
    }

    let client = GitHubClient::new(&config.source).context("Failed to set up release source")?;

    ui::display_status(&format!(
        "Fetching releases for {} repositories from {}",
        config.repositories.len(),
        config.source.api_base
    ));

    let outcomes = run_report_workflow(&client, &config)
        .await
        .context("Report run aborted")?;

    for outcome in &outcomes {
        ui::display_outcome(outcome);
    }
    ui::display_batch_summary(&outcomes);

    let failed = ui::failure_count(&outcomes);
    if failed > 0 {
        ui::display_error(&format!(
            "{} of {} repositories failed",
            failed,
            outcomes.len()
        ));
        std::process::exit(1);
    }

    Ok(())
}
