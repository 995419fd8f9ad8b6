//! JobScout - multi-board job search aggregator
//!
//! A CLI tool that searches several job boards through a web-search
//! provider, extracts structured postings from the result snippets and
//! prints a merged, de-duplicated listing.
//!
//! Exit codes:
//!   0 - Success (including an empty listing)
//!   1 - Runtime error (bad arguments, config, listings or output file)

mod cli;
mod config;
mod error;
mod filter;
mod listings;
mod models;
mod provider;
mod report;
mod search;
mod sources;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use provider::HttpSearchProvider;
use report::{JobReport, ReportMetadata};
use search::JobAggregator;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so its verbosity applies
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };
    init_logging(level);

    info!("JobScout v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    if let Err(e) = run_search(args, config).await {
        error!("Search failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .jobscout.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  .jobscout.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .jobscout.toml")?;

    println!("✅ Created .jobscout.toml with default settings.");
    println!("   Edit it to choose the provider endpoint, sources and cache lifetime.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run one aggregated search and write the report.
async fn run_search(args: Args, config: Config) -> Result<()> {
    let start_time = Instant::now();

    let params = args.search_params();
    let aggregator_config = config.search.to_aggregator_config();

    if aggregator_config.sources.is_empty() {
        anyhow::bail!("No searchable sources configured");
    }

    // Handle --dry-run: show the queries and exit
    if args.dry_run {
        println!("🔍 Dry run: queries that would be sent to {}\n", config.provider.endpoint);
        for (source, query) in sources::plan_queries(&aggregator_config.sources, &params) {
            println!("   {:<10} {}", source.as_str(), query);
        }
        println!("\n✅ Dry run complete. No search requests were made.");
        return Ok(());
    }

    if config.provider.api_key.is_none() {
        warn!("No API key configured; the provider may reject requests");
    }

    let provider = HttpSearchProvider::new(&config.provider)
        .context("Failed to create search provider")?;
    let sources = aggregator_config.sources.clone();
    let aggregator = JobAggregator::new(Arc::new(provider), aggregator_config);

    let spinner = search_spinner(args.quiet);
    let mut jobs = aggregator.search(&params).await;
    spinner.finish_and_clear();

    if let Some(ref path) = config.general.local_jobs {
        let local = listings::load(Path::new(path), Utc::now())?;
        jobs = listings::merge(jobs, local);
    }

    let job_filter = args.job_filter();
    let before = jobs.len();
    let jobs = job_filter.apply(jobs);
    if jobs.len() != before {
        info!("Filter kept {} of {} jobs", jobs.len(), before);
    }

    let report = JobReport {
        metadata: ReportMetadata {
            params,
            sources,
            generated_at: Utc::now(),
            total_jobs: jobs.len(),
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        jobs,
    };

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.general.format));
    let output = match format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                eprintln!(
                    "\n✅ {} jobs found. Report saved to: {}",
                    report.metadata.total_jobs,
                    path.display()
                );
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Spinner shown while sources are queried. Hidden in quiet mode.
fn search_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Searching job boards...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
