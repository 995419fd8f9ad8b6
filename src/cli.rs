//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::filter::JobFilter;
use crate::models::{ExperienceLevel, JobSearchParams, JobSource, JobType};
use clap::Parser;
use std::path::PathBuf;

/// JobScout - aggregate job postings from several boards
///
/// Searches LinkedIn, Indeed and remote-work boards through a web-search
/// provider, extracts structured postings from the result snippets and
/// prints a merged, de-duplicated listing.
///
/// Examples:
///   jobscout --query "rust developer" --location Austin
///   jobscout --query designer --remote --format json --output jobs.json
///   jobscout --query "data analyst" --dry-run
///   jobscout --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Free-text search terms
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Location to search in
    #[arg(short, long, value_name = "PLACE")]
    pub location: Option<String>,

    /// Employment type: full-time, part-time, contract, freelance
    #[arg(long, value_name = "TYPE")]
    pub job_type: Option<JobType>,

    /// Seniority: entry, mid, senior, executive
    #[arg(long, value_name = "LEVEL")]
    pub experience_level: Option<ExperienceLevel>,

    /// Ask for remote positions
    #[arg(long)]
    pub remote: bool,

    /// Maximum provider results per source
    #[arg(long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Sources to search (comma-separated)
    ///
    /// Example: --sources linkedin,indeed,remote,glassdoor
    #[arg(long, value_name = "SOURCES", value_delimiter = ',')]
    pub sources: Option<Vec<String>>,

    /// Only show jobs whose title, company or description contains TEXT
    #[arg(long, value_name = "TEXT")]
    pub filter_text: Option<String>,

    /// Only show jobs whose location contains PLACE ("remote" matches remote jobs)
    #[arg(long, value_name = "PLACE")]
    pub filter_location: Option<String>,

    /// Only show jobs from this source
    #[arg(long, value_name = "SOURCE")]
    pub filter_source: Option<JobSource>,

    /// Only show jobs of this employment type
    #[arg(long, value_name = "TYPE")]
    pub filter_type: Option<JobType>,

    /// JSON file with local listings to append to the results
    #[arg(long, value_name = "FILE")]
    pub local_jobs: Option<PathBuf>,

    /// Search provider endpoint URL
    #[arg(long, value_name = "URL", env = "JOBSCOUT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Search provider API key
    #[arg(long, value_name = "KEY", env = "JOBSCOUT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Cache lifetime for per-source results, in seconds
    #[arg(long, value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .jobscout.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(long)]
    pub quiet: bool,

    /// Print the per-source queries without calling the provider
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .jobscout.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a config-file value, falling back to Markdown.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Markdown,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err("Limit must be at least 1".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref endpoint) = self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err("Endpoint URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(ref sources) = self.sources {
            for name in sources {
                name.parse::<JobSource>()?;
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref path) = self.local_jobs {
            if !path.is_file() {
                return Err(format!("Local listings file not found: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Search parameters described by the arguments.
    pub fn search_params(&self) -> JobSearchParams {
        JobSearchParams {
            query: self.query.clone(),
            location: self.location.clone(),
            job_type: self.job_type,
            experience_level: self.experience_level,
            remote: self.remote.then_some(true),
            limit: self.limit,
        }
    }

    /// Display filter described by the arguments.
    pub fn job_filter(&self) -> JobFilter {
        JobFilter {
            text: self.filter_text.clone(),
            location: self.filter_location.clone(),
            source: self.filter_source,
            job_type: self.filter_type,
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
