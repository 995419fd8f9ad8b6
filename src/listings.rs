//! Hand-maintained "local" job listings.
//!
//! Local jobs are not found through web search. They are read from a JSON
//! file and appended after the aggregated results.

use crate::models::{ExperienceLevel, JobSource, JobType, ScrapedJob};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One entry of a local listings file.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalJob {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub applications: Option<u32>,
    #[serde(default)]
    pub external_url: Option<String>,
    /// How long ago the job was posted.
    #[serde(default)]
    pub hours_ago: u32,
}

impl LocalJob {
    fn into_scraped(self, index: usize, now: DateTime<Utc>) -> Result<ScrapedJob> {
        let posted_date = now
            .checked_sub_signed(Duration::hours(i64::from(self.hours_ago)))
            .with_context(|| {
                format!(
                    "hours_ago {} is out of range for \"{}\"",
                    self.hours_ago, self.title
                )
            })?;

        Ok(ScrapedJob {
            id: format!("local_{}", index + 1),
            title: self.title,
            company: self.company,
            location: if self.location.is_empty() {
                crate::sources::DEFAULT_LOCATION.to_string()
            } else {
                self.location
            },
            description: self.description,
            salary: self.salary,
            job_type: self.job_type,
            experience_level: self.experience_level,
            skills: self.skills,
            posted_date,
            source: JobSource::Local,
            external_url: self.external_url.unwrap_or_else(|| "#".to_string()),
            is_remote: self.is_remote,
            applications: self.applications,
        })
    }
}

/// Parse a JSON array of local jobs.
///
/// Entries with an empty title or company are skipped.
pub fn parse(content: &str, now: DateTime<Utc>) -> Result<Vec<ScrapedJob>> {
    let entries: Vec<LocalJob> =
        serde_json::from_str(content).context("Failed to parse local listings")?;

    entries
        .into_iter()
        .filter(|e| !e.title.trim().is_empty() && !e.company.trim().is_empty())
        .enumerate()
        .map(|(i, e)| e.into_scraped(i, now))
        .collect()
}

/// Load local jobs from a JSON file.
pub fn load(path: &Path, now: DateTime<Utc>) -> Result<Vec<ScrapedJob>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read local listings: {}", path.display()))?;

    let jobs = parse(&content, now)
        .with_context(|| format!("Invalid local listings file: {}", path.display()))?;

    info!("Loaded {} local jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

/// Append local jobs after the aggregated ones.
pub fn merge(mut aggregated: Vec<ScrapedJob>, local: Vec<ScrapedJob>) -> Vec<ScrapedJob> {
    aggregated.extend(local);
    aggregated
}
