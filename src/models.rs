//! Data models for the job aggregator.
//!
//! This module contains the records that flow through a search: the
//! request parameters, the raw provider results and the normalized jobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of provider results requested per source.
pub const DEFAULT_LIMIT: usize = 20;

/// Job board a posting was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JobSource {
    #[serde(rename = "linkedin")]
    LinkedIn,
    #[serde(rename = "indeed")]
    Indeed,
    #[serde(rename = "glassdoor")]
    Glassdoor,
    #[serde(rename = "remote.co", alias = "remote")]
    RemoteCo,
    #[serde(rename = "local")]
    Local,
}

impl JobSource {
    /// Wire name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::LinkedIn => "linkedin",
            JobSource::Indeed => "indeed",
            JobSource::Glassdoor => "glassdoor",
            JobSource::RemoteCo => "remote.co",
            JobSource::Local => "local",
        }
    }

    /// Short prefix used in synthetic ids and cache keys.
    pub fn prefix(&self) -> &'static str {
        match self {
            JobSource::RemoteCo => "remote",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Ok(JobSource::LinkedIn),
            "indeed" => Ok(JobSource::Indeed),
            "glassdoor" => Ok(JobSource::Glassdoor),
            "remote" | "remote.co" | "remoteco" => Ok(JobSource::RemoteCo),
            "local" => Ok(JobSource::Local),
            other => Err(format!("unknown job source: {}", other)),
        }
    }
}

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Freelance,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "full-time" | "fulltime" => Ok(JobType::FullTime),
            "part-time" | "parttime" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "freelance" => Ok(JobType::Freelance),
            other => Err(format!("unknown job type: {}", other)),
        }
    }
}

/// Seniority expected by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" | "junior" => Ok(ExperienceLevel::Entry),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "executive" => Ok(ExperienceLevel::Executive),
            other => Err(format!("unknown experience level: {}", other)),
        }
    }
}

/// Parameters of a job search. Every field is optional.
///
/// The JSON form of this struct is part of the cache key, so unset fields
/// are left out of it entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl JobSearchParams {
    /// Whether the search asks for remote positions.
    pub fn wants_remote(&self) -> bool {
        self.remote.unwrap_or(false)
    }

    /// JSON form of the parameters, used for cache keys.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// One organic result returned by the search provider.
///
/// Missing and `null` fields both read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, alias = "content", deserialize_with = "null_as_empty")]
    pub snippet: String,
    #[serde(default, alias = "url", deserialize_with = "null_as_empty")]
    pub link: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
impl SearchResult {
    pub fn new(title: &str, snippet: &str, link: &str) -> Self {
        Self {
            title: title.to_string(),
            snippet: snippet.to_string(),
            link: link.to_string(),
        }
    }
}

/// A job posting normalized from any source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedJob {
    /// Synthetic id: `<source>_<scrape millis>_<index>`.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Raw snippet text.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub skills: Vec<String>,
    /// Time the posting was scraped; boards expose no reliable post date.
    pub posted_date: DateTime<Utc>,
    pub source: JobSource,
    pub external_url: String,
    pub is_remote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applications: Option<u32>,
}

impl ScrapedJob {
    /// Key used to detect the same posting listed twice.
    pub fn dedupe_key(&self) -> String {
        format!(
            "{}_{}",
            self.title.to_lowercase(),
            self.company.to_lowercase()
        )
    }
}
