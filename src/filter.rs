//! Display-side filtering of an aggregated listing.

use crate::models::{JobSource, JobType, ScrapedJob};

/// Narrow a listing by free text, location, source and job type.
///
/// Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Matched against title, company and description.
    pub text: Option<String>,
    /// Substring of the location; `remote` also matches remote jobs.
    pub location: Option<String>,
    pub source: Option<JobSource>,
    pub job_type: Option<JobType>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.location.is_none()
            && self.source.is_none()
            && self.job_type.is_none()
    }

    pub fn matches(&self, job: &ScrapedJob) -> bool {
        self.matches_text(job)
            && self.matches_location(job)
            && self.source.map_or(true, |s| job.source == s)
            && self.job_type.map_or(true, |t| job.job_type == t)
    }

    pub fn apply(&self, jobs: Vec<ScrapedJob>) -> Vec<ScrapedJob> {
        if self.is_empty() {
            return jobs;
        }
        jobs.into_iter().filter(|job| self.matches(job)).collect()
    }

    fn matches_text(&self, job: &ScrapedJob) -> bool {
        let Some(ref text) = self.text else {
            return true;
        };
        let needle = text.to_lowercase();
        job.title.to_lowercase().contains(&needle)
            || job.company.to_lowercase().contains(&needle)
            || job.description.to_lowercase().contains(&needle)
    }

    fn matches_location(&self, job: &ScrapedJob) -> bool {
        let Some(ref location) = self.location else {
            return true;
        };
        let needle = location.to_lowercase();
        job.location.to_lowercase().contains(&needle) || (needle == "remote" && job.is_remote)
    }
}
