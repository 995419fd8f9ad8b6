//! Markdown and JSON report generation.
//!
//! This module renders an aggregated job listing as a Markdown document
//! or as pretty-printed JSON.

use crate::models::{JobSearchParams, JobSource, ScrapedJob};
use crate::search::count_by_source;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about one search run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Parameters the search ran with.
    pub params: JobSearchParams,
    /// Sources that were queried.
    pub sources: Vec<JobSource>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of jobs in the report.
    pub total_jobs: usize,
    /// Wall time of the search in seconds.
    pub duration_seconds: f64,
}

/// A rendered search result.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub metadata: ReportMetadata,
    pub jobs: Vec<ScrapedJob>,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &JobReport) -> String {
    let mut output = String::new();

    output.push_str("# JobScout Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(&report.jobs));
    output.push_str(&generate_jobs_section(&report.jobs));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &JobReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();
    let params = &metadata.params;

    section.push_str("## Search\n\n");
    if let Some(ref query) = params.query {
        section.push_str(&format!("- **Query:** {}\n", query));
    }
    if let Some(ref location) = params.location {
        section.push_str(&format!("- **Location:** {}\n", location));
    }
    if let Some(job_type) = params.job_type {
        section.push_str(&format!("- **Job Type:** {}\n", job_type));
    }
    if let Some(level) = params.experience_level {
        section.push_str(&format!("- **Experience:** {}\n", level));
    }
    if params.wants_remote() {
        section.push_str("- **Remote:** yes\n");
    }

    let sources: Vec<_> = metadata.sources.iter().map(|s| s.as_str()).collect();
    section.push_str(&format!("- **Sources:** {}\n", sources.join(", ")));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Jobs Found:** {}\n", metadata.total_jobs));
    section.push_str(&format!(
        "- **Search Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn generate_summary_section(jobs: &[ScrapedJob]) -> String {
    let counts = count_by_source(jobs);
    if counts.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Source | Jobs |\n");
    section.push_str("|:---|:---:|\n");
    for (source, count) in &counts {
        section.push_str(&format!("| {} | {} |\n", source, count));
    }

    let remote = jobs.iter().filter(|j| j.is_remote).count();
    section.push_str(&format!("\n*Remote-friendly: {} of {}*\n\n", remote, jobs.len()));

    section
}

fn generate_jobs_section(jobs: &[ScrapedJob]) -> String {
    let mut section = String::new();

    section.push_str("## Jobs\n\n");

    if jobs.is_empty() {
        section.push_str("No jobs matched this search. Try broader terms or another location.\n\n");
        return section;
    }

    for job in jobs {
        section.push_str(&generate_job_block(job));
    }

    section
}

fn generate_job_block(job: &ScrapedJob) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {} at {}\n\n", job.title, job.company));

    let remote = if job.is_remote { " | remote" } else { "" };
    block.push_str(&format!(
        "*{} | {} | {} | {}{}*\n\n",
        job.location, job.job_type, job.experience_level, job.source, remote
    ));

    if let Some(ref salary) = job.salary {
        block.push_str(&format!("**Salary:** {}\n\n", salary));
    }

    if !job.skills.is_empty() {
        block.push_str(&format!("**Skills:** {}\n\n", job.skills.join(", ")));
    }

    if !job.description.is_empty() {
        block.push_str(&format!("> {}\n\n", job.description));
    }

    if let Some(applications) = job.applications {
        block.push_str(&format!("**Applications:** {}\n\n", applications));
    }

    if !job.external_url.is_empty() && job.external_url != "#" {
        block.push_str(&format!("[Apply on {}]({})\n\n", job.source, job.external_url));
    }

    block.push_str("---\n\n");

    block
}

fn generate_footer() -> String {
    "*Report generated by JobScout*\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, JobType};

    fn create_test_report() -> JobReport {
        let job = ScrapedJob {
            id: "linkedin_1_0".to_string(),
            title: "Senior Backend Engineer".to_string(),
            company: "Acme Corp".to_string(),
            location: "Austin, TX".to_string(),
            description: "Senior Backend Engineer at Acme Corp".to_string(),
            salary: Some("$120k-$150k".to_string()),
            job_type: JobType::FullTime,
            experience_level: ExperienceLevel::Senior,
            skills: vec!["Rust".to_string(), "AWS".to_string()],
            posted_date: Utc::now(),
            source: JobSource::LinkedIn,
            external_url: "https://www.linkedin.com/jobs/view/1".to_string(),
            is_remote: true,
            applications: None,
        };

        JobReport {
            metadata: ReportMetadata {
                params: JobSearchParams {
                    query: Some("backend".to_string()),
                    remote: Some(true),
                    ..Default::default()
                },
                sources: vec![JobSource::LinkedIn, JobSource::Indeed],
                generated_at: Utc::now(),
                total_jobs: 1,
                duration_seconds: 1.5,
            },
            jobs: vec![job],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# JobScout Report"));
        assert!(markdown.contains("- **Query:** backend"));
        assert!(markdown.contains("- **Remote:** yes"));
        assert!(markdown.contains("linkedin, indeed"));
        assert!(markdown.contains("| linkedin | 1 |"));
        assert!(markdown.contains("### Senior Backend Engineer at Acme Corp"));
        assert!(markdown.contains("**Salary:** $120k-$150k"));
        assert!(markdown.contains("**Skills:** Rust, AWS"));
        assert!(markdown.contains("[Apply on linkedin](https://www.linkedin.com/jobs/view/1)"));
    }

    #[test]
    fn test_empty_report() {
        let mut report = create_test_report();
        report.jobs.clear();
        report.metadata.total_jobs = 0;

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("No jobs matched this search"));
        assert!(!markdown.contains("## Summary"));
    }

    #[test]
    fn test_job_block_hides_local_placeholder_link() {
        let mut job = create_test_report().jobs.remove(0);
        job.source = JobSource::Local;
        job.external_url = "#".to_string();
        job.applications = Some(12);

        let block = generate_job_block(&job);
        assert!(!block.contains("Apply on"));
        assert!(block.contains("**Applications:** 12"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"jobs\""));
        assert!(json.contains("\"source\": \"linkedin\""));
        assert!(json.contains("\"experience_level\": \"senior\""));
    }
}
