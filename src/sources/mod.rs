//! Job boards reached through the search provider.
//!
//! Each source knows how to phrase a site-restricted search query, which
//! result links belong to it, and how to turn raw results into jobs.

pub mod extract;

use crate::models::{JobSearchParams, JobSource, ScrapedJob, SearchResult};
use chrono::{DateTime, Utc};
use extract::{
    extract_company, extract_experience_level, extract_job_type, extract_location, extract_salary,
    extract_skills, extract_title, is_remote_job,
};
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Job Opening";
pub const DEFAULT_COMPANY: &str = "Company";
pub const DEFAULT_LOCATION: &str = "Location not specified";

/// Sources queried when no configuration says otherwise.
pub const DEFAULT_SOURCES: [JobSource; 3] =
    [JobSource::LinkedIn, JobSource::Indeed, JobSource::RemoteCo];

impl JobSource {
    /// Link fragments identifying results from this board.
    pub fn domains(&self) -> &'static [&'static str] {
        match self {
            JobSource::LinkedIn => &["linkedin.com/jobs"],
            JobSource::Indeed => &["indeed.com"],
            JobSource::Glassdoor => &["glassdoor.com"],
            JobSource::RemoteCo => &["remote.co", "remoteok.io", "weworkremotely.com"],
            JobSource::Local => &[],
        }
    }

    /// Whether the source is reachable through web search at all.
    pub fn is_searchable(&self) -> bool {
        !matches!(self, JobSource::Local)
    }

    pub fn accepts_link(&self, link: &str) -> bool {
        self.domains().iter().any(|domain| link.contains(domain))
    }

    /// Build the site-restricted query for this board.
    ///
    /// Returns `None` for sources that are not searched on the web.
    pub fn build_query(&self, params: &JobSearchParams) -> Option<String> {
        let query = params.query.as_deref().filter(|q| !q.is_empty());
        let location = params.location.as_deref().filter(|l| !l.is_empty());
        let job_type = params.job_type.map(|t| t.as_str());

        let mut out = match self {
            JobSource::LinkedIn => "site:linkedin.com/jobs".to_string(),
            JobSource::Indeed => "site:indeed.com".to_string(),
            JobSource::Glassdoor => "site:glassdoor.com/job-listing".to_string(),
            JobSource::RemoteCo => {
                "site:remote.co OR site:remoteok.io OR site:weworkremotely.com".to_string()
            }
            JobSource::Local => return None,
        };

        match self {
            JobSource::LinkedIn => {
                push_quoted(&mut out, query);
                push_quoted(&mut out, location);
                push_quoted(&mut out, job_type);
                if params.wants_remote() {
                    out.push_str(" remote");
                }
            }
            JobSource::Indeed => {
                if let Some(q) = query {
                    out.push_str(&format!(" \"{}\" jobs", q));
                }
                push_quoted(&mut out, location);
                if params.wants_remote() {
                    out.push_str(" remote");
                }
            }
            JobSource::Glassdoor => {
                push_quoted(&mut out, query);
                push_quoted(&mut out, location);
                if params.wants_remote() {
                    out.push_str(" remote");
                }
            }
            JobSource::RemoteCo => {
                push_quoted(&mut out, query);
                push_quoted(&mut out, job_type);
            }
            JobSource::Local => {}
        }

        Some(out)
    }

    /// Turn raw provider results into jobs from this board.
    ///
    /// Results whose link belongs elsewhere are skipped, as are results
    /// from which neither a title nor a company could be read.
    pub fn parse_results(
        &self,
        results: &[SearchResult],
        scraped_at: DateTime<Utc>,
    ) -> Vec<ScrapedJob> {
        let stamp = scraped_at.timestamp_millis();

        let jobs: Vec<ScrapedJob> = results
            .iter()
            .filter(|result| self.accepts_link(&result.link))
            .enumerate()
            .filter_map(|(index, result)| {
                let id = format!("{}_{}_{}", self.prefix(), stamp, index);
                self.to_job(id, result, scraped_at)
            })
            .collect();

        debug!(
            "{}: kept {} of {} results",
            self,
            jobs.len(),
            results.len()
        );
        jobs
    }

    fn to_job(
        &self,
        id: String,
        result: &SearchResult,
        scraped_at: DateTime<Utc>,
    ) -> Option<ScrapedJob> {
        let snippet = result.snippet.as_str();
        let title = extract_title(&result.title);
        let company = extract_company(snippet);

        if title.is_none() && company.is_none() {
            return None;
        }

        let (location, is_remote) = match self {
            JobSource::RemoteCo => ("Remote".to_string(), true),
            _ => (
                extract_location(snippet).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                is_remote_job(snippet),
            ),
        };

        Some(ScrapedJob {
            id,
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            company: company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            location,
            description: snippet.to_string(),
            salary: extract_salary(snippet),
            job_type: extract_job_type(snippet),
            experience_level: extract_experience_level(snippet),
            skills: extract_skills(snippet),
            posted_date: scraped_at,
            source: *self,
            external_url: result.link.clone(),
            is_remote,
            applications: None,
        })
    }
}

/// Queries a search over `sources` would issue, in order.
pub fn plan_queries(sources: &[JobSource], params: &JobSearchParams) -> Vec<(JobSource, String)> {
    sources
        .iter()
        .filter_map(|source| source.build_query(params).map(|q| (*source, q)))
        .collect()
}

fn push_quoted(out: &mut String, fragment: Option<&str>) {
    if let Some(fragment) = fragment {
        out.push_str(&format!(" \"{}\"", fragment));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, JobType};
    use chrono::TimeZone;

    fn full_params() -> JobSearchParams {
        JobSearchParams {
            query: Some("rust developer".to_string()),
            location: Some("Austin".to_string()),
            job_type: Some(JobType::Contract),
            remote: Some(true),
            ..Default::default()
        }
    }

    fn scraped_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_linkedin_query() {
        assert_eq!(
            JobSource::LinkedIn.build_query(&full_params()).unwrap(),
            r#"site:linkedin.com/jobs "rust developer" "Austin" "contract" remote"#
        );
    }

    #[test]
    fn test_indeed_query() {
        assert_eq!(
            JobSource::Indeed.build_query(&full_params()).unwrap(),
            r#"site:indeed.com "rust developer" jobs "Austin" remote"#
        );
    }

    #[test]
    fn test_remote_query_ignores_location() {
        assert_eq!(
            JobSource::RemoteCo.build_query(&full_params()).unwrap(),
            r#"site:remote.co OR site:remoteok.io OR site:weworkremotely.com "rust developer" "contract""#
        );
    }

    #[test]
    fn test_empty_params_give_bare_site_query() {
        let params = JobSearchParams::default();
        assert_eq!(
            JobSource::LinkedIn.build_query(&params).unwrap(),
            "site:linkedin.com/jobs"
        );
        assert_eq!(JobSource::Local.build_query(&params), None);
    }

    #[test]
    fn test_plan_queries_skips_local() {
        let planned = plan_queries(
            &[JobSource::LinkedIn, JobSource::Local, JobSource::Glassdoor],
            &JobSearchParams::default(),
        );
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[1].0, JobSource::Glassdoor);
    }

    #[test]
    fn test_link_filter() {
        assert!(JobSource::LinkedIn.accepts_link("https://www.linkedin.com/jobs/view/123"));
        assert!(!JobSource::LinkedIn.accepts_link("https://www.linkedin.com/in/someone"));
        assert!(JobSource::RemoteCo.accepts_link("https://weworkremotely.com/jobs/1"));
        assert!(!JobSource::Indeed.accepts_link(""));
    }

    #[test]
    fn test_parse_acme_result() {
        let results = vec![SearchResult::new(
            "Senior Backend Engineer - LinkedIn",
            "Senior Backend Engineer at Acme Corp in Austin, TX. $120k-$150k. Remote OK.",
            "https://www.linkedin.com/jobs/view/42",
        )];

        let jobs = JobSource::LinkedIn.parse_results(&results, scraped_at());
        assert_eq!(jobs.len(), 1);

        let job = &jobs[0];
        assert_eq!(job.title, "Senior Backend Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.location, "Austin, TX");
        assert_eq!(job.salary.as_deref(), Some("$120k-$150k"));
        assert_eq!(job.experience_level, ExperienceLevel::Senior);
        assert!(job.is_remote);
        assert_eq!(job.source, JobSource::LinkedIn);
        assert_eq!(job.posted_date, scraped_at());
        assert_eq!(
            job.id,
            format!("linkedin_{}_0", scraped_at().timestamp_millis())
        );
        assert_eq!(job.applications, None);
    }

    #[test]
    fn test_foreign_links_are_dropped() {
        let results = vec![
            SearchResult::new("Engineer", "at Acme", "https://example.com/job"),
            SearchResult::new("Engineer", "at Acme", "https://indeed.com/viewjob?jk=1"),
        ];
        let jobs = JobSource::Indeed.parse_results(&results, scraped_at());
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].id.ends_with("_0"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let results = vec![SearchResult::new(
            "",
            "Globex is hiring now",
            "https://indeed.com/viewjob?jk=2",
        )];
        let jobs = JobSource::Indeed.parse_results(&results, scraped_at());
        assert_eq!(jobs[0].title, DEFAULT_TITLE);
        assert_eq!(jobs[0].company, "Globex");
        assert_eq!(jobs[0].location, DEFAULT_LOCATION);
        assert_eq!(jobs[0].salary, None);
        assert_eq!(jobs[0].job_type, JobType::FullTime);
    }

    #[test]
    fn test_result_without_title_or_company_is_excluded() {
        let results = vec![SearchResult::new(
            "Hiring:",
            "great benefits and free snacks",
            "https://www.linkedin.com/jobs/view/7",
        )];
        assert!(JobSource::LinkedIn.parse_results(&results, scraped_at()).is_empty());
    }

    #[test]
    fn test_remote_source_forces_remote_location() {
        let results = vec![SearchResult::new(
            "Support Engineer - Remote.co",
            "Join Basecamp in Chicago",
            "https://remote.co/job/support",
        )];
        let jobs = JobSource::RemoteCo.parse_results(&results, scraped_at());
        assert_eq!(jobs[0].title, "Support Engineer");
        assert_eq!(jobs[0].company, "Basecamp");
        assert_eq!(jobs[0].location, "Remote");
        assert!(jobs[0].is_remote);
        assert_eq!(jobs[0].source, JobSource::RemoteCo);
    }
}
