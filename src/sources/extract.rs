//! Field extraction from search-result titles and snippets.
//!
//! Everything here is a best-effort heuristic over free text. Functions
//! return `None` (or a default classification) when nothing matches and
//! never fail on odd input.

use crate::models::{ExperienceLevel, JobType};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of skills kept per posting.
pub const MAX_SKILLS: usize = 6;

/// Skills recognized in snippets, in reporting order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "TypeScript",
    "AWS",
    "Docker",
    "Kubernetes",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "HTML",
    "CSS",
    "Vue.js",
    "Angular",
    "PHP",
    "Ruby",
    "Go",
    "Rust",
    "Machine Learning",
    "AI",
    "Data Science",
    "DevOps",
    "Agile",
    "Figma",
    "Adobe",
    "Photoshop",
    "Illustrator",
    "UI/UX",
    "Design",
    "Marketing",
    "SEO",
    "Content",
    "Social Media",
    "Analytics",
];

// A run of capitalized words, e.g. "Acme Corp" or "Johnson & Johnson".
const NAME_WORDS: &str = r"[A-Z][A-Za-z0-9&'-]*(?:[ ]+(?:&[ ]+)?[A-Z][A-Za-z0-9&'-]*)*";
const PLACE_WORDS: &str = r"[A-Z][A-Za-z'-]*(?:[ ]+[A-Z][A-Za-z'-]*)*";

static TITLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:job|jobs|hiring|career|position|opening):\s*")
        .expect("title prefix regex is valid")
});

static TITLE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*-\s*(?:linkedin|indeed|remote\.co|glassdoor)\b.*$")
        .expect("title suffix regex is valid")
});

static COMPANY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"\bat\s+({NAME_WORDS})"),
        format!(r"({NAME_WORDS})\s+(?i:is\s+hiring)"),
        format!(r"\b(?i:join)\s+({NAME_WORDS})"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("company regex is valid"))
    .collect()
});

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"\bin\s+({PLACE_WORDS}(?:,\s*[A-Z]{{2}}\b)?)"),
        format!(r"\b({PLACE_WORDS},\s*[A-Z]{{2}})\b"),
        r"(?i)\b(remote|worldwide|global)\b".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("location regex is valid"))
    .collect()
});

static SALARY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\$\d[\d,]*(?:\.\d+)?k?(?:\s*-\s*\$?\d[\d,]*(?:\.\d+)?k?)?(?:\s*/\s*(?:year|yr|hour|hr)\b)?",
        r"(?i)\b\d[\d,]*k(?:\s*-\s*\d[\d,]*k)?\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("salary regex is valid"))
    .collect()
});

static FULL_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)full.?time|permanent").expect("job type regex is valid"));
static PART_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)part.?time").expect("job type regex is valid"));
static CONTRACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)contract|contractor|freelance").expect("job type regex is valid")
});

static SENIOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:senior|lead|principal|staff)").expect("experience regex is valid")
});
static MID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)mid.?level|\bexperienced|\b3.5\s*years").expect("experience regex is valid")
});
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)entry.?level|\bjunior|\bgraduate|\bintern").expect("experience regex is valid")
});

static REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)remote|work.from.home|distributed|anywhere").expect("remote regex is valid")
});

/// Clean a result title. Returns `None` when nothing is left.
pub fn extract_title(text: &str) -> Option<String> {
    let without_prefix = TITLE_PREFIX.replace(text.trim(), "");
    let cleaned = TITLE_SUFFIX.replace(&without_prefix, "");
    non_empty(cleaned.trim())
}

/// Find the hiring company named in a snippet.
pub fn extract_company(text: &str) -> Option<String> {
    first_capture(&COMPANY_PATTERNS, text)
}

/// Find the location named in a snippet.
pub fn extract_location(text: &str) -> Option<String> {
    first_capture(&LOCATION_PATTERNS, text)
}

/// Find a salary figure or range in a snippet.
pub fn extract_salary(text: &str) -> Option<String> {
    SALARY_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .and_then(|m| non_empty(m.as_str().trim_end_matches(',')))
}

/// Classify the employment type, defaulting to full-time.
pub fn extract_job_type(text: &str) -> JobType {
    if FULL_TIME.is_match(text) {
        JobType::FullTime
    } else if PART_TIME.is_match(text) {
        JobType::PartTime
    } else if CONTRACT.is_match(text) {
        JobType::Contract
    } else {
        JobType::FullTime
    }
}

/// Classify the seniority, defaulting to mid.
pub fn extract_experience_level(text: &str) -> ExperienceLevel {
    if SENIOR.is_match(text) {
        ExperienceLevel::Senior
    } else if MID.is_match(text) {
        ExperienceLevel::Mid
    } else if ENTRY.is_match(text) {
        ExperienceLevel::Entry
    } else {
        ExperienceLevel::Mid
    }
}

/// Vocabulary skills mentioned in the text (case-insensitive substring).
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .take(MAX_SKILLS)
        .map(|skill| skill.to_string())
        .collect()
}

pub fn is_remote_job(text: &str) -> bool {
    REMOTE.is_match(text)
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text).and_then(|caps| caps.get(1)))
        .and_then(|m| non_empty(m.as_str().trim_end_matches(['.', ',', '-']).trim()))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACME: &str =
        "Senior Backend Engineer at Acme Corp in Austin, TX. $120k-$150k. Remote OK.";

    #[test]
    fn test_title_strips_prefix_and_suffix() {
        assert_eq!(
            extract_title("Hiring: Rust Developer - LinkedIn"),
            Some("Rust Developer".to_string())
        );
        assert_eq!(
            extract_title("Data Analyst - Indeed.com"),
            Some("Data Analyst".to_string())
        );
        assert_eq!(
            extract_title("Frontend Engineer - Acme"),
            Some("Frontend Engineer - Acme".to_string())
        );
        assert_eq!(extract_title("Jobs: "), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_acme_snippet() {
        assert_eq!(extract_company(ACME), Some("Acme Corp".to_string()));
        assert_eq!(extract_location(ACME), Some("Austin, TX".to_string()));
        assert_eq!(extract_salary(ACME), Some("$120k-$150k".to_string()));
        assert_eq!(extract_experience_level(ACME), ExperienceLevel::Senior);
        assert_eq!(extract_job_type(ACME), JobType::FullTime);
        assert!(is_remote_job(ACME));
    }

    #[test]
    fn test_company_patterns() {
        assert_eq!(
            extract_company("Globex Industries is hiring a designer."),
            Some("Globex Industries".to_string())
        );
        assert_eq!(
            extract_company("Join Initech as a QA engineer"),
            Some("Initech".to_string())
        );
        assert_eq!(
            extract_company("Work at Johnson & Johnson today"),
            Some("Johnson & Johnson".to_string())
        );
        assert_eq!(extract_company("no company mentioned here"), None);
    }

    #[test]
    fn test_location_patterns() {
        assert_eq!(
            extract_location("Office in San Francisco, CA with perks"),
            Some("San Francisco, CA".to_string())
        );
        assert_eq!(
            extract_location("Based in Berlin. Apply now"),
            Some("Berlin".to_string())
        );
        assert_eq!(
            extract_location("Portland, OR office"),
            Some("Portland, OR".to_string())
        );
        assert_eq!(
            extract_location("open worldwide to all"),
            Some("worldwide".to_string())
        );
        assert_eq!(extract_location("nothing useful"), None);
    }

    #[test]
    fn test_salary_patterns() {
        assert_eq!(
            extract_salary("Pay: $18 - $22/hour, weekends"),
            Some("$18 - $22/hour".to_string())
        );
        assert_eq!(
            extract_salary("Compensation $95,000, plus equity"),
            Some("$95,000".to_string())
        );
        assert_eq!(extract_salary("Range 90k-110k DOE"), Some("90k-110k".to_string()));
        assert_eq!(extract_salary("Competitive pay"), None);
    }

    #[test]
    fn test_job_type_classification() {
        assert_eq!(extract_job_type("Part-time role"), JobType::PartTime);
        assert_eq!(extract_job_type("6 month contract"), JobType::Contract);
        assert_eq!(extract_job_type("freelance gig"), JobType::Contract);
        assert_eq!(extract_job_type("Permanent position"), JobType::FullTime);
        assert_eq!(extract_job_type("no hint"), JobType::FullTime);
    }

    #[test]
    fn test_experience_classification() {
        assert_eq!(
            extract_experience_level("Junior developer wanted"),
            ExperienceLevel::Entry
        );
        assert_eq!(
            extract_experience_level("Mid-level engineer"),
            ExperienceLevel::Mid
        );
        assert_eq!(
            extract_experience_level("Lead architect"),
            ExperienceLevel::Senior
        );
        assert_eq!(extract_experience_level("Engineer"), ExperienceLevel::Mid);
    }

    #[test]
    fn test_skills_are_capped_and_ordered() {
        let text = "Rust, Python, Docker, Kubernetes, AWS, SQL, React and Figma";
        let skills = extract_skills(text);
        assert_eq!(skills.len(), MAX_SKILLS);
        assert_eq!(skills[0], "Python");
        assert!(skills.contains(&"Docker".to_string()));
        assert!(!skills.contains(&"Figma".to_string()));
    }

    #[test]
    fn test_skills_case_insensitive() {
        assert_eq!(extract_skills("we use typescript"), vec!["TypeScript"]);
        assert!(extract_skills("").is_empty());
    }

    #[test]
    fn test_remote_detection() {
        assert!(is_remote_job("Work from home available"));
        assert!(is_remote_job("Fully distributed team"));
        assert!(!is_remote_job("On-site in Denver"));
    }

    #[test]
    fn test_odd_input_does_not_panic() {
        for text in ["", "   ", "$", "k", "at ", "in ,", "ÄÖÜ at Ünïcode", "$,,,k-"] {
            let _ = extract_title(text);
            let _ = extract_company(text);
            let _ = extract_location(text);
            let _ = extract_salary(text);
            let _ = extract_skills(text);
        }
    }
}
