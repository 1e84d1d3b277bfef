//! Keyword extraction from a raw job description.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::rules::{JOB_YEARS_RULES, REQUIRED_TENURE_RULES};

const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "go",
    "rust",
    "react",
    "vue",
    "angular",
    "node.js",
    "django",
    "flask",
    "spring",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "oracle",
    "machine learning",
    "ai",
    "deep learning",
    "nlp",
    "tensorflow",
    "pytorch",
    "agile",
    "scrum",
    "devops",
    "ci/cd",
    "git",
    "rest api",
    "microservices",
];

/// Technical-looking tokens considered per description.
const MAX_TECH_TOKENS: usize = 10;

static RE_CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+[A-Z][a-z]+\b").unwrap());
static RE_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").unwrap());

const SENIOR_LEVEL: &[&str] = &["senior", "lead", "principal", "architect", "expert"];
const MID_LEVEL: &[&str] = &["mid-level", "intermediate", "experienced"];
const JUNIOR_LEVEL: &[&str] = &["junior", "entry-level", "associate", "graduate"];

/// Extracts lowercase keywords from a job description, de-duplicated in
/// first-seen order:
/// 1. vocabulary terms occurring anywhere in the text
/// 2. up to 10 CamelCase / ACRONYM tokens from the original-case text
/// 3. `experience_<N>_years` when a tenure requirement is stated
pub fn extract_job_keywords(job_description: &str) -> Vec<String> {
    let lower = job_description.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for term in SKILL_VOCABULARY {
        if lower.contains(term) {
            push_unique(&mut keywords, term.to_string());
        }
    }

    let tech_tokens = RE_CAMEL_CASE
        .find_iter(job_description)
        .chain(RE_ACRONYM.find_iter(job_description))
        .take(MAX_TECH_TOKENS);
    for token in tech_tokens {
        push_unique(&mut keywords, token.as_str().to_lowercase());
    }

    if let Some((_, years)) = REQUIRED_TENURE_RULES.first_number(&lower) {
        push_unique(&mut keywords, format!("experience_{years}_years"));
    }

    keywords
}

/// Years of experience a job description asks for: an explicit figure if one
/// is stated (including a bare "N+ years"), otherwise inferred from seniority
/// wording (senior 5, mid 3, junior 1), otherwise 0.
pub fn required_years(job_description: &str) -> u32 {
    let lower = job_description.to_lowercase();
    if let Some((_, years)) = JOB_YEARS_RULES.first_number(&lower) {
        return years;
    }

    if SENIOR_LEVEL.iter().any(|k| lower.contains(k)) {
        5
    } else if MID_LEVEL.iter().any(|k| lower.contains(k)) {
        3
    } else if JUNIOR_LEVEL.iter().any(|k| lower.contains(k)) {
        1
    } else {
        0
    }
}

fn push_unique(keywords: &mut Vec<String>, keyword: String) {
    if !keywords.contains(&keyword) {
        keywords.push(keyword);
    }
}
