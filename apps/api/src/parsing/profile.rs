//! Attribute extraction — rule-based passes over resume text producing a
//! `CandidateProfile`. Never fails; anything not found stays empty.

use std::collections::BTreeSet;

use crate::models::profile::{
    BasicInfo, CandidateProfile, Education, Experience, SkillCategory, SkillMap,
};
use crate::parsing::rules::{EMAIL_RULES, PHONE_RULES, STATED_TENURE_RULES, YEAR_TOKEN};

const NAME_SCAN_LINES: usize = 10;
const NAME_FORBIDDEN: &[char] = &['@', '#', '$', '%', '^', '&', '*', '(', ')'];

const LOCATION_KEYWORDS: &[&str] = &[
    "street", "avenue", "road", "st.", "ave.", "rd.", "city", "state", "province", "country",
    "zip", "postal",
];

const SKILL_KEYWORDS: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Programming,
        &[
            "python", "java", "javascript", "c++", "c#", "go", "rust", "php", "ruby", "swift",
            "kotlin",
        ],
    ),
    (
        SkillCategory::Web,
        &[
            "html", "css", "react", "vue", "angular", "django", "flask", "node.js", "express",
            "spring",
        ],
    ),
    (
        SkillCategory::Databases,
        &["mysql", "postgresql", "mongodb", "redis", "oracle", "sqlite", "sql"],
    ),
    (
        SkillCategory::Cloud,
        &["aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab", "github"],
    ),
    (
        SkillCategory::AiMl,
        &[
            "tensorflow",
            "pytorch",
            "scikit-learn",
            "nlp",
            "computer vision",
            "machine learning",
            "deep learning",
        ],
    ),
    (
        SkillCategory::SoftSkills,
        &[
            "leadership",
            "communication",
            "teamwork",
            "problem solving",
            "project management",
        ],
    ),
];

const EXPERIENCE_SECTION_KEYWORDS: &[&str] =
    &["experience", "work", "employment", "career", "professional"];
/// Lines inspected after each experience-section header.
const SECTION_LOOKAHEAD: usize = 9;
const ROLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "director",
    "specialist",
    "consultant",
];
const COMPANY_KEYWORDS: &[&str] = &["inc", "ltd", "corp", "company", "technologies", "group"];
const MAX_EMPLOYMENT_ENTRIES: usize = 5;

const EARLIEST_YEAR: u32 = 1901;
const LATEST_YEAR: u32 = 2024;
const SENIOR_KEYWORDS: &[&str] = &["senior", "lead", "principal", "architect", "director"];
const JUNIOR_KEYWORDS: &[&str] = &["junior", "entry", "fresh", "graduate", "intern"];

const EDUCATION_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "bachelor",
    "master",
    "phd",
    "doctor",
];
const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctor", "b.sc", "m.sc", "b.tech", "m.tech", "bs", "ms",
];

const SUMMARY_CHARS: usize = 300;

/// Runs every extraction pass over `text`.
pub fn extract_profile(text: &str) -> CandidateProfile {
    let lower = text.to_lowercase();
    CandidateProfile {
        basic_info: extract_basic_info(text),
        skills: extract_skills(&lower),
        experience: Experience {
            years: estimate_years(text, &lower),
            ..extract_employment(text)
        },
        education: extract_education(text),
        summary: summarize(text),
    }
}

fn extract_basic_info(text: &str) -> BasicInfo {
    BasicInfo {
        name: extract_name(text),
        phone: PHONE_RULES
            .first_match(text)
            .map(|hit| hit.value.to_string())
            .unwrap_or_default(),
        email: EMAIL_RULES
            .first_match(text)
            .map(|hit| hit.value.to_string())
            .unwrap_or_default(),
        location: extract_location(text),
    }
}

fn extract_name(text: &str) -> String {
    text.split('\n')
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            let words = line.split_whitespace().count();
            (2..=4).contains(&words)
                && !line.chars().any(char::is_numeric)
                && !line.contains(NAME_FORBIDDEN)
        })
        .map(str::to_string)
        .unwrap_or_default()
}

fn extract_location(text: &str) -> String {
    text.split(&['.', '!', '?'][..])
        .find_map(|sentence| {
            let lower = sentence.to_lowercase();
            if !LOCATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
                return None;
            }
            let candidate = sentence.trim();
            let len = candidate.chars().count();
            (len > 10 && len < 100).then(|| candidate.to_string())
        })
        .unwrap_or_default()
}

fn extract_skills(lower: &str) -> SkillMap {
    let mut skills = CandidateProfile::default().skills;
    for (category, keywords) in SKILL_KEYWORDS {
        let found: BTreeSet<String> = keywords
            .iter()
            .filter(|k| lower.contains(**k))
            .map(|k| title_case(k))
            .collect();
        skills.insert(*category, found);
    }
    skills
}

/// Uppercases every letter that follows a non-letter, lowercases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Tenure estimate, first tier that yields a value wins:
/// 1. span between the earliest and latest plausible year tokens (needs two)
/// 2. a number stated right before "years" / "experience" / "experienced"
/// 3. seniority keywords (senior → 5, junior → 1, otherwise 3)
fn estimate_years(text: &str, lower: &str) -> u32 {
    let years: Vec<u32> = YEAR_TOKEN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|y| (EARLIEST_YEAR..=LATEST_YEAR).contains(y))
        .collect();
    if years.len() >= 2 {
        let min = years.iter().min().copied().unwrap_or_default();
        let max = years.iter().max().copied().unwrap_or_default();
        return max.saturating_sub(min);
    }

    if let Some(stated) = STATED_TENURE_RULES
        .first_capture(lower)
        .and_then(|hit| hit.value.parse::<u32>().ok())
    {
        return stated;
    }

    if SENIOR_KEYWORDS.iter().any(|k| lower.contains(k)) {
        5
    } else if JUNIOR_KEYWORDS.iter().any(|k| lower.contains(k)) {
        1
    } else {
        3
    }
}

/// Companies and roles from the lines following any experience-section header.
/// A line matching a role keyword is never also counted as a company.
fn extract_employment(text: &str) -> Experience {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut companies: Vec<String> = Vec::new();
    let mut roles: Vec<String> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line_lower = line.to_lowercase();
        if !EXPERIENCE_SECTION_KEYWORDS.iter().any(|k| line_lower.contains(k)) {
            continue;
        }
        for next in lines.iter().skip(i + 1).take(SECTION_LOOKAHEAD) {
            let candidate = next.trim();
            if candidate.chars().count() <= 2 {
                continue;
            }
            let candidate_lower = candidate.to_lowercase();
            if ROLE_KEYWORDS.iter().any(|k| candidate_lower.contains(k)) {
                push_unique(&mut roles, candidate);
            } else if COMPANY_KEYWORDS.iter().any(|k| candidate_lower.contains(k)) {
                push_unique(&mut companies, candidate);
            }
        }
    }

    companies.truncate(MAX_EMPLOYMENT_ENTRIES);
    roles.truncate(MAX_EMPLOYMENT_ENTRIES);
    Experience {
        years: 0,
        companies,
        roles,
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

fn extract_education(text: &str) -> Education {
    let Some(line) = text.split('\n').find(|line| {
        let lower = line.to_lowercase();
        EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k))
    }) else {
        return Education::default();
    };

    let lower = line.to_lowercase();
    Education {
        degree: DEGREE_KEYWORDS
            .iter()
            .find(|d| lower.contains(*d))
            .map(|d| d.to_uppercase())
            .unwrap_or_default(),
        university: line.trim().to_string(),
        graduation_year: YEAR_TOKEN
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    }
}

fn summarize(text: &str) -> String {
    let head: String = text.chars().take(SUMMARY_CHARS).collect();
    let mut summary = head.trim().to_string();
    if text.chars().count() > SUMMARY_CHARS {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Marie Doe
Senior Software Engineer
Lives at 42 Harbor Street, Springfield.
jane.doe@example.com | (555) 123-4567
Professional Experience
Backend Developer
Acme Technologies Inc
Lead Data Analyst at Globex Corp
Initech Ltd
Education
Master of Science, State University 2012
Skills: Python, Rust, Docker, AWS, PostgreSQL, machine learning, leadership
Worked 2013 to 2021 on distributed systems.";

    fn skills_of(profile: &CandidateProfile, category: SkillCategory) -> Vec<String> {
        profile.skills[&category].iter().cloned().collect()
    }

    #[test]
    fn test_basic_info() {
        let profile = extract_profile(RESUME);
        assert_eq!(profile.basic_info.name, "Jane Marie Doe");
        assert_eq!(profile.basic_info.email, "jane.doe@example.com");
        assert_eq!(profile.basic_info.phone, "(555) 123-4567");
        // Sentences span lines; the first one mentioning an address keyword wins.
        assert_eq!(
            profile.basic_info.location,
            "Jane Marie Doe\nSenior Software Engineer\nLives at 42 Harbor Street, Springfield"
        );
    }

    #[test]
    fn test_email_absent_is_empty() {
        let profile = extract_profile("John Smith\nno contact details listed here");
        assert_eq!(profile.basic_info.email, "");
    }

    #[test]
    fn test_single_email_returned_unchanged() {
        let profile = extract_profile("Contact: first.last+jobs@sub.example.co.uk today");
        assert_eq!(profile.basic_info.email, "first.last+jobs@sub.example.co.uk");
    }

    #[test]
    fn test_name_skips_lines_with_digits_or_symbols() {
        let text = "Curriculum\nPhone 555 1234 x\nMe @ home now\nAda Lovelace\nAlan Turing";
        assert_eq!(extract_profile(text).basic_info.name, "Ada Lovelace");
    }

    #[test]
    fn test_name_only_checks_first_ten_lines() {
        let mut text = "x\n".repeat(10);
        text.push_str("Grace Hopper");
        assert_eq!(extract_profile(&text).basic_info.name, "");
    }

    #[test]
    fn test_location_length_window() {
        assert_eq!(extract_location("City. Oak Road"), "");
        assert_eq!(extract_location("Short. Based in Denver City area"), "Based in Denver City area");
    }

    #[test]
    fn test_skills_by_category() {
        let profile = extract_profile(RESUME);
        assert!(skills_of(&profile, SkillCategory::Programming).contains(&"Python".to_string()));
        assert!(skills_of(&profile, SkillCategory::Programming).contains(&"Rust".to_string()));
        assert_eq!(
            skills_of(&profile, SkillCategory::Cloud),
            vec!["Aws".to_string(), "Docker".to_string()]
        );
        assert!(skills_of(&profile, SkillCategory::Databases).contains(&"Postgresql".to_string()));
        assert_eq!(
            skills_of(&profile, SkillCategory::AiMl),
            vec!["Machine Learning".to_string()]
        );
        assert_eq!(
            skills_of(&profile, SkillCategory::SoftSkills),
            vec!["Leadership".to_string()]
        );
        assert!(profile.skills[&SkillCategory::Other].is_empty());
    }

    #[test]
    fn test_skills_are_order_independent_and_idempotent() {
        let a = extract_profile("docker and react\npython");
        let b = extract_profile("python\nreact and docker");
        assert_eq!(a.skills, b.skills);
        assert_eq!(a.skills, extract_profile("docker and react\npython").skills);
    }

    #[test]
    fn test_title_case_matches_keyword_rendering() {
        assert_eq!(title_case("node.js"), "Node.Js");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case("scikit-learn"), "Scikit-Learn");
        assert_eq!(title_case("problem solving"), "Problem Solving");
    }

    #[test]
    fn test_years_from_year_span() {
        let profile = extract_profile(RESUME);
        // 2012 (education) .. 2021
        assert_eq!(profile.experience.years, 9);
    }

    #[test]
    fn test_years_ignores_out_of_range_tokens() {
        assert_eq!(estimate_years("from 2030 to 2031", "from 2030 to 2031"), 3);
        assert_eq!(estimate_years("1999 and 2030", "1999 and 2030"), 3);
    }

    #[test]
    fn test_years_from_stated_tenure() {
        let text = "Engineer with 7 years building APIs since 2019";
        assert_eq!(estimate_years(text, &text.to_lowercase()), 7);
    }

    #[test]
    fn test_years_seniority_fallback() {
        assert_eq!(estimate_years("Principal", "principal"), 5);
        assert_eq!(estimate_years("Intern", "intern"), 1);
        assert_eq!(estimate_years("Engineer", "engineer"), 3);
    }

    #[test]
    fn test_years_never_exceeds_year_span() {
        let text = "2015 - 2018, 20 years of hobby coding";
        assert_eq!(estimate_years(text, &text.to_lowercase()), 3);
    }

    #[test]
    fn test_employment_roles_take_priority_over_companies() {
        let profile = extract_profile(RESUME);
        assert_eq!(
            profile.experience.roles,
            vec![
                "Backend Developer".to_string(),
                "Lead Data Analyst at Globex Corp".to_string(),
            ]
        );
        assert_eq!(
            profile.experience.companies,
            vec!["Acme Technologies Inc".to_string(), "Initech Ltd".to_string()]
        );
    }

    #[test]
    fn test_employment_lists_are_capped() {
        let mut text = String::from("Work history\n");
        for i in 0..8 {
            text.push_str(&format!("Engineer team {}\n", (b'A' + i) as char));
        }
        let profile = extract_profile(&text);
        assert_eq!(profile.experience.roles.len(), 5);
        assert_eq!(profile.experience.roles[0], "Engineer team A");
    }

    #[test]
    fn test_education_first_qualifying_line() {
        let profile = extract_profile(RESUME);
        assert_eq!(profile.education.university, "Master of Science, State University 2012");
        assert_eq!(profile.education.degree, "MASTER");
        assert_eq!(profile.education.graduation_year, "2012");
    }

    #[test]
    fn test_education_missing() {
        assert_eq!(extract_profile("just some words").education, Education::default());
    }

    #[test]
    fn test_summary_truncation() {
        let long = "a".repeat(350);
        let summary = summarize(&long);
        assert_eq!(summary.len(), 303);
        assert!(summary.ends_with("..."));
        assert_eq!(summarize("  short text  "), "short text");
    }

    #[test]
    fn test_empty_text_yields_defaults() {
        let profile = extract_profile("");
        assert_eq!(profile.basic_info, BasicInfo::default());
        assert_eq!(profile.experience.years, 3);
        assert!(profile.experience.companies.is_empty());
        assert_eq!(profile.summary, "");
    }
}
