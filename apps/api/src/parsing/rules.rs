//! Ordered, named regex rules with first-match-wins precedence.
//!
//! A `RuleSet` is evaluated rule by rule in declaration order. The first rule
//! that matches anywhere in the text wins, and only its first match is used.
//! Later rules are never consulted once an earlier one has fired.

use once_cell::sync::Lazy;
use regex::Regex;

pub struct PatternRule {
    pub name: &'static str,
    pub pattern: Regex,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
        }
    }
}

/// The rule that fired and the text it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHit<'t> {
    pub rule: &'static str,
    pub value: &'t str,
}

pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// Whole-match value of the first rule that matches.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<RuleHit<'t>> {
        self.rules.iter().find_map(|rule| {
            rule.pattern.find(text).map(|m| RuleHit {
                rule: rule.name,
                value: m.as_str(),
            })
        })
    }

    /// Capture group 1 of the first rule that matches.
    pub fn first_capture<'t>(&self, text: &'t str) -> Option<RuleHit<'t>> {
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| RuleHit {
                    rule: rule.name,
                    value: m.as_str(),
                })
        })
    }

    /// Like `first_capture`, but the capture must parse as a number; a rule whose
    /// capture does not parse is skipped and the next rule is tried.
    pub fn first_number(&self, text: &str) -> Option<(&'static str, u32)> {
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .map(|n| (rule.name, n))
        })
    }
}

pub static PHONE_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        PatternRule::new(
            "international",
            r"\+\d{1,3}[\s\-]?\d{3,4}[\s\-]?\d{3,4}[\s\-]?\d{3,4}",
        ),
        PatternRule::new("area_code", r"\(\d{3}\)[\s\-]?\d{3}[\s\-]?\d{4}"),
        PatternRule::new("plain", r"\d{3}[\s\-.]?\d{3}[\s\-.]?\d{4}"),
    ])
});

pub static EMAIL_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![PatternRule::new(
        "email",
        r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}",
    )])
});

/// Tenure stated in a resume ("7 years", "10 experience"). Applied to lowercased text.
pub static STATED_TENURE_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        PatternRule::new("years", r"(\d+)\s*years"),
        PatternRule::new("experience", r"(\d+)\s*experience"),
        PatternRule::new("experienced", r"(\d+)\s*experienced"),
    ])
});

/// Tenure required by a job description. Applied to lowercased text.
pub static REQUIRED_TENURE_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        PatternRule::new("years_experience", r"(\d+)\+?\s*years?\s+experience"),
        PatternRule::new("experience_of_years", r"experience\s+of\s+(\d+)\+?\s*years?"),
        PatternRule::new("year_range", r"(\d+)\s*-\s*\d+\s*years"),
    ])
});

/// Years a job description asks for: any bare "N years" / "N+ years" figure
/// first, then the stricter requirement phrasings. Applied to lowercased text.
pub static JOB_YEARS_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        PatternRule::new("years", r"(\d+)\+?\s*years"),
        PatternRule::new("years_experience", r"(\d+)\+?\s*years?\s+experience"),
        PatternRule::new("experience_of_years", r"experience\s+of\s+(\d+)\+?\s*years?"),
        PatternRule::new("year_range", r"(\d+)\s*-\s*\d+\s*years"),
    ])
});

/// Word-bounded 19xx/20xx tokens.
pub static YEAR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_international_beats_plain() {
        let text = "Office 555-123-4567, mobile +44 7911 123 456";
        let hit = PHONE_RULES.first_match(text).unwrap();
        assert_eq!(hit.rule, "international");
        assert_eq!(hit.value, "+44 7911 123 456");
    }

    #[test]
    fn test_phone_area_code_beats_plain() {
        let text = "555.987.6543 or (555) 123-4567";
        let hit = PHONE_RULES.first_match(text).unwrap();
        assert_eq!(hit.rule, "area_code");
        assert_eq!(hit.value, "(555) 123-4567");
    }

    #[test]
    fn test_phone_plain_takes_first_occurrence() {
        let hit = PHONE_RULES.first_match("call 555-000-1111 or 555-222-3333").unwrap();
        assert_eq!(hit.rule, "plain");
        assert_eq!(hit.value, "555-000-1111");
    }

    #[test]
    fn test_stated_tenure_capture_follows_rule_order() {
        let hit = STATED_TENURE_RULES.first_capture("10 experienced engineers").unwrap();
        assert_eq!(hit.rule, "experience");
        assert_eq!(hit.value, "10");
        assert!(STATED_TENURE_RULES.first_capture("no numbers").is_none());
    }

    #[test]
    fn test_email_rule() {
        let hit = EMAIL_RULES.first_match("reach me: a.b+c@mail.example.org.").unwrap();
        assert_eq!(hit.value, "a.b+c@mail.example.org");
        assert!(EMAIL_RULES.first_match("no address here @ all").is_none());
    }

    #[test]
    fn test_required_tenure_precedence() {
        let text = "3-5 years in the field; 4+ years experience with go";
        let (rule, years) = REQUIRED_TENURE_RULES.first_number(text).unwrap();
        assert_eq!(rule, "years_experience");
        assert_eq!(years, 4);
    }

    #[test]
    fn test_required_tenure_range_takes_lower_bound() {
        let (rule, years) = REQUIRED_TENURE_RULES.first_number("we want 3 - 5 years").unwrap();
        assert_eq!(rule, "year_range");
        assert_eq!(years, 3);
    }

    #[test]
    fn test_unparseable_capture_falls_through() {
        let text = "99999999999 years experience; experience of 6 years";
        let (rule, years) = REQUIRED_TENURE_RULES.first_number(text).unwrap();
        assert_eq!(rule, "experience_of_years");
        assert_eq!(years, 6);
    }

    #[test]
    fn test_job_years_accepts_bare_plus_figure() {
        let (rule, years) = JOB_YEARS_RULES.first_number("8+ years required").unwrap();
        assert_eq!(rule, "years");
        assert_eq!(years, 8);
        assert!(REQUIRED_TENURE_RULES.first_number("8+ years required").is_none());
    }

    #[test]
    fn test_year_token_is_word_bounded() {
        let years: Vec<&str> = YEAR_TOKEN
            .find_iter("2015-2019, id 120195, 1899, 2031")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(years, vec!["2015", "2019", "2031"]);
    }
}
