//! Match Scoring — pluggable, trait-based scorer that measures a candidate
//! profile against a raw job description.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, deterministic, fully testable).
//! `AppState` holds an `Arc<dyn ResumeScorer>`.

use std::collections::HashSet;

use tracing::debug;

use crate::matching::job_keywords::{extract_job_keywords, required_years};
use crate::models::analysis::{
    ExperienceLevel, ExperienceMatch, MatchResult, Recommendation, SkillMatch,
};
use crate::models::profile::CandidateProfile;

/// Similarity reported when text similarity is switched off.
const DEFAULT_TEXT_SIMILARITY: f64 = 7.0;
/// Only the head of the job description is compared against the summary.
const SIMILARITY_JD_CHARS: usize = 500;
const MAX_REPORTED_KEYWORDS: usize = 20;
const FEEDBACK_LISTED_SKILLS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers.
pub trait ResumeScorer: Send + Sync {
    fn score(
        &self,
        profile: &CandidateProfile,
        job_description: &str,
        use_text_similarity: bool,
    ) -> MatchResult;
}

#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub similarity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.5,
            experience: 0.3,
            similarity: 0.2,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Keyword/tenure/similarity scorer.
///
/// overall = skill × 0.5 + experience × 0.3 + similarity × 0.2, each on 0 – 10.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatchScorer {
    pub weights: ScoringWeights,
}

impl ResumeScorer for KeywordMatchScorer {
    fn score(
        &self,
        profile: &CandidateProfile,
        job_description: &str,
        use_text_similarity: bool,
    ) -> MatchResult {
        let job_keywords = extract_job_keywords(job_description);
        let skill_match = compute_skill_match(profile, &job_keywords);
        let experience_match =
            compute_experience_match(profile.experience.years, required_years(job_description));

        let text_similarity = if use_text_similarity {
            let jd_head: String = job_description.chars().take(SIMILARITY_JD_CHARS).collect();
            jaccard_similarity(&profile.summary, &jd_head) * 10.0
        } else {
            DEFAULT_TEXT_SIMILARITY
        };

        let overall_score = round1(
            skill_match.score * self.weights.skill
                + experience_match.score * self.weights.experience
                + text_similarity * self.weights.similarity,
        );

        debug!(
            keywords = job_keywords.len(),
            skill_pct = skill_match.percentage,
            experience = experience_match.score,
            similarity = text_similarity,
            overall = overall_score,
            "Scored resume against job description"
        );

        let feedback = build_feedback(overall_score, &skill_match, &experience_match);

        MatchResult {
            overall_score,
            skill_match,
            experience_match,
            text_similarity: round1(text_similarity),
            job_keywords: job_keywords.into_iter().take(MAX_REPORTED_KEYWORDS).collect(),
            feedback,
            recommendation: Recommendation::from_score(overall_score),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dimensions
// ────────────────────────────────────────────────────────────────────────────

/// A keyword matches when it contains, or is contained in, any profile skill.
fn compute_skill_match(profile: &CandidateProfile, job_keywords: &[String]) -> SkillMatch {
    let skills = profile.flattened_skills();

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) =
        job_keywords.iter().cloned().partition(|keyword| {
            let keyword = keyword.to_lowercase();
            skills
                .iter()
                .any(|skill| keyword.contains(skill.as_str()) || skill.contains(&keyword))
        });

    let percentage = if job_keywords.is_empty() {
        0.0
    } else {
        round1(matched_skills.len() as f64 / job_keywords.len() as f64 * 100.0)
    };

    SkillMatch {
        matched_skills,
        missing_skills,
        percentage,
        score: percentage / 10.0,
    }
}

fn compute_experience_match(years_actual: u32, years_required: u32) -> ExperienceMatch {
    let score = if years_required > 0 {
        if years_actual >= years_required {
            10.0
        } else if years_actual > 0 {
            (years_actual as f64 / years_required as f64 * 10.0).min(10.0)
        } else {
            0.0
        }
    } else {
        match years_actual {
            8.. => 9.0,
            5.. => 7.5,
            3.. => 6.0,
            1.. => 4.0,
            0 => 2.0,
        }
    };

    ExperienceMatch {
        years_required,
        years_actual,
        score: round1(score),
        match_level: ExperienceLevel::from_years(years_actual),
    }
}

/// Jaccard similarity of the lowercase whitespace-separated word sets, 0 – 1.
fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let a_words: HashSet<&str> = a_lower.split_whitespace().collect();
    let b_words: HashSet<&str> = b_lower.split_whitespace().collect();

    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }

    let intersection = a_words.intersection(&b_words).count();
    let union = a_words.union(&b_words).count();
    intersection as f64 / union as f64
}

fn build_feedback(
    overall: f64,
    skill_match: &SkillMatch,
    experience_match: &ExperienceMatch,
) -> Vec<String> {
    let mut feedback = Vec::new();
    let top_missing = skill_match
        .missing_skills
        .iter()
        .take(FEEDBACK_LISTED_SKILLS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    feedback.push(
        if overall >= 8.5 {
            "Excellent match: the candidate is a strong fit for this role."
        } else if overall >= 7.0 {
            "Good match: the candidate meets most of the role requirements."
        } else if overall >= 5.0 {
            "Moderate match: some requirements are met, further evaluation is advised."
        } else {
            "Weak match: the candidate may not be suitable for this role."
        }
        .to_string(),
    );

    let pct = skill_match.percentage;
    if pct >= 80.0 {
        feedback.push(format!("Skill match is excellent ({pct:.1}%)."));
    } else if pct >= 60.0 {
        feedback.push(format!("Skill match is fair ({pct:.1}%)."));
    } else {
        feedback.push(format!("Skill match is insufficient ({pct:.1}%)."));
        if !skill_match.missing_skills.is_empty() {
            feedback.push(format!("Missing skills: {top_missing}"));
        }
    }

    let actual = experience_match.years_actual;
    let required = experience_match.years_required;
    if required > 0 {
        if actual >= required {
            feedback.push(format!("Experience requirement met ({actual} years)."));
        } else {
            feedback.push(format!(
                "Experience falls short by {} years: {required} required, {actual} found.",
                required - actual
            ));
        }
    } else {
        feedback.push(format!(
            "No explicit experience requirement; candidate has {actual} years of experience."
        ));
    }

    if overall < 7.0 && !skill_match.missing_skills.is_empty() {
        feedback.push(format!(
            "Suggestion: consider whether the candidate can pick up {top_missing}."
        ));
    }

    feedback
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
