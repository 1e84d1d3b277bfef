use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 0 – 100, one decimal
    pub percentage: f64,
    /// Exactly `percentage / 10`.
    pub score: f64,
}

/// Bracket label for a candidate's tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry-level")]
    EntryLevel,
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
    #[serde(rename = "Senior-Expert")]
    SeniorExpert,
}

impl ExperienceLevel {
    pub fn from_years(years: u32) -> Self {
        match years {
            8.. => ExperienceLevel::SeniorExpert,
            5.. => ExperienceLevel::Senior,
            3.. => ExperienceLevel::MidLevel,
            1.. => ExperienceLevel::Junior,
            0 => ExperienceLevel::EntryLevel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceMatch {
    pub years_required: u32,
    pub years_actual: u32,
    pub score: f64,
    pub match_level: ExperienceLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "strongly recommend")]
    StronglyRecommend,
    #[serde(rename = "recommend")]
    Recommend,
    #[serde(rename = "consider")]
    Consider,
    #[serde(rename = "not recommended")]
    NotRecommended,
}

impl Recommendation {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 8.5 {
            Recommendation::StronglyRecommend
        } else if overall >= 7.0 {
            Recommendation::Recommend
        } else if overall >= 5.0 {
            Recommendation::Consider
        } else {
            Recommendation::NotRecommended
        }
    }
}

/// Outcome of scoring one profile against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0 – 10, one decimal
    pub overall_score: f64,
    pub skill_match: SkillMatch,
    pub experience_match: ExperienceMatch,
    /// 0 – 10, one decimal
    pub text_similarity: f64,
    pub job_keywords: Vec<String>,
    pub feedback: Vec<String>,
    pub recommendation: Recommendation,
}
