use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Fixed skill categories. `Other` is reserved and never populated by the
/// keyword extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Web,
    Databases,
    Cloud,
    AiMl,
    SoftSkills,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Programming,
        SkillCategory::Web,
        SkillCategory::Databases,
        SkillCategory::Cloud,
        SkillCategory::AiMl,
        SkillCategory::SoftSkills,
        SkillCategory::Other,
    ];
}

pub type SkillMap = BTreeMap<SkillCategory, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub years: u32,
    /// At most 5 entries.
    pub companies: Vec<String>,
    /// At most 5 entries.
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub university: String,
    pub graduation_year: String,
}

/// Structured record extracted from a resume's text. Built once per upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub basic_info: BasicInfo,
    pub skills: SkillMap,
    pub experience: Experience,
    pub education: Education,
    pub summary: String,
}

impl Default for CandidateProfile {
    fn default() -> Self {
        Self {
            basic_info: BasicInfo::default(),
            skills: SkillCategory::ALL
                .iter()
                .map(|c| (*c, BTreeSet::new()))
                .collect(),
            experience: Experience::default(),
            education: Education::default(),
            summary: String::new(),
        }
    }
}

impl CandidateProfile {
    /// All skills across categories, lowercased and de-duplicated.
    pub fn flattened_skills(&self) -> BTreeSet<String> {
        self.skills
            .values()
            .flat_map(|set| set.iter().map(|s| s.to_lowercase()))
            .collect()
    }
}
