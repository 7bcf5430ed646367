pub mod extraction;
pub mod logging;
pub mod matching;
pub mod run_id;
pub mod store;
pub mod vocabulary;

use serde::{Deserialize, Serialize};

// Commonly used data models for the matching engine. Both types are owned by
// external collaborators (job management, candidate intake) and are read-only
// during a ranking run.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub required_skills: Vec<String>,
    pub min_experience_years: f64,
    pub education_tier: Option<EducationLevel>,
    pub location: Option<String>,
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: i64,
    pub skills: Vec<String>,
    pub total_experience_years: f64,
    pub highest_education: Option<EducationLevel>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub raw_resume_text: Option<String>,
}

/// Ordinal education levels. `None` on a profile maps to ordinal 0, which
/// scores low but never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            EducationLevel::HighSchool => 1,
            EducationLevel::Associate => 2,
            EducationLevel::Bachelor => 3,
            EducationLevel::Master => 4,
            EducationLevel::Phd => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high_school",
            EducationLevel::Associate => "associate",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Phd => "phd",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn education_levels_are_ordered() {
        assert!(EducationLevel::HighSchool < EducationLevel::Associate);
        assert!(EducationLevel::Bachelor < EducationLevel::Master);
        assert!(EducationLevel::Master < EducationLevel::Phd);
        assert_eq!(EducationLevel::Phd.ordinal(), 5);
    }

    #[test]
    fn education_serializes_snake_case() {
        let json = serde_json::to_string(&EducationLevel::HighSchool).unwrap();
        assert_eq!(json, "\"high_school\"");
    }
}
