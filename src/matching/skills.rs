use serde::Serialize;

use super::{round2, status_from_score};
use crate::vocabulary::normalize_skill_set;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillScore {
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub gap_percentage: f64,
    pub status: &'static str,
    pub details: String,
}

/// Score candidate skills against a job's required skills.
///
/// A job with no stated requirements cannot penalize anyone: neutral 50.
/// Otherwise the score is the matched fraction of required skills on a
/// 0–100 scale, and the gap percentage is the missing fraction.
pub fn score_skills(required: &[String], possessed: &[String]) -> SkillScore {
    let required_set = normalize_skill_set(required);

    if required_set.is_empty() {
        return SkillScore {
            score: 50.0,
            matched_skills: vec![],
            missing_skills: vec![],
            gap_percentage: 0.0,
            status: "UNKNOWN",
            details: "job lists no required skills; neutral score".to_string(),
        };
    }

    let possessed_set = normalize_skill_set(possessed);

    let mut matched: Vec<String> = required_set
        .intersection(&possessed_set)
        .cloned()
        .collect();
    matched.sort();

    let mut missing: Vec<String> = required_set
        .difference(&possessed_set)
        .cloned()
        .collect();
    missing.sort();

    let total = required_set.len() as f64;
    let score = round2((matched.len() as f64 / total * 100.0).min(100.0));
    let gap_percentage = round2(missing.len() as f64 / total * 100.0);

    let details = format!(
        "matched {}/{} required skills ({}%){}",
        matched.len(),
        required_set.len(),
        score,
        if missing.is_empty() {
            String::new()
        } else {
            format!("; missing: {}", missing.join(", "))
        }
    );

    SkillScore {
        status: status_from_score(score),
        score,
        matched_skills: matched,
        missing_skills: missing,
        gap_percentage,
        details,
    }
}
