use serde::Serialize;

use super::{round2, status_from_score};
use crate::EducationLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationScore {
    pub score: f64,
    pub candidate_level: u8,
    pub required_level: u8,
    pub status: &'static str,
    pub details: String,
}

/// Score candidate education against the job's tier. Jobs that state no
/// tier fall back to bachelor. An unknown candidate education maps to
/// ordinal 0 and scores low rather than erroring.
pub fn score_education(
    required: Option<EducationLevel>,
    candidate: Option<EducationLevel>,
) -> EducationScore {
    let required_level = required.unwrap_or(EducationLevel::Bachelor).ordinal();
    let candidate_level = candidate.map_or(0, EducationLevel::ordinal);

    let ratio = candidate_level as f64 / required_level as f64;
    let score = if candidate_level >= required_level {
        (ratio * 90.0).min(100.0)
    } else {
        (ratio * 70.0).max(0.0)
    };
    let score = round2(score);

    let details = format!(
        "education level {} vs required {}{}",
        candidate
            .map(EducationLevel::as_str)
            .unwrap_or("unknown"),
        required.unwrap_or(EducationLevel::Bachelor).as_str(),
        if required.is_none() { " (default tier)" } else { "" }
    );

    EducationScore {
        status: if candidate.is_none() {
            "UNKNOWN"
        } else {
            status_from_score(score)
        },
        score,
        candidate_level,
        required_level,
        details,
    }
}
