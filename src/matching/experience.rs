use serde::{Deserialize, Serialize};

use super::{round2, status_from_score};

/// Signed experience gap classification (candidate years minus required).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    Overqualified,
    Underqualified,
    WellMatched,
}

impl GapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GapStatus::Overqualified => "overqualified",
            GapStatus::Underqualified => "underqualified",
            GapStatus::WellMatched => "well matched",
        }
    }

    pub fn from_gap(gap: f64) -> Self {
        if gap >= 2.0 {
            GapStatus::Overqualified
        } else if gap <= -2.0 {
            GapStatus::Underqualified
        } else {
            GapStatus::WellMatched
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceScore {
    pub score: f64,
    pub candidate_years: f64,
    pub required_years: f64,
    pub gap: f64,
    pub gap_status: GapStatus,
    pub status: &'static str,
    pub details: String,
}

/// Score candidate experience against the job's minimum.
///
/// Entry-level jobs (required = 0) give full credit. Meeting the bar earns
/// up to a 20% over-qualification bonus before capping at 100; falling
/// short is capped at 80 before the ratio penalty, so missing experience
/// weighs more than exceeding it.
pub fn score_experience(required_years: f64, candidate_years: f64) -> ExperienceScore {
    let gap = round2(candidate_years - required_years);
    let gap_status = GapStatus::from_gap(gap);

    let score = if required_years <= 0.0 {
        100.0
    } else if candidate_years >= required_years {
        let ratio = (candidate_years / required_years).min(1.2);
        (ratio * 100.0).min(100.0)
    } else {
        (candidate_years / required_years * 80.0).max(0.0)
    };
    let score = round2(score);

    let details = format!(
        "{:.1} years vs {:.1} required ({})",
        candidate_years,
        required_years,
        gap_status.as_str()
    );

    ExperienceScore {
        status: status_from_score(score),
        score,
        candidate_years,
        required_years,
        gap,
        gap_status,
        details,
    }
}
