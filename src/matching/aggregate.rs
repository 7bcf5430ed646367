use serde::Serialize;
use thiserror::Error;

use super::education::{score_education, EducationScore};
use super::experience::{score_experience, ExperienceScore};
use super::fallback::{score_text_similarity, FallbackScore};
use super::location::{score_location, LocationScore};
use super::round2;
use super::skills::{score_skills, SkillScore};
use crate::matching::criteria::ScoringCriteria;
use crate::{CandidateProfile, JobPosting};

/// Failure while scoring a single candidate. Recovered locally by the
/// ranking pipeline: logged, counted, and the candidate is excluded.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("candidate {candidate_id} has invalid experience years: {years}")]
    InvalidExperience { candidate_id: i64, years: f64 },
    #[error("candidate {candidate_id} cannot be scored: no skill list and no resume text")]
    InsufficientData { candidate_id: i64 },
}

/// Full four-dimension score for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredScore {
    pub skill: SkillScore,
    pub experience: ExperienceScore,
    pub education: EducationScore,
    pub location: LocationScore,
    pub overall: f64,
}

/// One candidate's score: either the structured four-dimension blend or the
/// text-similarity fallback. The two paths never mix for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateScore {
    Structured(StructuredScore),
    TextFallback { score: FallbackScore, overall: f64 },
}

impl CandidateScore {
    pub fn overall(&self) -> f64 {
        match self {
            CandidateScore::Structured(s) => s.overall,
            CandidateScore::TextFallback { overall, .. } => *overall,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CandidateScore::TextFallback { .. })
    }
}

fn nonempty(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Score one candidate against one job under the given criteria.
///
/// Structured scoring runs when both sides carry skill lists; the TF-IDF
/// fallback runs when a list is missing and both raw texts are present.
/// A candidate with no skills and no resume text against a job that states
/// requirements cannot be scored.
pub fn compute_candidate_score(
    job: &JobPosting,
    candidate: &CandidateProfile,
    criteria: &ScoringCriteria,
) -> Result<CandidateScore, ScoringError> {
    let years = candidate.total_experience_years;
    if !years.is_finite() || years < 0.0 {
        return Err(ScoringError::InvalidExperience {
            candidate_id: candidate.id,
            years,
        });
    }

    let both_structured = !job.required_skills.is_empty() && !candidate.skills.is_empty();
    if both_structured {
        return Ok(CandidateScore::Structured(structured(job, candidate, criteria)));
    }

    if let (Some(job_text), Some(resume_text)) =
        (nonempty(&job.raw_text), nonempty(&candidate.raw_resume_text))
    {
        let score = score_text_similarity(job_text, resume_text);
        let overall = round2((score.blended * 100.0).clamp(0.0, 100.0));
        return Ok(CandidateScore::TextFallback { score, overall });
    }

    // No text to fall back on. A job with no stated requirements still gets
    // the neutral structured treatment; a candidate with nothing at all to
    // match against stated requirements is a scoring failure.
    if job.required_skills.is_empty() || !candidate.skills.is_empty() {
        return Ok(CandidateScore::Structured(structured(job, candidate, criteria)));
    }

    Err(ScoringError::InsufficientData {
        candidate_id: candidate.id,
    })
}

fn structured(
    job: &JobPosting,
    candidate: &CandidateProfile,
    criteria: &ScoringCriteria,
) -> StructuredScore {
    let skill = score_skills(&job.required_skills, &candidate.skills);
    let experience = score_experience(job.min_experience_years, candidate.total_experience_years);
    let education = score_education(job.education_tier, candidate.highest_education);
    let location = score_location(
        job.location.as_deref(),
        candidate.city.as_deref(),
        candidate.state.as_deref(),
    );

    let overall = skill.score * criteria.skill_weight as f64 / 100.0
        + experience.score * criteria.experience_weight as f64 / 100.0
        + education.score * criteria.education_weight as f64 / 100.0
        + location.score * criteria.location_weight as f64 / 100.0;
    let overall = round2(overall.clamp(0.0, 100.0));

    StructuredScore {
        skill,
        experience,
        education,
        location,
        overall,
    }
}
