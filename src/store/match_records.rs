use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::matching::aggregate::CandidateScore;
use crate::matching::experience::GapStatus;
use crate::run_id;
use crate::store::{InMemoryStore, StoreError};
use crate::{CandidateProfile, JobPosting};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Archived,
    Expired,
}

/// One row per (job, candidate) pair per ranking run. At most one record per
/// pair is active at a time; a new run for a job replaces the job's records
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub id: String,
    pub batch_id: String,
    pub job_id: i64,
    pub candidate_id: i64,
    pub overall_score: f64,
    pub skill_score: Option<f64>,
    pub experience_score: Option<f64>,
    pub education_score: Option<f64>,
    pub location_score: Option<f64>,
    pub text_similarity_score: Option<f64>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skill_gap_percentage: f64,
    pub experience_years: f64,
    pub required_experience_years: f64,
    pub experience_gap: f64,
    pub experience_status: GapStatus,
    pub rank_position: u32,
    pub total_candidates: u32,
    pub status: RecordStatus,
    pub is_shortlisted: bool,
    pub is_rejected: bool,
    pub notes: Option<String>,
    pub score_breakdown: Value,
    pub created_at: DateTime<Utc>,
}

/// HR decision fields. `None` leaves the field untouched; scores are never
/// recomputed by an HR action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HrUpdate {
    pub is_shortlisted: Option<bool>,
    pub is_rejected: Option<bool>,
    pub notes: Option<String>,
}

impl MatchRecord {
    /// Build an active record from one candidate's score. Rank position and
    /// total are assigned by the ranking pipeline after sorting.
    pub fn from_score(
        job: &JobPosting,
        candidate: &CandidateProfile,
        score: &CandidateScore,
        rank_position: u32,
        total_candidates: u32,
        batch_id: &str,
    ) -> Self {
        let experience_gap = candidate.total_experience_years - job.min_experience_years;
        let breakdown = serde_json::to_value(score).unwrap_or(Value::Null);

        let mut record = Self {
            id: run_id::generate(),
            batch_id: batch_id.to_string(),
            job_id: job.id,
            candidate_id: candidate.id,
            overall_score: score.overall(),
            skill_score: None,
            experience_score: None,
            education_score: None,
            location_score: None,
            text_similarity_score: None,
            matched_skills: vec![],
            missing_skills: vec![],
            skill_gap_percentage: 0.0,
            experience_years: candidate.total_experience_years,
            required_experience_years: job.min_experience_years,
            experience_gap,
            experience_status: GapStatus::from_gap(experience_gap),
            rank_position,
            total_candidates,
            status: RecordStatus::Active,
            is_shortlisted: false,
            is_rejected: false,
            notes: None,
            score_breakdown: breakdown,
            created_at: Utc::now(),
        };

        match score {
            CandidateScore::Structured(s) => {
                record.skill_score = Some(s.skill.score);
                record.experience_score = Some(s.experience.score);
                record.education_score = Some(s.education.score);
                record.location_score = Some(s.location.score);
                record.matched_skills = s.skill.matched_skills.clone();
                record.missing_skills = s.skill.missing_skills.clone();
                record.skill_gap_percentage = s.skill.gap_percentage;
                record.experience_gap = s.experience.gap;
                record.experience_status = s.experience.gap_status;
            }
            CandidateScore::TextFallback { overall, .. } => {
                record.text_similarity_score = Some(*overall);
            }
        }

        record
    }
}

impl InMemoryStore {
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn insert_match_records(&self, records: Vec<MatchRecord>) -> Result<(), StoreError> {
        let mut table = self.records.write().map_err(|_| StoreError::Poisoned)?;
        table.extend(records);
        Ok(())
    }

    /// Delete every record for a job regardless of status (the full-replace
    /// step of a ranking run). Returns the number removed.
    #[instrument(skip(self))]
    pub fn delete_job_records(&self, job_id: i64) -> Result<usize, StoreError> {
        let mut table = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let before = table.len();
        table.retain(|record| record.job_id != job_id);
        Ok(before - table.len())
    }

    /// Top-N active matches for a job, ordered by rank position ascending.
    pub fn top_matches(&self, job_id: i64, limit: usize) -> Result<Vec<MatchRecord>, StoreError> {
        let table = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let mut matches: Vec<MatchRecord> = table
            .iter()
            .filter(|r| r.job_id == job_id && r.status == RecordStatus::Active)
            .cloned()
            .collect();
        matches.sort_by_key(|r| r.rank_position);
        matches.truncate(limit);
        Ok(matches)
    }

    /// All of a candidate's records across jobs, best score first.
    pub fn candidate_history(&self, candidate_id: i64) -> Result<Vec<MatchRecord>, StoreError> {
        let table = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let mut history: Vec<MatchRecord> = table
            .iter()
            .filter(|r| r.candidate_id == candidate_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(history)
    }

    /// Apply an HR decision to one record. Only the HR fields change.
    #[instrument(skip(self, update))]
    pub fn update_hr_fields(
        &self,
        record_id: &str,
        update: &HrUpdate,
    ) -> Result<MatchRecord, StoreError> {
        let mut table = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let record = table
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| StoreError::RecordNotFound(record_id.to_string()))?;

        if let Some(shortlisted) = update.is_shortlisted {
            record.is_shortlisted = shortlisted;
        }
        if let Some(rejected) = update.is_rejected {
            record.is_rejected = rejected;
        }
        if let Some(notes) = &update.notes {
            record.notes = Some(notes.clone());
        }
        Ok(record.clone())
    }

    /// Lifecycle transition for one record (archive/expire by external
    /// collaborators; re-ranking deletes instead).
    pub fn set_record_status(
        &self,
        record_id: &str,
        status: RecordStatus,
    ) -> Result<MatchRecord, StoreError> {
        let mut table = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let record = table
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| StoreError::RecordNotFound(record_id.to_string()))?;
        record.status = status;
        Ok(record.clone())
    }

    /// Count of active records for a job (the at-most-one-active invariant
    /// makes this equal to the latest run's ranked count).
    pub fn active_record_count(&self, job_id: i64) -> Result<usize, StoreError> {
        let table = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table
            .iter()
            .filter(|r| r.job_id == job_id && r.status == RecordStatus::Active)
            .count())
    }
}
