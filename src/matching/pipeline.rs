use std::cmp::Ordering;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::matching::aggregate::{compute_candidate_score, CandidateScore};
use crate::matching::criteria::{CriteriaError, ScoringCriteria};
use crate::store::{BatchStatus, InMemoryStore, MatchRecord, RankingBatch, StoreError};
use crate::{CandidateProfile, JobPosting};

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("invalid job posting {job_id}: {reason}")]
    InvalidJob { job_id: i64, reason: String },
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates scoring across all candidates for one job: full-replace of
/// the job's prior results, per-candidate failure isolation, deterministic
/// rank assignment, and batch bookkeeping.
pub struct RankingEngine {
    store: Arc<InMemoryStore>,
}

impl RankingEngine {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Rank all candidates for one job and persist the result set.
    ///
    /// A single candidate's scoring failure is logged, counted, and skipped;
    /// the batch continues. Failures outside the per-candidate loop mark the
    /// batch failed and propagate. Holding the job lock for the whole run
    /// keeps the delete-then-insert replace invisible to readers and
    /// serializes concurrent runs against the same job.
    #[instrument(skip(self, job, candidates), fields(job_id = job.id, candidates = candidates.len()))]
    pub fn rank_candidates(
        &self,
        job: &JobPosting,
        candidates: &[CandidateProfile],
        criteria_id: Option<&str>,
        initiator: Option<&str>,
    ) -> Result<RankingBatch, RankingError> {
        if !job.min_experience_years.is_finite() || job.min_experience_years < 0.0 {
            return Err(RankingError::InvalidJob {
                job_id: job.id,
                reason: format!(
                    "min_experience_years must be a non-negative number, got {}",
                    job.min_experience_years
                ),
            });
        }

        let criteria = self.resolve_criteria(criteria_id)?;

        let lock = self.store.job_lock(job.id);
        let _guard = match lock.lock() {
            Ok(guard) => guard,
            Err(_) => return Err(RankingError::Store(StoreError::Poisoned)),
        };

        let mut batch =
            RankingBatch::new(job.id, &criteria.id, candidates.len() as u32, initiator);
        self.store.insert_batch(batch.clone())?;
        batch.status = BatchStatus::Processing;
        self.store.update_batch(batch.clone())?;

        match self.execute(job, candidates, &criteria, &mut batch) {
            Ok(()) => {
                let status = if batch.failed_count == 0 {
                    BatchStatus::Completed
                } else if batch.ranked_count > 0 {
                    BatchStatus::Partial
                } else {
                    batch.error_message =
                        Some("all candidates failed scoring".to_string());
                    BatchStatus::Failed
                };
                batch.finish(status);
                self.store.update_batch(batch.clone())?;
                info!(
                    batch_id = %batch.id,
                    status = batch.status.as_str(),
                    ranked = batch.ranked_count,
                    failed = batch.failed_count,
                    "ranking batch finished"
                );
                Ok(batch)
            }
            Err(err) => {
                batch.error_message = Some(err.to_string());
                batch.finish(BatchStatus::Failed);
                // Bookkeeping is best-effort here; the original error is the
                // one the caller needs to see.
                if let Err(update_err) = self.store.update_batch(batch.clone()) {
                    warn!(batch_id = %batch.id, error = %update_err, "failed to record batch failure");
                }
                Err(err.into())
            }
        }
    }

    fn resolve_criteria(
        &self,
        criteria_id: Option<&str>,
    ) -> Result<ScoringCriteria, RankingError> {
        let criteria = match criteria_id {
            Some(id) => self
                .store
                .get_criteria(id)?
                .ok_or_else(|| CriteriaError::NotFound(id.to_string()))?,
            None => match self.store.default_criteria()? {
                Some(criteria) => criteria,
                None => ScoringCriteria::system_default(),
            },
        };

        if !criteria.is_active {
            return Err(CriteriaError::Inactive(criteria.id).into());
        }
        Ok(criteria)
    }

    fn execute(
        &self,
        job: &JobPosting,
        candidates: &[CandidateProfile],
        criteria: &ScoringCriteria,
        batch: &mut RankingBatch,
    ) -> Result<(), StoreError> {
        let removed = self.store.delete_job_records(job.id)?;
        if removed > 0 {
            info!(job_id = job.id, removed, "cleared prior result set");
        }

        let mut scored: Vec<(&CandidateProfile, CandidateScore)> =
            Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match compute_candidate_score(job, candidate, criteria) {
                Ok(score) => scored.push((candidate, score)),
                Err(err) => {
                    batch.failed_count += 1;
                    warn!(
                        job_id = job.id,
                        candidate_id = candidate.id,
                        error = %err,
                        "candidate excluded from ranking"
                    );
                }
            }
        }

        // Score descending; candidate id ascending breaks ties so rank
        // assignment does not depend on input order.
        scored.sort_by(|a, b| {
            b.1.overall()
                .partial_cmp(&a.1.overall())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        let total = scored.len() as u32;
        let records: Vec<MatchRecord> = scored
            .iter()
            .enumerate()
            .map(|(index, (candidate, score))| {
                MatchRecord::from_score(job, candidate, score, index as u32 + 1, total, &batch.id)
            })
            .collect();

        self.store.insert_match_records(records)?;
        batch.ranked_count = total;
        Ok(())
    }
}
