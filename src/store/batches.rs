use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::run_id;
use crate::store::{InMemoryStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Pending,
    Processing,
    Completed,
    Partial,
    Failed,
}

impl BatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BatchStatus::Pending => "pending",
            BatchStatus::Processing => "processing",
            BatchStatus::Completed => "completed",
            BatchStatus::Partial => "partial",
            BatchStatus::Failed => "failed",
        }
    }
}

/// One row per ranking invocation, with partial-failure bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingBatch {
    pub id: String,
    pub job_id: i64,
    pub criteria_id: String,
    pub total_candidates: u32,
    pub ranked_count: u32,
    pub failed_count: u32,
    pub status: BatchStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
    pub error_message: Option<String>,
    pub initiator: Option<String>,
    pub run_id: String,
}

impl RankingBatch {
    pub fn new(
        job_id: i64,
        criteria_id: &str,
        total_candidates: u32,
        initiator: Option<&str>,
    ) -> Self {
        Self {
            id: run_id::generate(),
            job_id,
            criteria_id: criteria_id.to_string(),
            total_candidates,
            ranked_count: 0,
            failed_count: 0,
            status: BatchStatus::Pending,
            started_at: Utc::now(),
            completed_at: None,
            duration_seconds: None,
            error_message: None,
            initiator: initiator.map(str::to_string),
            run_id: run_id::get().to_string(),
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_candidates == 0 {
            0.0
        } else {
            self.ranked_count as f64 / self.total_candidates as f64
        }
    }

    /// Stamp completion time and duration; the caller sets the final status.
    pub fn finish(&mut self, status: BatchStatus) {
        let now = Utc::now();
        self.duration_seconds =
            Some((now - self.started_at).num_milliseconds() as f64 / 1000.0);
        self.completed_at = Some(now);
        self.status = status;
    }
}

impl InMemoryStore {
    #[instrument(skip(self, batch), fields(batch_id = %batch.id, job_id = batch.job_id))]
    pub fn insert_batch(&self, batch: RankingBatch) -> Result<(), StoreError> {
        let mut batches = self.batches.write().map_err(|_| StoreError::Poisoned)?;
        batches.insert(batch.id.clone(), batch);
        Ok(())
    }

    /// Replace a previously inserted batch row atomically.
    #[instrument(skip(self, batch), fields(batch_id = %batch.id, status = batch.status.as_str()))]
    pub fn update_batch(&self, batch: RankingBatch) -> Result<(), StoreError> {
        let mut batches = self.batches.write().map_err(|_| StoreError::Poisoned)?;
        if !batches.contains_key(&batch.id) {
            return Err(StoreError::BatchNotFound(batch.id));
        }
        batches.insert(batch.id.clone(), batch);
        Ok(())
    }

    pub fn get_batch(&self, batch_id: &str) -> Result<Option<RankingBatch>, StoreError> {
        let batches = self.batches.read().map_err(|_| StoreError::Poisoned)?;
        Ok(batches.get(batch_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_batch_starts_pending() {
        let batch = RankingBatch::new(1, "system-default", 5, Some("hr-17"));
        assert_eq!(batch.status, BatchStatus::Pending);
        assert_eq!(batch.total_candidates, 5);
        assert_eq!(batch.initiator.as_deref(), Some("hr-17"));
        assert!(batch.completed_at.is_none());
        assert_eq!(batch.id.len(), 26);
    }

    #[test]
    fn success_rate_handles_zero_candidates() {
        let mut batch = RankingBatch::new(1, "system-default", 0, None);
        assert_eq!(batch.success_rate(), 0.0);

        batch.total_candidates = 4;
        batch.ranked_count = 3;
        assert_eq!(batch.success_rate(), 0.75);
    }

    #[test]
    fn finish_stamps_completion_and_duration() {
        let mut batch = RankingBatch::new(1, "system-default", 2, None);
        batch.finish(BatchStatus::Completed);
        assert_eq!(batch.status, BatchStatus::Completed);
        assert!(batch.completed_at.is_some());
        assert!(batch.duration_seconds.unwrap() >= 0.0);
    }

    #[test]
    fn update_requires_existing_batch() {
        let store = InMemoryStore::new();
        let batch = RankingBatch::new(1, "system-default", 1, None);
        let missing = store.update_batch(batch.clone());
        assert!(matches!(missing, Err(StoreError::BatchNotFound(_))));

        store.insert_batch(batch.clone()).unwrap();
        let mut updated = batch.clone();
        updated.status = BatchStatus::Processing;
        store.update_batch(updated).unwrap();
        assert_eq!(
            store.get_batch(&batch.id).unwrap().unwrap().status,
            BatchStatus::Processing
        );
    }
}
