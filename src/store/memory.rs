use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::matching::criteria::ScoringCriteria;
use crate::store::batches::RankingBatch;
use crate::store::match_records::MatchRecord;

/// In-memory result store. Persistence technology is an implementation
/// choice for this engine; the contract is the operation set, the
/// at-most-one-active invariant per (job, candidate), and per-job
/// exclusivity for the delete-then-insert replace step.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(crate) records: RwLock<Vec<MatchRecord>>,
    pub(crate) batches: RwLock<HashMap<String, RankingBatch>>,
    pub(crate) criteria: RwLock<Vec<ScoringCriteria>>,
    job_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock guarding one job's result set. A ranking run holds this for its
    /// whole duration so a reader never observes a half-replaced result set
    /// and two runs for the same job cannot interleave.
    ///
    /// The registry keeps one entry per distinct job id for the store's
    /// lifetime. An entry is a single `Arc<Mutex<()>>`, so a long-lived
    /// store grows by a few dozen bytes per job ever ranked; eviction would
    /// have to prove no run still holds the `Arc`, which is not worth the
    /// bookkeeping at this scale.
    pub fn job_lock(&self, job_id: i64) -> Arc<Mutex<()>> {
        let mut locks = match self.job_locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.entry(job_id).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_locks_are_per_job() {
        let store = InMemoryStore::new();
        let a1 = store.job_lock(1);
        let a2 = store.job_lock(1);
        let b = store.job_lock(2);

        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
    }

    #[test]
    fn job_lock_serializes_access() {
        let store = InMemoryStore::new();
        let lock = store.job_lock(7);
        let guard = lock.lock().unwrap();
        assert!(store.job_lock(7).try_lock().is_err());
        drop(guard);
        assert!(store.job_lock(7).try_lock().is_ok());
    }
}
