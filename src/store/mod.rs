pub mod batches;
pub mod criteria;
pub mod match_records;
pub mod memory;

use thiserror::Error;

pub use batches::{BatchStatus, RankingBatch};
pub use criteria::CriteriaStoreError;
pub use match_records::{HrUpdate, MatchRecord, RecordStatus};
pub use memory::InMemoryStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("match record not found: {0}")]
    RecordNotFound(String),
    #[error("ranking batch not found: {0}")]
    BatchNotFound(String),
    #[error("store lock poisoned")]
    Poisoned,
}
