use thiserror::Error;
use tracing::instrument;

use crate::matching::criteria::{CriteriaError, ScoringCriteria};
use crate::store::{InMemoryStore, StoreError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaStoreError {
    #[error(transparent)]
    Invalid(#[from] CriteriaError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InMemoryStore {
    /// Create or update a criteria row. Validation happens here, at save
    /// time: a weight set that does not sum to 100 is rejected and nothing
    /// is persisted. Marking a row default clears the previous default in
    /// the same write so at most one default exists at any point.
    #[instrument(skip(self, criteria), fields(criteria_id = %criteria.id))]
    pub fn save_criteria(
        &self,
        criteria: ScoringCriteria,
    ) -> Result<ScoringCriteria, CriteriaStoreError> {
        criteria.validate()?;

        let mut table = self.criteria.write().map_err(|_| StoreError::Poisoned)?;
        if criteria.is_default {
            for row in table.iter_mut() {
                row.is_default = false;
            }
        }
        if let Some(existing) = table.iter_mut().find(|row| row.id == criteria.id) {
            *existing = criteria.clone();
        } else {
            table.push(criteria.clone());
        }
        Ok(criteria)
    }

    pub fn get_criteria(&self, id: &str) -> Result<Option<ScoringCriteria>, StoreError> {
        let table = self.criteria.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.iter().find(|row| row.id == id).cloned())
    }

    /// The criteria marked default, if any. The ranking engine falls back to
    /// `ScoringCriteria::system_default()` when this is `None`.
    pub fn default_criteria(&self) -> Result<Option<ScoringCriteria>, StoreError> {
        let table = self.criteria.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.iter().find(|row| row.is_default).cloned())
    }

    pub fn delete_criteria(&self, id: &str) -> Result<bool, StoreError> {
        let mut table = self.criteria.write().map_err(|_| StoreError::Poisoned)?;
        let before = table.len();
        table.retain(|row| row.id != id);
        Ok(table.len() < before)
    }
}
