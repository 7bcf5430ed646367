use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("scoring weights must sum to exactly 100, got {0}")]
    WeightSum(u32),
    #[error("scoring criteria not found: {0}")]
    NotFound(String),
    #[error("scoring criteria is inactive: {0}")]
    Inactive(String),
}

/// A named, persisted weighting configuration for the four scoring
/// dimensions. Weights are percentages and must sum to exactly 100;
/// violating that is a save-time validation failure, never a runtime
/// failure during scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringCriteria {
    pub id: String,
    pub name: String,
    pub skill_weight: u8,
    pub experience_weight: u8,
    pub education_weight: u8,
    pub location_weight: u8,
    pub is_default: bool,
    pub is_active: bool,
}

impl ScoringCriteria {
    /// The built-in fallback used when no persisted criteria is marked
    /// default: 40/30/20/10. An explicit constant, not hidden state.
    pub fn system_default() -> Self {
        Self {
            id: "system-default".to_string(),
            name: "System Default".to_string(),
            skill_weight: 40,
            experience_weight: 30,
            education_weight: 20,
            location_weight: 10,
            is_default: true,
            is_active: true,
        }
    }

    pub fn weight_sum(&self) -> u32 {
        self.skill_weight as u32
            + self.experience_weight as u32
            + self.education_weight as u32
            + self.location_weight as u32
    }

    pub fn validate(&self) -> Result<(), CriteriaError> {
        let sum = self.weight_sum();
        if sum != 100 {
            return Err(CriteriaError::WeightSum(sum));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_default_weights_sum_to_hundred() {
        let criteria = ScoringCriteria::system_default();
        assert_eq!(criteria.weight_sum(), 100);
        assert!(criteria.validate().is_ok());
        assert_eq!(criteria.skill_weight, 40);
        assert_eq!(criteria.location_weight, 10);
    }

    #[test]
    fn invalid_sum_is_rejected() {
        let mut criteria = ScoringCriteria::system_default();
        criteria.skill_weight = 50;
        assert_eq!(criteria.validate(), Err(CriteriaError::WeightSum(110)));
    }

    #[test]
    fn zero_weight_dimensions_are_allowed() {
        let criteria = ScoringCriteria {
            id: "skills-only".into(),
            name: "Skills Only".into(),
            skill_weight: 100,
            experience_weight: 0,
            education_weight: 0,
            location_weight: 0,
            is_default: false,
            is_active: true,
        };
        assert!(criteria.validate().is_ok());
    }
}
