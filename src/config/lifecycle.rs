//! Lifecycle engine tuning

use serde::Deserialize;

use crate::domain::complaint::Priority;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleConfig {
    /// Attempts per transition before a lost race becomes an error
    #[serde(default = "default_transition_retries")]
    pub max_transition_retries: u32,

    /// Attempts to settle a cluster on creation
    #[serde(default = "default_cluster_retries")]
    pub max_cluster_retries: u32,

    /// Priority given to every new complaint
    #[serde(default = "default_priority")]
    pub default_priority: String,
}

impl LifecycleConfig {
    pub fn priority(&self) -> Result<Priority, ValidationError> {
        self.default_priority
            .parse()
            .map_err(|_| ValidationError::InvalidPriority(self.default_priority.clone()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=100).contains(&self.max_transition_retries) {
            return Err(ValidationError::InvalidRetryBound("max_transition_retries"));
        }
        if !(1..=100).contains(&self.max_cluster_retries) {
            return Err(ValidationError::InvalidRetryBound("max_cluster_retries"));
        }
        self.priority()?;
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_transition_retries: default_transition_retries(),
            max_cluster_retries: default_cluster_retries(),
            default_priority: default_priority(),
        }
    }
}

fn default_transition_retries() -> u32 {
    5
}

fn default_cluster_retries() -> u32 {
    8
}

fn default_priority() -> String {
    "Low".to_string()
}
