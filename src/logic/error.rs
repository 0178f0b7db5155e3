//! Cluster pipeline errors
//!
//! Validation failures are the caller's fault and carry the offending field.
//! Everything else is a server-side defect.

use thiserror::Error;

pub type ClusterResult<T> = Result<T, ClusterError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Missing, mistyped or out-of-vocabulary input field
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Malformed or inconsistent preprocessing parameters
    #[error("configuration error: {0}")]
    Config(String),

    /// Cluster index outside the catalog
    #[error("cluster {cluster} not found")]
    NotFound { cluster: usize },
}

impl ClusterError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClusterError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field named by a validation failure
    pub fn field(&self) -> Option<&str> {
        match self {
            ClusterError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClusterError::Validation { .. })
    }
}
