//! Error types for decomposition and fusion

use crate::float_types::Real;
use thiserror::Error;

/// All the ways the dissection engine can reject input or fail to fuse a piece.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DissectionError {
    /// A selector value is outside its domain (non-positive or non-finite `k`,
    /// step index past the last step, unknown piece id).
    #[error("invalid parameter `{name}`: {details}")]
    InvalidParameter {
        /// Which parameter was rejected.
        name: &'static str,
        /// Why it was rejected.
        details: String,
    },

    /// A box handed to the fuser is degenerate (zero or negative extent,
    /// non-finite coordinate) or the box list is empty.
    #[error("invalid geometry: {details}")]
    InvalidGeometry {
        /// Description of the degeneracy.
        details: String,
    },

    /// The boolean backend produced a result that cannot stand in for the piece.
    #[error("fusion failure: {details}")]
    FusionFailure {
        /// Description of the failure.
        details: String,
    },
}

impl DissectionError {
    pub(crate) fn invalid_scale(k: Real) -> Self {
        DissectionError::InvalidParameter {
            name: "k",
            details: format!("scale must be positive and finite, got {k}"),
        }
    }
}

/// Result type for dissection operations.
pub type Result<T> = std::result::Result<T, DissectionError>;
