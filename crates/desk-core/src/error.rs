//! Optimizer error types.

use thiserror::Error;

/// Result type alias for optimizer operations.
pub type OptimizeResult<T> = Result<T, OptimizeError>;

/// Why a request was rejected before any scoring took place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("duplicate employee id: {0}")]
    DuplicateEmployee(String),

    #[error("duplicate desk id: {0}")]
    DuplicateDesk(String),

    #[error("occupancy references unknown desk: {0}")]
    UnknownOccupancyDesk(String),

    #[error("request has {employees} employees but no desks")]
    NoDesks { employees: usize },

    #[error("request has {desks} desks but no employees")]
    NoEmployees { desks: usize },
}

/// Errors surfaced by `optimize`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] MalformedReason),

    #[error("infeasible request: {reason}")]
    InfeasibleRequest { reason: String },
}

impl OptimizeError {
    pub fn infeasible(reason: impl Into<String>) -> Self {
        OptimizeError::InfeasibleRequest {
            reason: reason.into(),
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, OptimizeError::InfeasibleRequest { .. })
    }
}
