//! Error types for docseg-region

use crate::component::ComponentId;
use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] docseg_core::Error),

    /// Input that cannot be analysed at all
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The caller's stop signal was observed
    #[error("operation cancelled")]
    Cancelled,

    /// Growing run or component storage failed
    #[error("allocation failure while growing {0} storage")]
    AllocationFailure(&'static str),

    /// Run ownership or bounding box bookkeeping is inconsistent
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The component was merged away or deleted
    #[error("component {0} is no longer live")]
    StaleComponent(ComponentId),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

/// Push onto a vector, reporting allocation failure instead of aborting.
pub(crate) fn try_push<T>(vec: &mut Vec<T>, value: T, what: &'static str) -> RegionResult<()> {
    vec.try_reserve(1)
        .map_err(|_| RegionError::AllocationFailure(what))?;
    vec.push(value);
    Ok(())
}
