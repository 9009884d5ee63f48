use thiserror::Error;

pub type PlanningResult<T> = Result<T, PlanningError>;

/// Failure of a production suggestion run.
///
/// An empty catalog is not an error: it yields an empty plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// The catalog read from the store is internally invalid (dangling
    /// references, negative stock, non-positive requirement, ...). The run is
    /// aborted; nothing is repaired or partially computed.
    #[error("data inconsistency: {0}")]
    DataInconsistency(String),

    /// The catalog store could not be read.
    #[error("catalog source failed: {0}")]
    Source(String),
}

impl PlanningError {
    pub fn inconsistency(msg: impl Into<String>) -> Self {
        Self::DataInconsistency(msg.into())
    }

    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}
