use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Carried across crate boundaries and mapped to HTTP statuses by the API
/// layer. Variants mirror the error classes of the service contract:
/// missing entities, rejected input, and policy violations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input was rejected before any write took place.
    #[error("{0}")]
    Validation(String),

    /// The request conflicts with current state or a configured policy.
    #[error("{0}")]
    Conflict(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}

/// Convenience alias for fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;
