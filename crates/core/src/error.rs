use crate::types::DbId;

/// Domain-level failure shared by the use-case and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The store rejected or failed a statement for a reason other than
    /// "no matching row".
    #[error("Persistence error: {0}")]
    Persistence(String),
}
