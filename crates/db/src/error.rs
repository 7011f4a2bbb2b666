use proxyhub_core::types::DbId;

/// Failure of a single repository operation.
///
/// A missing row is [`RepoError::NotFound`]; anything the driver reports is
/// [`RepoError::Persistence`].
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("proxy client {id} not found")]
    NotFound { id: DbId },

    #[error("failed to {operation}: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl RepoError {
    /// Wrap a driver error with the operation that produced it.
    pub fn persistence(operation: &'static str, source: sqlx::Error) -> Self {
        RepoError::Persistence { operation, source }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
