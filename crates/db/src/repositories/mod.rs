//! Repository layer.
//!
//! [`ProxyClientRepository`] is the seam between the use-case layer and
//! storage. [`PgProxyClientRepo`] backs it with PostgreSQL;
//! [`InMemoryProxyClientRepo`] keeps rows in process for tests and local runs.

use async_trait::async_trait;
use proxyhub_core::types::DbId;

use crate::error::RepoResult;
use crate::models::proxy_client::{CreateProxyClient, ProxyClient, UpdateProxyClient};

pub mod in_memory;
pub mod proxy_client_repo;

pub use in_memory::InMemoryProxyClientRepo;
pub use proxy_client_repo::PgProxyClientRepo;

/// CRUD access to the `proxy_clients` table.
///
/// Every operation issues exactly one statement. Implementations must be
/// `Send + Sync` so they can sit behind an `Arc` in shared handler state.
#[async_trait]
pub trait ProxyClientRepository: Send + Sync {
    /// Insert a row; the store assigns `id`, `created_at`, and `updated_at`.
    async fn create(&self, input: &CreateProxyClient) -> RepoResult<ProxyClient>;

    /// Every row, in no particular order. An empty table yields an empty vec.
    async fn get_all(&self) -> RepoResult<Vec<ProxyClient>>;

    /// The row with the given id, or [`RepoError::NotFound`](crate::error::RepoError::NotFound).
    async fn get_by_id(&self, id: DbId) -> RepoResult<ProxyClient>;

    /// Replace title, os, and download link and refresh `updated_at`.
    ///
    /// Returns the updated row, or `NotFound` when no row has this id.
    async fn update(&self, id: DbId, input: &UpdateProxyClient) -> RepoResult<ProxyClient>;

    /// Hard-delete the row. `NotFound` when nothing was deleted.
    async fn delete(&self, id: DbId) -> RepoResult<()>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> RepoResult<()>;
}
