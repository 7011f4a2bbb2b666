//! In-process proxy client repository.
//!
//! Keeps rows in a `BTreeMap` behind a lock. Ids are assigned from a
//! monotonically increasing counter and never reused, mirroring BIGSERIAL.
//! Used by the HTTP test-suite and for running the API without PostgreSQL.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use proxyhub_core::types::{DbId, Timestamp};

use crate::error::{RepoError, RepoResult};
use crate::models::proxy_client::{CreateProxyClient, ProxyClient, UpdateProxyClient};
use crate::repositories::ProxyClientRepository;

struct Store {
    rows: BTreeMap<DbId, ProxyClient>,
    next_id: DbId,
    healthy: bool,
}

/// Cheaply cloneable handle; clones share the same rows.
#[derive(Clone)]
pub struct InMemoryProxyClientRepo {
    store: Arc<RwLock<Store>>,
}

impl Default for InMemoryProxyClientRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProxyClientRepo {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                rows: BTreeMap::new(),
                next_id: 1,
                healthy: true,
            })),
        }
    }

    /// Simulate losing (or regaining) the connection to the store.
    ///
    /// While unhealthy every operation fails with
    /// [`RepoError::Persistence`] wrapping `sqlx::Error::PoolClosed`.
    pub fn set_healthy(&self, healthy: bool) {
        self.write().healthy = healthy;
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn ensure_healthy(store: &Store, operation: &'static str) -> RepoResult<()> {
    if store.healthy {
        Ok(())
    } else {
        Err(RepoError::persistence(operation, sqlx::Error::PoolClosed))
    }
}

/// Current time at the store's microsecond resolution.
fn store_now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Current time, nudged forward so it is strictly after `previous`.
fn now_after(previous: Timestamp) -> Timestamp {
    let now = store_now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[async_trait]
impl ProxyClientRepository for InMemoryProxyClientRepo {
    async fn create(&self, input: &CreateProxyClient) -> RepoResult<ProxyClient> {
        let mut store = self.write();
        ensure_healthy(&store, "insert proxy client")?;

        let id = store.next_id;
        store.next_id += 1;
        let now = store_now();
        let client = ProxyClient {
            id,
            title: input.title.clone(),
            os: input.os.clone(),
            download_link: input.download_link.clone(),
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(id, client.clone());
        Ok(client)
    }

    async fn get_all(&self) -> RepoResult<Vec<ProxyClient>> {
        let store = self.read();
        ensure_healthy(&store, "fetch proxy clients")?;
        Ok(store.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: DbId) -> RepoResult<ProxyClient> {
        let store = self.read();
        ensure_healthy(&store, "fetch proxy client by id")?;
        store
            .rows
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound { id })
    }

    async fn update(&self, id: DbId, input: &UpdateProxyClient) -> RepoResult<ProxyClient> {
        let mut store = self.write();
        ensure_healthy(&store, "update proxy client")?;

        let row = store
            .rows
            .get_mut(&id)
            .ok_or(RepoError::NotFound { id })?;
        row.title = input.title.clone();
        row.os = input.os.clone();
        row.download_link = input.download_link.clone();
        row.updated_at = now_after(row.updated_at);
        Ok(row.clone())
    }

    async fn delete(&self, id: DbId) -> RepoResult<()> {
        let mut store = self.write();
        ensure_healthy(&store, "delete proxy client")?;
        store
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound { id })
    }

    async fn health_check(&self) -> RepoResult<()> {
        ensure_healthy(&self.read(), "reach database")
    }
}
