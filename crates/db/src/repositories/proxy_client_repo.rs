//! PostgreSQL repository for the `proxy_clients` table.

use async_trait::async_trait;
use proxyhub_core::types::DbId;
use sqlx::PgPool;

use crate::error::{RepoError, RepoResult};
use crate::models::proxy_client::{CreateProxyClient, ProxyClient, UpdateProxyClient};
use crate::repositories::ProxyClientRepository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, os, download_link, created_at, updated_at";

/// Provides CRUD operations for proxy clients over a connection pool.
#[derive(Clone)]
pub struct PgProxyClientRepo {
    pool: PgPool,
}

impl PgProxyClientRepo {
    pub fn new(pool: PgPool) -> Self {
        tracing::debug!("Initializing PgProxyClientRepo");
        Self { pool }
    }
}

#[async_trait]
impl ProxyClientRepository for PgProxyClientRepo {
    async fn create(&self, input: &CreateProxyClient) -> RepoResult<ProxyClient> {
        tracing::debug!(title = %input.title, os = %input.os, "Inserting proxy client");
        let query = format!(
            "INSERT INTO proxy_clients (title, os, download_link, created_at, updated_at) \
             VALUES ($1, $2, $3, NOW(), NOW()) \
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, ProxyClient>(&query)
            .bind(&input.title)
            .bind(&input.os)
            .bind(&input.download_link)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::persistence("insert proxy client", e))?;
        tracing::debug!(id = client.id, "Inserted proxy client");
        Ok(client)
    }

    async fn get_all(&self) -> RepoResult<Vec<ProxyClient>> {
        let query = format!("SELECT {COLUMNS} FROM proxy_clients");
        let clients = sqlx::query_as::<_, ProxyClient>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::persistence("fetch proxy clients", e))?;
        tracing::debug!(count = clients.len(), "Fetched proxy clients");
        Ok(clients)
    }

    async fn get_by_id(&self, id: DbId) -> RepoResult<ProxyClient> {
        let query = format!("SELECT {COLUMNS} FROM proxy_clients WHERE id = $1");
        sqlx::query_as::<_, ProxyClient>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::persistence("fetch proxy client by id", e))?
            .ok_or(RepoError::NotFound { id })
    }

    async fn update(&self, id: DbId, input: &UpdateProxyClient) -> RepoResult<ProxyClient> {
        tracing::debug!(id, "Updating proxy client");
        let query = format!(
            "UPDATE proxy_clients SET \
                title = $1, \
                os = $2, \
                download_link = $3, \
                updated_at = NOW() \
             WHERE id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProxyClient>(&query)
            .bind(&input.title)
            .bind(&input.os)
            .bind(&input.download_link)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::persistence("update proxy client", e))?
            .ok_or(RepoError::NotFound { id })
    }

    async fn delete(&self, id: DbId) -> RepoResult<()> {
        tracing::debug!(id, "Deleting proxy client");
        let result = sqlx::query("DELETE FROM proxy_clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::persistence("delete proxy client", e))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound { id });
        }
        Ok(())
    }

    async fn health_check(&self) -> RepoResult<()> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| RepoError::persistence("reach database", e))
    }
}
