//! Proxy client use cases.
//!
//! Sits between the HTTP handlers and the repository: validates input,
//! translates between the transfer object and the row model, and converts
//! repository failures into [`CoreError`] with business context. Held in
//! [`AppState`](crate::state::AppState) as an `Arc<ProxyClientService>`.

use std::sync::Arc;

use proxyhub_core::error::CoreError;
use proxyhub_core::proxy_client::{validate_fields, validate_id, ProxyClientDto, ENTITY_NAME};
use proxyhub_core::types::DbId;
use proxyhub_db::error::RepoError;
use proxyhub_db::models::proxy_client::{CreateProxyClient, ProxyClient, UpdateProxyClient};
use proxyhub_db::repositories::ProxyClientRepository;

/// Orchestrates CRUD operations on proxy clients.
pub struct ProxyClientService {
    repo: Arc<dyn ProxyClientRepository>,
}

impl ProxyClientService {
    pub fn new(repo: Arc<dyn ProxyClientRepository>) -> Self {
        tracing::debug!("Initializing ProxyClientService");
        Self { repo }
    }

    /// Validate and persist a new proxy client.
    ///
    /// The returned DTO carries the store-assigned id and both timestamps.
    pub async fn create(&self, dto: ProxyClientDto) -> Result<ProxyClientDto, CoreError> {
        tracing::info!(title = %dto.title, os = %dto.os, "Creating proxy client");
        validate_fields(&dto).inspect_err(log_failure("create proxy client"))?;

        let input = CreateProxyClient {
            title: dto.title,
            os: dto.os,
            download_link: dto.download_link,
        };
        let created = self
            .repo
            .create(&input)
            .await
            .map_err(|e| translate("failed to create proxy client", e))
            .inspect_err(log_failure("create proxy client"))?;

        tracing::info!(id = created.id, "Created proxy client");
        Ok(entity_to_dto(created))
    }

    /// Every stored proxy client, in no particular order.
    pub async fn list(&self) -> Result<Vec<ProxyClientDto>, CoreError> {
        tracing::info!("Listing proxy clients");
        let clients = self
            .repo
            .get_all()
            .await
            .map_err(|e| translate("failed to get all proxy clients", e))
            .inspect_err(log_failure("list proxy clients"))?;

        tracing::debug!(count = clients.len(), "Fetched proxy clients");
        Ok(clients.into_iter().map(entity_to_dto).collect())
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<ProxyClientDto, CoreError> {
        tracing::info!(id, "Getting proxy client");
        validate_id(id).inspect_err(log_failure("get proxy client"))?;

        let client = self
            .repo
            .get_by_id(id)
            .await
            .map_err(|e| translate("failed to get proxy client by id", e))
            .inspect_err(log_failure("get proxy client"))?;
        Ok(entity_to_dto(client))
    }

    /// Replace title, os, and download link of the client identified by
    /// `dto.id`. Timestamps in `dto` are ignored.
    pub async fn update(&self, dto: ProxyClientDto) -> Result<ProxyClientDto, CoreError> {
        tracing::info!(id = dto.id, "Updating proxy client");
        validate_id(dto.id)
            .and_then(|()| validate_fields(&dto))
            .inspect_err(log_failure("update proxy client"))?;

        let id = dto.id;
        let input = UpdateProxyClient {
            title: dto.title,
            os: dto.os,
            download_link: dto.download_link,
        };
        let updated = self
            .repo
            .update(id, &input)
            .await
            .map_err(|e| translate("failed to update proxy client", e))
            .inspect_err(log_failure("update proxy client"))?;

        tracing::info!(id, "Updated proxy client");
        Ok(entity_to_dto(updated))
    }

    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        tracing::info!(id, "Deleting proxy client");
        validate_id(id).inspect_err(log_failure("delete proxy client"))?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| translate("failed to delete proxy client", e))
            .inspect_err(log_failure("delete proxy client"))?;

        tracing::info!(id, "Deleted proxy client");
        Ok(())
    }
}

fn entity_to_dto(client: ProxyClient) -> ProxyClientDto {
    ProxyClientDto {
        id: client.id,
        title: client.title,
        os: client.os,
        download_link: client.download_link,
        created_at: Some(client.created_at),
        updated_at: Some(client.updated_at),
    }
}

fn translate(context: &str, err: RepoError) -> CoreError {
    match err {
        RepoError::NotFound { id } => CoreError::NotFound {
            entity: ENTITY_NAME,
            id,
        },
        persistence @ RepoError::Persistence { .. } => {
            CoreError::Persistence(format!("{context}: {persistence}"))
        }
    }
}

fn log_failure(operation: &'static str) -> impl Fn(&CoreError) {
    move |err: &CoreError| {
        tracing::error!(error = %err, operation, "Proxy client operation failed");
    }
}
