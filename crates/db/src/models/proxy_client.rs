//! Proxy client row model and DTOs.

use proxyhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `proxy_clients` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ProxyClient {
    pub id: DbId,
    pub title: String,
    pub os: String,
    pub download_link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a proxy client. The store assigns id and timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProxyClient {
    pub title: String,
    pub os: String,
    pub download_link: String,
}

/// DTO for replacing every mutable field of an existing proxy client.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProxyClient {
    pub title: String,
    pub os: String,
    pub download_link: String,
}
