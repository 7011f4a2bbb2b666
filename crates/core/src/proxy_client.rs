//! Proxy client domain rules.
//!
//! A proxy client is a downloadable VPN application entry. This module owns
//! the supported operating system set, the internal transfer object passed
//! between the HTTP and use-case layers, and the field checks applied before
//! anything reaches the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Entity name used in not-found errors.
pub const ENTITY_NAME: &str = "ProxyClient";

// ---------------------------------------------------------------------------
// ClientOs
// ---------------------------------------------------------------------------

/// Target operating system of a proxy client build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientOs {
    Windows,
    Macos,
    Linux,
    Android,
    Ios,
}

impl ClientOs {
    /// Every supported value, in display order.
    pub const ALL: [ClientOs; 5] = [
        ClientOs::Windows,
        ClientOs::Macos,
        ClientOs::Linux,
        ClientOs::Android,
        ClientOs::Ios,
    ];

    /// String representation for database storage and the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientOs::Windows => "windows",
            ClientOs::Macos => "macos",
            ClientOs::Linux => "linux",
            ClientOs::Android => "android",
            ClientOs::Ios => "ios",
        }
    }
}

impl fmt::Display for ClientOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientOs {
    type Err = CoreError;

    /// Exact, case-sensitive match against [`ClientOs::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientOs::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "os must be one of {}, got '{s}'",
                    supported_os_list()
                ))
            })
    }
}

/// Comma-separated list of accepted `os` values, for error messages.
pub fn supported_os_list() -> String {
    ClientOs::ALL
        .iter()
        .map(ClientOs::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Transfer object
// ---------------------------------------------------------------------------

/// Internal transfer object for a proxy client.
///
/// Decouples the use-case layer from both the persistence row and the wire
/// shapes. Before persistence `id` is `0` and both timestamps are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProxyClientDto {
    pub id: DbId,
    pub title: String,
    pub os: String,
    pub download_link: String,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl ProxyClientDto {
    /// Build an unsaved DTO from the three client-settable fields.
    pub fn new(
        title: impl Into<String>,
        os: impl Into<String>,
        download_link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            os: os.into(),
            download_link: download_link.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject a blank required field.
pub fn validate_required(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Check the three client-settable fields of a proxy client.
///
/// URL syntax is checked at the HTTP boundary; here the link only has to be
/// present.
pub fn validate_fields(dto: &ProxyClientDto) -> Result<(), CoreError> {
    validate_required(&dto.title, "title")?;
    validate_required(&dto.os, "os")?;
    validate_required(&dto.download_link, "download_link")?;
    dto.os.parse::<ClientOs>()?;
    Ok(())
}

/// Reject a zero or negative id.
pub fn validate_id(id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "id is required and must be positive, got {id}"
        )));
    }
    Ok(())
}
