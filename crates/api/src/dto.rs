//! Wire-format request and response types.
//!
//! Inbound bodies carry only client-settable fields; outbound objects carry
//! every field with timestamps rendered as RFC 3339 strings.

use proxyhub_core::proxy_client::{supported_os_list, ClientOs, ProxyClientDto};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /proxy-clients` and `PATCH /clients/{id}`.
///
/// Absent fields decode as empty strings so they are reported as validation
/// failures alongside the other field errors rather than as a decode error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProxyClientRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "validate_client_os"))]
    pub os: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "download_link is required"),
        url(message = "download_link must be a valid URL")
    )]
    pub download_link: String,
}

fn validate_client_os(os: &str) -> Result<(), ValidationError> {
    if os.is_empty() {
        return Err(ValidationError::new("required").with_message("os is required".into()));
    }
    os.parse::<ClientOs>().map(|_| ()).map_err(|_| {
        ValidationError::new("oneof")
            .with_message(format!("os must be one of {}", supported_os_list()).into())
    })
}

/// A proxy client as returned to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyClientResponse {
    pub id: i64,
    pub title: String,
    pub os: String,
    pub download_link: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Optional equality filters for `GET /proxy-clients`.
///
/// Values are compared as strings, so a non-numeric `id` matches nothing
/// instead of being rejected. Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyClientFilter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub os: Option<String>,
}

impl ProxyClientFilter {
    /// Build a filter from raw query pairs.
    ///
    /// The first value of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "id" => &mut filter.id,
                "title" => &mut filter.title,
                "os" => &mut filter.os,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        filter
    }

    /// Whether `client` satisfies every supplied filter.
    pub fn matches(&self, client: &ProxyClientDto) -> bool {
        fn passes(filter: &Option<String>, value: &str) -> bool {
            match filter.as_deref() {
                None | Some("") => true,
                Some(wanted) => wanted == value,
            }
        }

        passes(&self.id, &client.id.to_string())
            && passes(&self.title, &client.title)
            && passes(&self.os, &client.os)
    }
}

/// `{"success": true}` acknowledgement body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
