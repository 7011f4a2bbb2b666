//! Conversions between wire types and the internal transfer object.

use chrono::SecondsFormat;
use proxyhub_core::proxy_client::ProxyClientDto;
use proxyhub_core::types::Timestamp;

use crate::dto::{ProxyClientRequest, ProxyClientResponse};

/// Build an unsaved transfer object from a request body.
pub fn request_to_dto(req: ProxyClientRequest) -> ProxyClientDto {
    ProxyClientDto::new(req.title, req.os, req.download_link)
}

/// Render a transfer object for the wire.
pub fn dto_to_response(dto: ProxyClientDto) -> ProxyClientResponse {
    ProxyClientResponse {
        id: dto.id,
        title: dto.title,
        os: dto.os,
        download_link: dto.download_link,
        created_at: format_timestamp(dto.created_at),
        updated_at: format_timestamp(dto.updated_at),
    }
}

/// RFC 3339 in UTC with microsecond precision (the store's resolution).
/// An unset timestamp renders as an empty string.
pub fn format_timestamp(ts: Option<Timestamp>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Micros, true))
        .unwrap_or_default()
}
