//! Handlers for the proxy client resource.
//!
//! Each handler decodes and validates its input, calls
//! [`ProxyClientService`](crate::services::ProxyClientService), and encodes
//! the result. Errors map through [`AppError`]: validation → 400,
//! not found → 404, everything else → 500.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dto::{ProxyClientFilter, ProxyClientRequest, ProxyClientResponse, SuccessResponse};
use crate::error::{AppError, AppResult};
use crate::extract::{ClientId, ValidatedJson};
use crate::mapper::{dto_to_response, request_to_dto};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/proxy-clients
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ProxyClientRequest>,
) -> AppResult<(StatusCode, Json<ProxyClientResponse>)> {
    let created = state.proxy_clients.create(request_to_dto(input)).await?;
    Ok((StatusCode::CREATED, Json(dto_to_response(created))))
}

/// GET /api/v1/proxy-clients?id=&title=&os=
///
/// Filters are optional, AND-combined, and applied after loading every row.
/// A repeated key uses its first value. An empty result (no rows, or none
/// matching) is reported as 404.
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<ProxyClientResponse>>> {
    let filter = ProxyClientFilter::from_pairs(pairs);
    let clients: Vec<ProxyClientResponse> = state
        .proxy_clients
        .list()
        .await?
        .into_iter()
        .filter(|client| filter.matches(client))
        .map(dto_to_response)
        .collect();

    if clients.is_empty() {
        return Err(AppError::NotFound("no proxy clients found".to_string()));
    }

    tracing::debug!(count = clients.len(), "Returning filtered proxy clients");
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ClientId(id): ClientId,
) -> AppResult<Json<ProxyClientResponse>> {
    let client = state.proxy_clients.get_by_id(id).await?;
    Ok(Json(dto_to_response(client)))
}

/// PATCH /api/v1/clients/{id}
///
/// Replaces every mutable field; the id in the path wins over anything else.
pub async fn update(
    State(state): State<AppState>,
    ClientId(id): ClientId,
    ValidatedJson(input): ValidatedJson<ProxyClientRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let mut dto = request_to_dto(input);
    dto.id = id;
    state.proxy_clients.update(dto).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete(State(state): State<AppState>, ClientId(id): ClientId) -> AppResult<StatusCode> {
    state.proxy_clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
