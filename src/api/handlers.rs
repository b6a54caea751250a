//! HTTP request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::types::*;
use crate::error::KeyResult;
use crate::AppState;

/// Issue an API key for a principal.
///
/// POST /v1/keys
#[utoipa::path(
    post,
    path = "/v1/keys",
    request_body = IssueKeyRequest,
    responses(
        (status = 201, description = "Key issued", body = IssueKeyResponse),
        (status = 400, description = "Invalid name"),
        (status = 500, description = "Internal error")
    ),
    tag = "keys"
)]
pub async fn issue_key(
    State(state): State<AppState>,
    Json(request): Json<IssueKeyRequest>,
) -> KeyResult<(StatusCode, Json<IssueKeyResponse>)> {
    let api_key = state.manager.issue(&request.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(IssueKeyResponse {
            name: request.name,
            api_key,
            warning: "Save this API key now. It won't be shown again!".to_string(),
        }),
    ))
}

/// List issued API keys.
///
/// GET /v1/keys
#[utoipa::path(
    get,
    path = "/v1/keys",
    responses(
        (status = 200, description = "Key records ordered by name", body = ListKeysResponse),
        (status = 500, description = "Internal error")
    ),
    tag = "keys"
)]
pub async fn list_keys(State(state): State<AppState>) -> KeyResult<Json<ListKeysResponse>> {
    let keys = state.manager.list().await?;
    Ok(Json(ListKeysResponse { keys }))
}

/// Revoke the API key issued to a principal.
///
/// DELETE /v1/keys/{name}
#[utoipa::path(
    delete,
    path = "/v1/keys/{name}",
    params(("name" = String, Path, description = "Principal name")),
    responses(
        (status = 204, description = "Key revoked (or never existed)"),
        (status = 500, description = "Internal error")
    ),
    tag = "keys"
)]
pub async fn revoke_key(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> KeyResult<StatusCode> {
    state.manager.revoke(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Data available without an API key.
///
/// GET /api/demo/public
#[utoipa::path(
    get,
    path = "/api/demo/public",
    responses(
        (status = 200, description = "Public data", body = PublicDataResponse)
    ),
    tag = "demo"
)]
pub async fn public_data() -> Json<PublicDataResponse> {
    Json(PublicDataResponse {
        message: "This is public data - no API key required".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        data: vec!["Item 1".into(), "Item 2".into(), "Item 3".into()],
    })
}

/// Data that requires a valid API key.
///
/// GET /api/demo/secure
#[utoipa::path(
    get,
    path = "/api/demo/secure",
    responses(
        (status = 200, description = "Secure data", body = SecureDataResponse),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("api_key" = [])),
    tag = "demo"
)]
pub async fn secure_data() -> Json<SecureDataResponse> {
    Json(SecureDataResponse {
        message: "This is secure data - API key required!".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        secret_data: vec!["Secret 1".into(), "Secret 2".into(), "Secret 3".into()],
        user_id: "demo-user".to_string(),
    })
}

/// Health check endpoint.
///
/// GET /v1/health
#[utoipa::path(
    get,
    path = "/v1/health",
    responses(
        (status = 200, description = "Service and key store status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check database connectivity
    let (status, db_status) = match state.manager.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            tracing::error!(error = %e, "Health check: key store unreachable");
            ("degraded", "error")
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: db_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
