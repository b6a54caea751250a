//! API key authorization for axum.
//!
//! [`ApiKeyGate`] only ever grants: it either reports a satisfied API key
//! requirement or abstains. Denial is the default of
//! [`require_api_key_policy`], which rejects any request the gate did not grant.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::KeyManager;
use crate::error::KeyResult;

/// Header carrying the raw API key.
pub const API_KEY_HEADER: &str = "ApiKey";

/// Marker inserted into request extensions once the API key requirement is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiKeyGrant;

/// Evaluates the API key requirement for inbound requests.
#[derive(Clone)]
pub struct ApiKeyGate {
    manager: KeyManager,
}

impl ApiKeyGate {
    pub fn new(manager: KeyManager) -> Self {
        Self { manager }
    }

    /// Grant if the request carries a valid key, otherwise abstain.
    ///
    /// A missing, repeated, blank or non-text header abstains without touching the store.
    pub async fn evaluate(&self, headers: &HeaderMap) -> KeyResult<Option<ApiKeyGrant>> {
        let mut values = headers.get_all(API_KEY_HEADER).iter();
        let (Some(value), None) = (values.next(), values.next()) else {
            return Ok(None);
        };

        let Some(key) = value.to_str().ok().filter(|v| !v.trim().is_empty()) else {
            return Ok(None);
        };

        if self.manager.validate(key).await? {
            Ok(Some(ApiKeyGrant))
        } else {
            Ok(None)
        }
    }
}

/// Error response for authorization failures.
#[derive(Debug, Serialize)]
pub struct AuthError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Require the API key policy for the wrapped routes.
///
/// Storage failures during validation surface as server errors rather than denials.
pub async fn require_api_key_policy(
    State(gate): State<ApiKeyGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let decision = gate.evaluate(request.headers()).await;

    match decision {
        Ok(Some(grant)) => {
            request.extensions_mut().insert(grant);
            next.run(request).await
        }
        Ok(None) => AuthError {
            error: "A valid API key is required".to_string(),
            code: "UNAUTHORIZED".to_string(),
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::HeaderValue;

    use crate::auth::KeyHasher;
    use crate::storage::MemoryKeyStore;

    fn gate() -> (ApiKeyGate, KeyManager) {
        let manager = KeyManager::new(Arc::new(MemoryKeyStore::new()), KeyHasher::new("salt"));
        (ApiKeyGate::new(manager.clone()), manager)
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_valid_key_granted() {
        let (gate, manager) = gate();
        let key = manager.issue("svc1").await.unwrap();

        let decision = gate.evaluate(&headers(&key)).await.unwrap();
        assert_eq!(decision, Some(ApiKeyGrant));
    }

    #[tokio::test]
    async fn test_header_name_is_case_insensitive() {
        let (gate, manager) = gate();
        let key = manager.issue("svc1").await.unwrap();

        let mut map = HeaderMap::new();
        map.insert("apikey", HeaderValue::from_str(&key).unwrap());
        assert_eq!(gate.evaluate(&map).await.unwrap(), Some(ApiKeyGrant));
    }

    #[tokio::test]
    async fn test_abstains_without_valid_key() {
        let (gate, manager) = gate();
        let _key = manager.issue("svc1").await.unwrap();

        assert_eq!(gate.evaluate(&HeaderMap::new()).await.unwrap(), None);
        assert_eq!(gate.evaluate(&headers("")).await.unwrap(), None);
        assert_eq!(gate.evaluate(&headers("   ")).await.unwrap(), None);
        assert_eq!(gate.evaluate(&headers("wrong")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_other_headers_ignored() {
        let (gate, manager) = gate();
        let key = manager.issue("svc1").await.unwrap();

        let mut map = HeaderMap::new();
        map.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", key)).unwrap(),
        );
        map.insert("X-API-Key", HeaderValue::from_str(&key).unwrap());
        assert_eq!(gate.evaluate(&map).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_repeated_header_abstains() {
        let (gate, manager) = gate();
        let key = manager.issue("svc1").await.unwrap();

        let mut map = headers(&key);
        map.append(API_KEY_HEADER, HeaderValue::from_static("wrong"));
        assert_eq!(gate.evaluate(&map).await.unwrap(), None);

        let mut map = headers(&key);
        map.append(API_KEY_HEADER, HeaderValue::from_str(&key).unwrap());
        assert_eq!(gate.evaluate(&map).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_revoked_key_abstains() {
        let (gate, manager) = gate();
        let key = manager.issue("svc1").await.unwrap();
        manager.revoke("svc1").await.unwrap();

        assert_eq!(gate.evaluate(&headers(&key)).await.unwrap(), None);
    }
}
