//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::CredentialRecord;

// ==================== Keys ====================

/// Request to issue an API key.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueKeyRequest {
    /// Principal the key is issued to. Re-issuing replaces the previous key.
    pub name: String,
}

/// Response carrying a freshly issued API key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueKeyResponse {
    pub name: String,
    /// The raw API key. Returned only once.
    pub api_key: String,
    pub warning: String,
}

/// Response for listing API keys.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListKeysResponse {
    /// Key records ordered by name.
    pub keys: Vec<CredentialRecord>,
}

// ==================== Demo ====================

/// Payload served without authorization.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicDataResponse {
    pub message: String,
    pub timestamp: String,
    pub data: Vec<String>,
}

/// Payload served only to requests with a valid API key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SecureDataResponse {
    pub message: String,
    pub timestamp: String,
    pub secret_data: Vec<String>,
    pub user_id: String,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub timestamp: String,
}
