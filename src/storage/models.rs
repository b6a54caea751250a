//! Database models for Keygate.
//!
//! These are the row types returned by SQLx queries.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::CredentialRecord;
use crate::error::KeyError;

/// Database row for api_keys table.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKeyRow {
    pub id: i64,
    pub name: String,
    pub hash: String,
    pub created_at: String,
}

impl TryFrom<ApiKeyRow> for CredentialRecord {
    type Error = KeyError;

    fn try_from(row: ApiKeyRow) -> Result<Self, Self::Error> {
        Ok(CredentialRecord {
            id: row.id,
            name: row.name,
            hash: row.hash,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| KeyError::Internal(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}
