//! Issued credential records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{KeyError, KeyResult};

/// Maximum length of a principal name.
pub const MAX_NAME_LEN: usize = 200;

/// A stored API key record.
///
/// Only the salted hash of the issued key is kept; the raw key is handed
/// to the caller once at issuance and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CredentialRecord {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// Principal the key was issued to. Unique across live records.
    pub name: String,
    /// Base64 SHA-256 of salt + raw key.
    pub hash: String,
    /// Last issuance time.
    pub created_at: DateTime<Utc>,
}

/// Check that a principal name can be stored.
pub fn validate_name(name: &str) -> KeyResult<()> {
    if name.trim().is_empty() {
        return Err(KeyError::BadRequest("Key name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(KeyError::BadRequest(format!(
            "Key name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("svc1").is_ok());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN)).is_ok());

        assert!(matches!(validate_name(""), Err(KeyError::BadRequest(_))));
        assert!(matches!(validate_name("   "), Err(KeyError::BadRequest(_))));
        assert!(matches!(
            validate_name(&"a".repeat(MAX_NAME_LEN + 1)),
            Err(KeyError::BadRequest(_))
        ));
    }
}
