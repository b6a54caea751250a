//! API key authentication for Keygate.
//!
//! - Key generation and salted hashing
//! - `KeyManager`: issue, validate, list and revoke keys
//! - `ApiKeyGate` and the policy middleware guarding protected routes

mod api_key;
mod manager;
mod middleware;

pub use api_key::*;
pub use manager::*;
pub use middleware::*;
