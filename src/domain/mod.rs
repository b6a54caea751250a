//! Domain types for Keygate.

mod credential;

pub use credential::*;
