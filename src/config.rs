//! Adapter configuration.
//!
//! The only credential Azion needs is a personal token passed as an
//! `Authorization: Token ...` header. It is read from the process
//! environment and validated before any network call is made.

use crate::error::{Result, SyncError};

/// Environment variable holding the Azion personal token.
pub const TOKEN_ENV_VAR: &str = "AZION_TOKEN";

/// Configuration for an [`AzionClient`](crate::AzionClient).
#[derive(Debug, Clone)]
pub struct AzionConfig {
    /// Azion personal token.
    pub token: String,
}

impl AzionConfig {
    /// Build a configuration from an explicit token.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if the token is empty or
    /// whitespace-only.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SyncError::Configuration {
                detail: "API token must not be empty".to_string(),
            });
        }
        Ok(Self { token })
    }

    /// Read the token from [`TOKEN_ENV_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] if the variable is unset or
    /// empty, before any network call happens.
    pub fn from_env() -> Result<Self> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) => Self::new(token),
            Err(_) => Err(SyncError::Configuration {
                detail: format!("{TOKEN_ENV_VAR} is not set"),
            }),
        }
    }
}
