use super::AuthMethod;
use crate::VaultError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const TOKEN_FILE_NAME: &str = ".vault-token";

/// Token stored on disk by `vault login`
pub struct TokenFileAuth {
    pub path: PathBuf,
}

impl TokenFileAuth {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.vault-token`, if a home directory can be determined
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(TOKEN_FILE_NAME))
    }

    async fn read_token(path: &Path) -> Result<String, VaultError> {
        let token = tokio::fs::read_to_string(path)
            .await
            .map(|s| s.trim().to_string())
            .map_err(|e| {
                VaultError::AuthError(format!(
                    "Failed to read token from {}: {}",
                    path.display(),
                    e
                ))
            })?;

        if token.is_empty() {
            return Err(VaultError::AuthError(format!(
                "Token file {} is empty",
                path.display()
            )));
        }

        Ok(token)
    }
}

#[async_trait]
impl AuthMethod for TokenFileAuth {
    async fn authenticate(&self, _base_url: &str) -> Result<String, VaultError> {
        tracing::debug!("Reading Vault token from {}", self.path.display());
        Self::read_token(&self.path).await
    }
}
