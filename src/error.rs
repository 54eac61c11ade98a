use thiserror::Error;
use vault_client::VaultError;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Vault connection failed: {0}")]
    Connection(#[source] VaultError),

    #[error("Vault request for {path} failed: {source}")]
    Backend {
        path: String,
        #[source]
        source: VaultError,
    },
}

impl InventoryError {
    pub(crate) fn backend(path: impl Into<String>, source: VaultError) -> Self {
        Self::Backend {
            path: path.into(),
            source,
        }
    }
}
