use std::collections::BTreeMap;

use async_trait::async_trait;
use vault_client::{ListResponse, MountInfo, ReadResponse, VaultClient, VaultError};

/// What the inventory needs from a secret store.
///
/// Paths are full request targets such as `/secret/metadata/app/`.
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Keys directly under `path`
    async fn list(&self, path: &str) -> Result<ListResponse, VaultError>;

    /// Whether anything is stored at `path`
    async fn read(&self, path: &str) -> Result<ReadResponse, VaultError>;

    /// All mounted engines keyed by mount path
    async fn mounts(&self) -> Result<BTreeMap<String, MountInfo>, VaultError>;
}

#[async_trait]
impl SecretBackend for VaultClient {
    async fn list(&self, path: &str) -> Result<ListResponse, VaultError> {
        VaultClient::list(self, path).await
    }

    async fn read(&self, path: &str) -> Result<ReadResponse, VaultError> {
        VaultClient::read(self, path).await
    }

    async fn mounts(&self) -> Result<BTreeMap<String, MountInfo>, VaultError> {
        self.list_mounts().await
    }
}
