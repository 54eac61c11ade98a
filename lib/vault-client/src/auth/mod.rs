mod token;
mod token_file;

pub use token::StaticTokenAuth;
pub use token_file::TokenFileAuth;

use crate::VaultError;
use async_trait::async_trait;

/// Trait for authentication methods
#[async_trait]
pub trait AuthMethod: Send + Sync {
    /// Produce the token sent as `X-Vault-Token`
    async fn authenticate(&self, base_url: &str) -> Result<String, VaultError>;
}
