use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault not detected: VAULT_ADDR not set")]
    VaultNotDetected,

    #[error("Invalid Vault address: {0}")]
    InvalidAddress(String),

    #[error("Vault token not found: set VAULT_TOKEN or log in to create ~/.vault-token")]
    TokenNotFound,

    #[error("Vault client error ({status}): {message}")]
    ClientError { status: u16, message: String },

    #[error("Vault request error: {0}")]
    RequestError(String),

    #[error("Invalid Vault response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),
}

impl VaultError {
    /// HTTP status returned by Vault, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
