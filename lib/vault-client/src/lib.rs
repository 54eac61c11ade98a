//! vault-client - Rust client for HashiCorp Vault
//!
//! Resolves the token in this order:
//! 1. explicit builder value or VAULT_TOKEN → static token
//! 2. explicit token file or ~/.vault-token → token written by `vault login`

mod auth;
mod client;
mod error;
mod models;

pub use auth::{AuthMethod, StaticTokenAuth, TokenFileAuth};
pub use client::{VaultClient, VaultClientBuilder, MOUNTS_PATH};
pub use error::VaultError;
pub use models::{ListResponse, MountInfo, ReadResponse};
