//! kv-inventory - list every secret path under Vault's KV mounts
//!
//! Only metadata endpoints are touched; secret values are never read.

mod backend;
mod config;
mod error;
mod inventory;
mod models;
mod mounts;
mod walker;

pub mod logging;
pub mod path;

pub use backend::SecretBackend;
pub use config::InventoryConfig;
pub use error::InventoryError;
pub use inventory::{collect_inventory, lookup_secret};
pub use models::{InventoryReport, Listing, SecretEntry, SkipReason, SkippedSubtree};
pub use mounts::{filter_mounts, KV_MOUNT_TYPE};
pub use walker::{TreeWalker, DEFAULT_MAX_DEPTH};
