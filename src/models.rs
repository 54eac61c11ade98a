use serde::Serialize;
use vault_client::VaultError;

/// One leaf secret: where it lives, never what it holds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SecretEntry {
    pub mountpoint: String,
    pub path: String,
}

impl SecretEntry {
    pub fn new(mountpoint: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            mountpoint: mountpoint.into(),
            path: path.into(),
        }
    }
}

/// Leaf paths found by one walk, plus the sub-trees that could not be listed
#[derive(Debug, Default)]
pub struct Listing {
    pub paths: Vec<String>,
    pub skipped: Vec<SkippedSubtree>,
}

impl Listing {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug)]
pub struct SkippedSubtree {
    pub mountpoint: String,
    /// Mount-relative folder path, empty for the whole mount
    pub path: String,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub enum SkipReason {
    Request(VaultError),
    DepthLimit { max_depth: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(e) => write!(f, "{}", e),
            Self::DepthLimit { max_depth } => write!(f, "deeper than {} folder levels", max_depth),
        }
    }
}

/// Every secret across all inventoried mounts
#[derive(Debug, Default)]
pub struct InventoryReport {
    pub entries: Vec<SecretEntry>,
    pub skipped: Vec<SkippedSubtree>,
}
