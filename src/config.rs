use crate::mounts::KV_MOUNT_TYPE;
use crate::walker::DEFAULT_MAX_DEPTH;

const MOUNT_TYPE_ENV: &str = "KV_INVENTORY_MOUNT_TYPE";
const MAX_DEPTH_ENV: &str = "KV_INVENTORY_MAX_DEPTH";

/// What to inventory and how deep to go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub mount_type: String,
    pub max_depth: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            mount_type: KV_MOUNT_TYPE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl InventoryConfig {
    /// Defaults overridden by `KV_INVENTORY_MOUNT_TYPE` and `KV_INVENTORY_MAX_DEPTH`.
    /// An unparsable depth is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(mount_type) = lookup(MOUNT_TYPE_ENV).filter(|v| !v.trim().is_empty()) {
            config.mount_type = mount_type;
        }

        if let Some(raw) = lookup(MAX_DEPTH_ENV) {
            match raw.trim().parse() {
                Ok(max_depth) => config.max_depth = max_depth,
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", MAX_DEPTH_ENV, raw, e),
            }
        }

        config
    }

    pub fn mount_type(mut self, mount_type: impl Into<String>) -> Self {
        self.mount_type = mount_type.into();
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
