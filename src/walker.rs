//! Depth-first walk over a KV mount's metadata tree.
//!
//! Vault only lists one folder level per request, so the walker keeps a stack
//! of folder frames and expands each folder in place before moving on to its
//! next sibling. Only the first list call can fail the walk; a folder that
//! cannot be listed later on is recorded in [`Listing::skipped`] and the walk
//! carries on.

use std::vec;

use crate::backend::SecretBackend;
use crate::error::InventoryError;
use crate::models::{Listing, SkipReason, SkippedSubtree};
use crate::path::{is_folder, join, metadata_path};

pub const DEFAULT_MAX_DEPTH: usize = 64;

struct Frame {
    base: String,
    depth: usize,
    keys: vec::IntoIter<String>,
}

pub struct TreeWalker<'a, B: ?Sized> {
    backend: &'a B,
    max_depth: usize,
}

impl<'a, B: SecretBackend + ?Sized> TreeWalker<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Folder levels below the base path the walk may descend into
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// All leaf secret paths under `base_path` in `mount`.
    pub async fn list(&self, mount: &str, base_path: &str) -> Result<Listing, InventoryError> {
        let root_target = metadata_path(mount, base_path);
        let root_keys = self
            .list_level(&root_target)
            .await
            .map_err(|e| InventoryError::backend(root_target, e))?;

        let mut listing = Listing::default();
        let mut stack = vec![Frame {
            base: base_path.to_string(),
            depth: 0,
            keys: root_keys.into_iter(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(key) = frame.keys.next() else {
                stack.pop();
                continue;
            };

            let full_path = join(&frame.base, &key);
            if !is_folder(&key) {
                listing.paths.push(full_path);
                continue;
            }

            let depth = frame.depth + 1;
            if depth > self.max_depth {
                tracing::warn!(
                    mount,
                    path = %full_path,
                    max_depth = self.max_depth,
                    "Folder too deep, not descending"
                );
                listing.skipped.push(SkippedSubtree {
                    mountpoint: mount.to_string(),
                    path: full_path,
                    reason: SkipReason::DepthLimit {
                        max_depth: self.max_depth,
                    },
                });
                continue;
            }

            match self.list_level(&metadata_path(mount, &full_path)).await {
                Ok(keys) => stack.push(Frame {
                    base: full_path,
                    depth,
                    keys: keys.into_iter(),
                }),
                Err(e) => {
                    tracing::warn!(mount, path = %full_path, "Skipping folder: {}", e);
                    listing.skipped.push(SkippedSubtree {
                        mountpoint: mount.to_string(),
                        path: full_path,
                        reason: SkipReason::Request(e),
                    });
                }
            }
        }

        Ok(listing)
    }

    /// Whether a secret exists at `path`. Never looks at its value.
    pub async fn exists(&self, mount: &str, path: &str) -> Result<bool, InventoryError> {
        let target = metadata_path(mount, path);
        self.backend
            .read(&target)
            .await
            .map(|response| response.is_present())
            .map_err(|e| InventoryError::backend(target, e))
    }

    async fn list_level(&self, target: &str) -> Result<Vec<String>, vault_client::VaultError> {
        self.backend.list(target).await.map(|response| response.into_keys())
    }
}
