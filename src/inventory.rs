use crate::backend::SecretBackend;
use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::models::{InventoryReport, SecretEntry, SkipReason, SkippedSubtree};
use crate::mounts::filter_mounts;
use crate::path::mount_relative;
use crate::walker::TreeWalker;
use vault_client::MOUNTS_PATH;

/// Walk every mount of `config.mount_type` and merge the results.
///
/// Failing to enumerate mounts is fatal. A mount whose root cannot be listed
/// is reported in `skipped` and the remaining mounts are still walked.
pub async fn collect_inventory<B: SecretBackend + ?Sized>(
    backend: &B,
    config: &InventoryConfig,
) -> Result<InventoryReport, InventoryError> {
    let mounts = backend
        .mounts()
        .await
        .map_err(|e| InventoryError::backend(MOUNTS_PATH, e))?;

    let selected = filter_mounts(&mounts, &config.mount_type);
    tracing::debug!(
        total = mounts.len(),
        selected = selected.len(),
        mount_type = %config.mount_type,
        "Filtered mounts"
    );

    let walker = TreeWalker::new(backend).with_max_depth(config.max_depth);
    let mut report = InventoryReport::default();

    for mountpoint in selected.keys() {
        match walker.list(mountpoint, "").await {
            Ok(listing) => {
                tracing::info!(
                    mount = %mountpoint,
                    secrets = listing.paths.len(),
                    complete = listing.is_complete(),
                    "Inventoried mount"
                );
                report.entries.extend(
                    listing
                        .paths
                        .into_iter()
                        .map(|path| SecretEntry::new(mountpoint.as_str(), path)),
                );
                report.skipped.extend(listing.skipped);
            }
            Err(
                InventoryError::Backend { source, .. } | InventoryError::Connection(source),
            ) => {
                tracing::warn!(mount = %mountpoint, "Skipping mount: {}", source);
                report.skipped.push(SkippedSubtree {
                    mountpoint: mountpoint.clone(),
                    path: String::new(),
                    reason: SkipReason::Request(source),
                });
            }
        }
    }

    Ok(report)
}

/// Point lookup: the entry if a secret exists at `path`, its value untouched.
pub async fn lookup_secret<B: SecretBackend + ?Sized>(
    backend: &B,
    mountpoint: &str,
    path: &str,
) -> Result<Option<SecretEntry>, InventoryError> {
    let exists = TreeWalker::new(backend).exists(mountpoint, path).await?;
    Ok(exists.then(|| SecretEntry::new(mountpoint, mount_relative(path))))
}
