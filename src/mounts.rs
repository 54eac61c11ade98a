use std::collections::BTreeMap;

use vault_client::MountInfo;

/// Engine type Vault reports for key/value mounts
pub const KV_MOUNT_TYPE: &str = "kv";

/// Mounts whose engine type is `wanted_type`, keyed as in `mounts`
pub fn filter_mounts(
    mounts: &BTreeMap<String, MountInfo>,
    wanted_type: &str,
) -> BTreeMap<String, MountInfo> {
    mounts
        .iter()
        .filter(|(_, mount)| mount.mount_type == wanted_type)
        .map(|(path, mount)| (path.clone(), mount.clone()))
        .collect()
}
