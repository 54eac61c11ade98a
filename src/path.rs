//! Path building for KV metadata requests.
//!
//! Every path sent to Vault or handed back to a caller goes through
//! [`normalize`] first.

pub const SEPARATOR: char = '/';

/// Collapse runs of separators into a single one.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_separator = false;

    for c in path.chars() {
        let is_separator = c == SEPARATOR;
        if !(is_separator && previous_was_separator) {
            out.push(c);
        }
        previous_was_separator = is_separator;
    }

    out
}

/// `/{mount}/metadata/{path}`, normalized.
pub fn metadata_path(mount: &str, path: &str) -> String {
    normalize(&format!("/{}/metadata/{}", mount, path))
}

/// Normalized path without a leading separator, as stored in a `SecretEntry`.
pub fn mount_relative(path: &str) -> String {
    normalize(path).trim_start_matches(SEPARATOR).to_string()
}

/// Mount-relative path of `key` listed under `base`.
pub fn join(base: &str, key: &str) -> String {
    mount_relative(&format!("{}/{}", base, key))
}

/// Keys ending in a separator name a sub-folder, anything else is a leaf.
pub fn is_folder(key: &str) -> bool {
    key.ends_with(SEPARATOR)
}
