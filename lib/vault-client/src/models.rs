use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A secrets engine mounted at some path prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountInfo {
    #[serde(rename = "type")]
    pub mount_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Option<HashMap<String, String>>,
}

impl MountInfo {
    pub fn new(mount_type: impl Into<String>) -> Self {
        Self {
            mount_type: mount_type.into(),
            description: String::new(),
            options: None,
        }
    }
}

/// Outcome of listing one directory level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListResponse {
    /// Keys in the order Vault returned them. Never empty.
    Keys(Vec<String>),
    /// The path exists but has no keys under it
    Empty,
    /// Nothing at this path (404 or no content)
    Absent,
}

impl ListResponse {
    pub fn from_keys(keys: Vec<String>) -> Self {
        if keys.is_empty() {
            Self::Empty
        } else {
            Self::Keys(keys)
        }
    }

    pub fn into_keys(self) -> Vec<String> {
        match self {
            Self::Keys(keys) => keys,
            Self::Empty | Self::Absent => Vec::new(),
        }
    }
}

/// Outcome of a read. Deliberately carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadResponse {
    Present,
    /// Vault answered but the `data` section was null or empty
    Empty,
    Absent,
}

impl ReadResponse {
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}
