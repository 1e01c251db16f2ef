//! Opaque credential bundles for platform adapters
//!
//! The credentials file is TOML with one table per platform:
//!
//! ```toml
//! [hackerone]
//! username = "hunter"
//! token = "..."
//!
//! [bugcrowd]
//! email = "hunter@example.com"
//! password = "..."
//! ```
//!
//! The core never interprets the key-value pairs; each adapter picks the
//! keys it needs and reports a missing key as an auth failure.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Key-value credentials for one platform
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialBundle(BTreeMap<String, String>);

impl CredentialBundle {
    pub fn new(pairs: BTreeMap<String, String>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// All platform credential bundles from one credentials file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials(BTreeMap<String, CredentialBundle>);

impl Credentials {
    /// Load credentials from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read credentials file '{}': {}", path.display(), e))?;
        toml::from_str(&raw)
            .map_err(|e| format!("Invalid credentials file '{}': {}", path.display(), e))
    }

    /// Bundle for one platform; an absent table yields an empty bundle
    pub fn bundle(&self, platform: &str) -> CredentialBundle {
        self.0.get(platform).cloned().unwrap_or_default()
    }
}
