//! Reading and validating the MCP registry manifest (`server.json`).

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest filename expected at the project root.
pub const MANIFEST_FILE: &str = "server.json";

/// One registry entry in the manifest's package list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageEntry {
    /// Registry this package is published to (e.g. `pypi`)
    #[serde(default)]
    pub registry_type: Option<String>,
    /// Package identifier within that registry
    #[serde(default)]
    pub identifier: Option<String>,
    /// Published package version
    #[serde(default)]
    pub version: Option<String>,
}

/// Read model for `server.json`
///
/// All fields are optional at parse time so validation can name what is
/// missing instead of failing on the first absent key. Unknown fields
/// (`$schema`, repository metadata, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerManifest {
    /// Server name, reverse-DNS style
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable server description
    #[serde(default)]
    pub description: Option<String>,
    /// Server version
    #[serde(default)]
    pub version: Option<String>,
    /// Registry packages this server is distributed as
    #[serde(default)]
    pub packages: Option<Vec<PackageEntry>>,
}

impl ServerManifest {
    /// Path of the manifest inside a project root.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE)
    }

    /// Load the manifest from `root`.
    ///
    /// A missing file and malformed JSON are reported as distinct manifest
    /// errors; the missing-file message carries the `mcp-publisher init`
    /// hint.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path_in(root);

        if !path.exists() {
            return Err(Error::Manifest(format!(
                "{MANIFEST_FILE} not found in {}. Run 'mcp-publisher init' first",
                root.display()
            )));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Manifest(format!("failed to read {}: {e}", path.display())))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Manifest(format!("invalid JSON in {}: {e}", path.display())))
    }

    /// Check that all required fields are present.
    ///
    /// Reports the first missing field of `name`, `description`, `version`,
    /// `packages`, in that order.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("version", self.version.is_some()),
            ("packages", self.packages.is_some()),
        ];

        for (field, present) in required {
            if !present {
                return Err(Error::Manifest(format!("missing required field: {field}")));
            }
        }

        Ok(())
    }

    /// The first package entry, the one summarized for the operator.
    pub fn first_package(&self) -> Option<&PackageEntry> {
        self.packages.as_deref().and_then(<[PackageEntry]>::first)
    }
}
