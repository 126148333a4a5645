//! Shared test utilities
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

mod mock_runner;

pub use mock_runner::MockCommandRunner;

use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

/// A server.json value that passes validation
pub fn manifest_json() -> serde_json::Value {
    json!({
        "$schema": "https://static.modelcontextprotocol.io/schemas/2025-07-09/server.schema.json",
        "name": "io.github.gitguardian/gg-mcp",
        "description": "GitGuardian security scanning for MCP clients",
        "version": "1.0.0",
        "packages": [
            {
                "registryType": "pypi",
                "identifier": "gg-mcp",
                "version": "1.0.0"
            }
        ]
    })
}

/// Throwaway project root holding a valid server.json
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    /// Create a project root with a valid manifest
    pub fn new() -> Self {
        let project = Self::empty();
        project.write_manifest(&manifest_json());
        project
    }

    /// Create a project root with no manifest
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write (or replace) server.json with the given value
    pub fn write_manifest(&self, value: &serde_json::Value) {
        std::fs::write(
            self.root().join("server.json"),
            serde_json::to_string_pretty(value).unwrap(),
        )
        .unwrap();
    }

    /// Project root path
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory of stub executables for PATH-based integration tests
#[cfg(unix)]
pub struct StubBin {
    dir: TempDir,
}

#[cfg(unix)]
impl StubBin {
    /// Create an empty stub directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Add a stub executable that runs the given shell body
    pub fn add(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    /// Add a file without the executable bit; PATH lookup must skip it
    pub fn add_non_executable(&self, name: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o644);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    /// PATH value that resolves stubs first
    pub fn path_env(&self) -> String {
        format!(
            "{}:{}",
            self.dir.path().display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }

    /// Stub directory path
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(unix)]
impl Default for StubBin {
    fn default() -> Self {
        Self::new()
    }
}
