//! Publishing the server manifest to the MCP registry.

use crate::error::{Error, Result};
use crate::exec::{CommandRequest, CommandRunner};
use std::path::Path;

/// CLI used to authenticate against and publish to the registry.
pub const PUBLISHER_TOOL: &str = "mcp-publisher";

/// Install hint shown when `mcp-publisher` is missing.
pub const PUBLISHER_INSTALL_HINT: &str = "Install it with: brew install mcp-publisher";

/// Home of the registry, linked after a successful publish.
pub const REGISTRY_URL: &str = "https://github.com/modelcontextprotocol/registry";

/// `mcp-publisher --version`.
pub fn version_request() -> CommandRequest {
    CommandRequest::new(PUBLISHER_TOOL).arg("--version")
}

/// `mcp-publisher login github`. Interactive, the tool drives the
/// browser-based device flow itself.
pub fn login_request(root: &Path) -> CommandRequest {
    CommandRequest::new(PUBLISHER_TOOL)
        .args(["login", "github"])
        .current_dir(root)
}

/// `mcp-publisher publish`, reading `server.json` from the project root.
pub fn publish_request(root: &Path) -> CommandRequest {
    CommandRequest::new(PUBLISHER_TOOL)
        .arg("publish")
        .current_dir(root)
}

/// Version string reported by the publisher, if it can be obtained.
/// Probe failures yield `None`, never an error.
pub async fn publisher_version(runner: &dyn CommandRunner) -> Option<String> {
    let output = runner.run_captured(&version_request()).await.ok()?;
    if !output.status.success {
        return None;
    }

    let version = output.stdout.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Run `mcp-publisher publish` with inherited stdio, mapping a non-zero
/// exit to an error carrying the exit status.
pub async fn publish_server(runner: &dyn CommandRunner, root: &Path) -> Result<()> {
    let status = runner.run_interactive(&publish_request(root)).await?;
    if status.success {
        Ok(())
    } else {
        Err(Error::CommandFailed(format!(
            "'{PUBLISHER_TOOL} publish' failed ({status})"
        )))
    }
}
