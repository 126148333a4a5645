//! Terminal-facing command implementations for `gg-release`

pub mod pypi;
pub mod registry;
pub mod style;

use gg_mcp::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolve the `--path` argument to an absolute project root.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = path.canonicalize().map_err(|e| {
        Error::Config(format!(
            "project path '{}' is not accessible: {e}",
            path.display()
        ))
    })?;

    if !root.is_dir() {
        return Err(Error::Config(format!(
            "project path '{}' is not a directory",
            root.display()
        )));
    }

    Ok(root)
}
