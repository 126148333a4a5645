//! Building and uploading distribution packages to PyPI.

use super::PACKAGE_NAME;
use crate::error::{Error, Result};
use crate::exec::{CommandRequest, CommandRunner};
use std::fmt;
use std::fs;
use std::path::Path;

/// Build tool used for distribution packages.
pub const BUILD_TOOL: &str = "uv";

/// Install hint shown when `uv` is missing.
pub const UV_INSTALL_HINT: &str =
    "Install it from: https://docs.astral.sh/uv/getting-started/installation/";

/// Output directory produced by `uv build`.
pub const DIST_DIR: &str = "dist";

/// Upload target for built distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repository {
    /// The real package index
    PyPi,
    /// The staging index used for release rehearsal
    TestPyPi,
}

impl Repository {
    /// Target selected by the `--test` flag.
    pub fn from_test_flag(test: bool) -> Self {
        if test { Self::TestPyPi } else { Self::PyPi }
    }

    /// Environment variable carrying the upload token for this target.
    pub fn token_var(self) -> &'static str {
        match self {
            Self::PyPi => "PYPI_TOKEN",
            Self::TestPyPi => "TEST_PYPI_TOKEN",
        }
    }

    /// Project page on this target.
    pub fn project_url(self) -> String {
        match self {
            Self::PyPi => format!("https://pypi.org/project/{PACKAGE_NAME}/"),
            Self::TestPyPi => format!("https://test.pypi.org/project/{PACKAGE_NAME}/"),
        }
    }

    /// How to install the published package from this target.
    pub fn install_hint(self) -> String {
        match self {
            Self::PyPi => format!("uvx {PACKAGE_NAME}"),
            Self::TestPyPi => {
                format!("uvx --index-url https://test.pypi.org/simple/ {PACKAGE_NAME}")
            }
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PyPi => write!(f, "PyPI"),
            Self::TestPyPi => write!(f, "TestPyPI"),
        }
    }
}

/// Upload token from the environment; an empty value counts as unset.
pub fn token_from_env(repository: Repository) -> Option<String> {
    token_from_lookup(repository, |name| std::env::var(name).ok())
}

/// Lookup-injected variant of [`token_from_env`].
pub fn token_from_lookup<F>(repository: Repository, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(repository.token_var()).filter(|token| !token.is_empty())
}

/// Remove a previous `dist/` directory, reporting whether one existed.
pub fn clean_dist(root: &Path) -> Result<bool> {
    let dist = root.join(DIST_DIR);
    if !dist.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(&dist)
        .map_err(|e| Error::Internal(format!("failed to remove {}: {e}", dist.display())))?;
    Ok(true)
}

/// `uv build` in the project root.
pub fn build_request(root: &Path) -> CommandRequest {
    CommandRequest::new(BUILD_TOOL).arg("build").current_dir(root)
}

/// `uv run twine upload`, credentials passed through the child environment
/// only. `TestPyPi` adds `--repository testpypi`; the `dist/*` pattern is
/// expanded by twine itself.
pub fn upload_request(root: &Path, repository: Repository, token: &str) -> CommandRequest {
    let mut request = CommandRequest::new(BUILD_TOOL).args(["run", "twine", "upload"]);
    if repository == Repository::TestPyPi {
        request = request.args(["--repository", "testpypi"]);
    }
    request
        .arg(format!("{DIST_DIR}/*"))
        .env("TWINE_USERNAME", "__token__")
        .env("TWINE_PASSWORD", token)
        .current_dir(root)
}

/// Names of the built artifacts in `dist/`, sorted for stable output.
/// A missing directory lists as empty.
pub fn dist_artifacts(root: &Path) -> Result<Vec<String>> {
    let dist = root.join(DIST_DIR);
    if !dist.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&dist)
        .map_err(|e| Error::Internal(format!("failed to read {}: {e}", dist.display())))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| Error::Internal(format!("failed to read {}: {e}", dist.display())))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Run `uv build`, mapping a non-zero exit to an error carrying the
/// captured stderr.
pub async fn build_distributions(runner: &dyn CommandRunner, root: &Path) -> Result<()> {
    let output = runner.run_captured(&build_request(root)).await?;
    if output.status.success {
        Ok(())
    } else {
        Err(Error::CommandFailed(format!(
            "'{BUILD_TOOL} build' failed:\n{}",
            output.stderr.trim_end()
        )))
    }
}

/// Upload everything in `dist/` to the chosen repository.
pub async fn upload_distributions(
    runner: &dyn CommandRunner,
    root: &Path,
    repository: Repository,
    token: &str,
) -> Result<()> {
    let output = runner
        .run_captured(&upload_request(root, repository, token))
        .await?;
    if output.status.success {
        Ok(())
    } else {
        Err(Error::CommandFailed(format!(
            "'twine upload' failed:\n{}",
            output.stderr.trim_end()
        )))
    }
}
