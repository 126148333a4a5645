//! External command execution.
//!
//! Release flows drive their tools (`uv`, `twine`, `mcp-publisher`) through
//! the [`CommandRunner`] trait so tests can substitute a recording mock for
//! real subprocesses.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A fully specified invocation of an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// Program to run, resolved against PATH by the runner
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Extra environment for the child only
    pub envs: Vec<(String, String)>,
    /// Working directory; inherited when `None`
    pub cwd: Option<PathBuf>,
}

impl CommandRequest {
    /// Start a request for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Run the command in `dir`.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

// Program plus arguments, the way an operator would type it. Environment
// stays out of the rendering so credentials never hit logs.
impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Whether the command exited successfully
    pub success: bool,
    /// Exit code, when the command exited normally
    pub code: Option<i32>,
}

impl CommandStatus {
    /// A zero exit.
    pub const fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// A non-zero exit with the given code.
    pub const fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit status
    pub status: CommandStatus,
    /// Captured standard output, lossily decoded
    pub stdout: String,
    /// Captured standard error, lossily decoded
    pub stderr: String,
}

/// Runs external tools on behalf of the release flows
///
/// Two run modes mirror how the flows use their tools: `run_interactive`
/// hands the operator's terminal to the child (login prompts, publish
/// output), `run_captured` collects output for reporting.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Locate a program on PATH.
    fn which(&self, program: &str) -> Option<PathBuf>;

    /// Run with stdio inherited from the operator's terminal.
    async fn run_interactive(&self, request: &CommandRequest) -> Result<CommandStatus>;

    /// Run with stdout and stderr captured.
    async fn run_captured(&self, request: &CommandRequest) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real subprocesses
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(request: &CommandRequest) -> Command {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);
        for (key, value) in &request.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &request.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(request: &CommandRequest, e: &std::io::Error) -> Error {
        Error::CommandFailed(format!("failed to run '{}': {e}", request.program))
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    fn which(&self, program: &str) -> Option<PathBuf> {
        let found = which::which(program).ok();
        debug!(program, path = ?found, "PATH lookup");
        found
    }

    async fn run_interactive(&self, request: &CommandRequest) -> Result<CommandStatus> {
        debug!(command = %request, "running command");
        let status = Self::command(request)
            .status()
            .await
            .map_err(|e| Self::spawn_error(request, &e))?;

        debug!(command = %request, code = ?status.code(), "command finished");
        Ok(CommandStatus {
            success: status.success(),
            code: status.code(),
        })
    }

    async fn run_captured(&self, request: &CommandRequest) -> Result<CommandOutput> {
        debug!(command = %request, "running command (captured)");
        let output = Self::command(request)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Self::spawn_error(request, &e))?;

        debug!(command = %request, code = ?output.status.code(), "command finished");
        Ok(CommandOutput {
            status: CommandStatus {
                success: output.status.success(),
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CommandRequest::new("uv")
            .arg("run")
            .args(["twine", "upload"])
            .env("TWINE_USERNAME", "__token__")
            .current_dir(Path::new("/tmp"));

        assert_eq!(request.program, "uv");
        assert_eq!(request.args, vec!["run", "twine", "upload"]);
        assert_eq!(
            request.envs,
            vec![("TWINE_USERNAME".to_string(), "__token__".to_string())]
        );
        assert_eq!(request.cwd.as_deref(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_display_omits_environment() {
        let request = CommandRequest::new("uv")
            .args(["run", "twine", "upload", "dist/*"])
            .env("TWINE_PASSWORD", "secret");

        assert_eq!(request.to_string(), "uv run twine upload dist/*");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CommandStatus::ok().to_string(), "exit code 0");
        assert_eq!(CommandStatus::failed(2).to_string(), "exit code 2");
        let signalled = CommandStatus {
            success: false,
            code: None,
        };
        assert_eq!(signalled.to_string(), "termination by signal");
    }

    #[cfg(unix)]
    #[test]
    fn test_which_finds_shell() {
        let runner = SystemRunner;
        assert!(runner.which("sh").is_some());
        assert!(runner.which("definitely-not-a-real-tool-9991").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_captured_run_collects_output() {
        let runner = SystemRunner;
        let request = CommandRequest::new("sh").args(["-c", "echo hello; echo oops >&2"]);

        let output = tokio_test::block_on(runner.run_captured(&request)).unwrap();

        assert!(output.status.success);
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_captured_run_reports_exit_code() {
        let runner = SystemRunner;
        let request = CommandRequest::new("sh").args(["-c", "exit 3"]);

        let output = tokio_test::block_on(runner.run_captured(&request)).unwrap();

        assert!(!output.status.success);
        assert_eq!(output.status.code, Some(3));
    }

    #[test]
    fn test_spawn_failure_is_command_error() {
        let runner = SystemRunner;
        let request = CommandRequest::new("definitely-not-a-real-tool-9991");

        match tokio_test::block_on(runner.run_captured(&request)) {
            Err(Error::CommandFailed(message)) => {
                assert!(message.contains("failed to run"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }
}
