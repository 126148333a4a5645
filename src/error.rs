//! Error types for gg-mcp.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from client construction and release tooling
#[derive(Error, Debug)]
pub enum Error {
    /// `GITGUARDIAN_AUTH_METHOD` named a method we don't support
    #[error("Unsupported authentication method: {0}. Supported methods: 'token', 'web'")]
    UnsupportedAuthMethod(String),

    /// Token authentication selected without a key in the environment
    #[error("GITGUARDIAN_API_KEY environment variable must be set for token authentication")]
    MissingApiKey,

    /// GitGuardian client construction failed
    #[error("GitGuardian client error: {0}")]
    Client(String),

    /// `server.json` is missing, malformed, or incomplete
    #[error("manifest error: {0}")]
    Manifest(String),

    /// A required external tool is not on PATH
    #[error("'{tool}' is not installed. {hint}")]
    ToolNotFound {
        /// Program name that was looked up
        tool: String,
        /// How the operator can install it
        hint: String,
    },

    /// An external command exited non-zero or could not be started
    #[error("{0}")]
    CommandFailed(String),

    /// No upload credential after environment lookup and prompting
    #[error("no {0} token provided")]
    MissingToken(String),

    /// Local configuration problems (project root, flags)
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected local failures (prompt I/O and the like)
    #[error("internal error: {0}")]
    Internal(String),
}
