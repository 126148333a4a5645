//! Client bootstrap and release tooling for the GitGuardian MCP server.
//!
//! The library half selects an authentication mode from the environment and
//! constructs a [`client::GitGuardianClient`] accordingly. The [`release`]
//! module carries the pure pieces of the PyPI and MCP registry publish
//! procedures; terminal interaction lives in the `gg-release` binary.

pub mod auth;
pub mod client;
pub mod error;
pub mod exec;
pub mod manifest;
pub mod release;
