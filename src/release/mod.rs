//! Release building blocks for the gg-mcp distribution.
//!
//! Pure, runner-parameterized pieces of the two publish flows. The
//! `gg-release` binary owns prompts and presentation; everything here is
//! testable against a mock [`crate::exec::CommandRunner`].

pub mod pypi;
pub mod registry;

/// Distribution package name, as published to PyPI.
pub const PACKAGE_NAME: &str = "gg-mcp";
