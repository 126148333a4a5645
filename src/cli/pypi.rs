//! Pypi command - build distributions and upload them to PyPI

use crate::cli::style::{CHECK, Stylize, arrow, check, link, spinner_style};
use anstream::println;
use dialoguer::{Confirm, Password};
use gg_mcp::error::{Error, Result};
use gg_mcp::exec::{CommandRunner, SystemRunner};
use gg_mcp::release::PACKAGE_NAME;
use gg_mcp::release::pypi::{
    BUILD_TOOL, DIST_DIR, Repository, UV_INSTALL_HINT, build_distributions, clean_dist,
    dist_artifacts, token_from_env, upload_distributions,
};
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Options for the pypi command
#[derive(Debug, Clone, Default)]
pub struct PypiOptions {
    /// Upload to TestPyPI instead of PyPI
    pub test: bool,
}

/// Run the pypi command
#[allow(clippy::too_many_lines)]
pub async fn run_pypi(root: &Path, options: PypiOptions) -> Result<()> {
    let repository = Repository::from_test_flag(options.test);
    let runner = SystemRunner;

    println!(
        "{}",
        format!("Publishing {PACKAGE_NAME} to {repository}").emphasis()
    );
    println!();

    // Prerequisites
    println!("{}", "Checking prerequisites...".muted());
    if runner.which(BUILD_TOOL).is_none() {
        return Err(Error::ToolNotFound {
            tool: BUILD_TOOL.to_string(),
            hint: UV_INSTALL_HINT.to_string(),
        });
    }
    println!("{} {BUILD_TOOL} is installed", check());
    println!(
        "{}",
        format!("Working directory: {}", root.display()).muted()
    );

    // Build
    if clean_dist(root)? {
        println!("{}", format!("Removed previous {DIST_DIR}/").muted());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Building package...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    build_distributions(&runner, root).await?;

    spinner.finish_with_message(format!("{} Package built successfully", check()));

    let artifacts = dist_artifacts(root)?;
    if !artifacts.is_empty() {
        println!();
        println!("{}", "Built files:".emphasis());
        for name in &artifacts {
            println!("  {} {name}", arrow());
        }
    }

    // Confirm upload
    println!();
    if options.test {
        println!("{}", "⚠️  Test mode: uploading to TestPyPI".warn());
    }
    println!("Ready to upload to {}", repository.emphasis());
    if !Confirm::new()
        .with_prompt("Continue?")
        .default(false)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
    {
        println!("{}", "Aborted by user".muted());
        return Ok(());
    }
    println!();

    // Token from environment, falling back to a masked prompt
    let token = match token_from_env(repository) {
        Some(token) => token,
        None => {
            println!(
                "{}",
                format!("{repository} token not found in environment.").muted()
            );
            let entered = Password::new()
                .with_prompt(format!("Enter your {repository} API token"))
                .allow_empty_password(true)
                .interact()
                .map_err(|e| Error::Internal(format!("Failed to read token: {e}")))?;
            let entered = entered.trim().to_string();
            if entered.is_empty() {
                return Err(Error::MissingToken(repository.to_string()));
            }
            entered
        }
    };

    // Upload
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Uploading to {repository}..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    upload_distributions(&runner, root, repository, &token).await?;

    spinner.finish_with_message(format!("{} Uploaded to {repository}", check()));

    // Verification instructions
    println!();
    println!("{}", "Verify installation with:".emphasis());
    println!("  {}", repository.install_hint().accent());
    println!();
    println!("{}", format!("View on {repository}:").emphasis());
    let url = repository.project_url();
    println!("  {}", link(&url, &url));

    println!();
    println!("{}", format!("{CHECK} Publication complete!").success());

    if !options.test {
        println!();
        println!("{}", "Next step: register with the MCP registry".emphasis());
        println!("  {}", "gg-release registry".accent());
    }

    Ok(())
}
