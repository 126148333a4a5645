//! Registry command - validate server.json and publish to the MCP registry

use crate::cli::style::{CHECK, Stylize, check, link};
use anstream::println;
use dialoguer::Confirm;
use gg_mcp::error::{Error, Result};
use gg_mcp::exec::{CommandRunner, SystemRunner};
use gg_mcp::manifest::{MANIFEST_FILE, ServerManifest};
use gg_mcp::release::PACKAGE_NAME;
use gg_mcp::release::registry::{
    PUBLISHER_INSTALL_HINT, PUBLISHER_TOOL, REGISTRY_URL, login_request, publish_server,
    publisher_version,
};
use std::path::Path;

/// Options for the registry command
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    /// Validate everything but do not publish
    pub dry_run: bool,
}

/// Run the registry command
#[allow(clippy::too_many_lines)]
pub async fn run_registry(root: &Path, options: RegistryOptions) -> Result<()> {
    let runner = SystemRunner;

    println!(
        "{}",
        format!("Publishing {PACKAGE_NAME} to the MCP registry").emphasis()
    );
    println!();
    println!(
        "{}",
        format!("Working directory: {}", root.display()).muted()
    );

    // =========================================================================
    // Phase 1: CHECK - publisher tool and manifest
    // =========================================================================

    println!();
    println!("{}", "Checking prerequisites...".muted());
    if runner.which(PUBLISHER_TOOL).is_none() {
        return Err(Error::ToolNotFound {
            tool: PUBLISHER_TOOL.to_string(),
            hint: PUBLISHER_INSTALL_HINT.to_string(),
        });
    }
    println!("{} {PUBLISHER_TOOL} is installed", check());

    if let Some(version) = publisher_version(&runner).await {
        println!("{}", format!("   Version: {version}").muted());
    }

    let manifest = ServerManifest::load(root)?;
    println!("{} {MANIFEST_FILE} exists", check());

    println!();
    println!("{}", format!("Validating {MANIFEST_FILE}...").muted());
    manifest.validate()?;
    println!("{} {MANIFEST_FILE} structure is valid", check());

    print_manifest_summary(&manifest);

    println!();
    println!("ℹ️  You will need to authenticate with GitHub");
    println!(
        "{}",
        "   Make sure you have access to the GitGuardian organization".muted()
    );

    // =========================================================================
    // Phase 2: CONFIRM - operator go-ahead and GitHub login
    // =========================================================================

    println!();
    println!("{}", "Ready to publish to the MCP registry".emphasis());
    println!();
    println!("Before continuing, ensure:");
    println!("  {} Package is published to PyPI", check());
    println!("  {} {MANIFEST_FILE} is correct", check());
    println!("  {} You have GitHub org access", check());

    if !options.dry_run {
        if !Confirm::new()
            .with_prompt("Continue with publication?")
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted by user".muted());
            return Ok(());
        }

        if !login_github(&runner, root).await? {
            println!();
            println!("{}", "⚠️  Proceeding without explicit GitHub login".warn());
            println!(
                "{}",
                format!("   {PUBLISHER_TOOL} publish may prompt for authentication").muted()
            );
        }
    }

    // =========================================================================
    // Phase 3: PUBLISH
    // =========================================================================

    println!();
    if options.dry_run {
        println!("{}", "Dry run mode - no changes will be made".warn());
        println!();
        println!(
            "Would execute: {}",
            format!("{PUBLISHER_TOOL} publish").accent()
        );
        println!("{} Dry run completed", check());
    } else {
        println!("{}", "Publishing to the MCP registry...".emphasis());
        publish_server(&runner, root).await?;
        println!();
        println!("{} Successfully published to the MCP registry!", check());
    }

    println!();
    println!("{}", format!("{CHECK} Process complete!").success());

    if !options.dry_run {
        println!();
        println!(
            "{}",
            "Your server should now be available in the MCP registry:".emphasis()
        );
        println!("  {}", link(REGISTRY_URL, REGISTRY_URL));
        println!();
        println!("{}", "Users can install it with:".emphasis());
        println!("  {}", format!("uvx {PACKAGE_NAME}").accent());
    }

    Ok(())
}

/// Print the manifest fields the registry will see
fn print_manifest_summary(manifest: &ServerManifest) {
    println!();
    println!("{}", "Configuration:".emphasis());
    if let Some(ref name) = manifest.name {
        println!("  Name: {}", name.accent());
    }
    if let Some(ref description) = manifest.description {
        println!("  Description: {description}");
    }
    if let Some(ref version) = manifest.version {
        println!("  Version: {}", version.accent());
    }

    if let Some(package) = manifest.first_package() {
        println!();
        println!("  {}", "Package:".emphasis());
        println!(
            "    Registry: {}",
            package.registry_type.as_deref().unwrap_or("-")
        );
        println!(
            "    Identifier: {}",
            package.identifier.as_deref().unwrap_or("-")
        );
        println!(
            "    Version: {}",
            package.version.as_deref().unwrap_or("-")
        );
    }
}

/// Interactive GitHub login. Declining or failing is soft, the publish
/// step can prompt for credentials on its own.
async fn login_github(runner: &dyn CommandRunner, root: &Path) -> Result<bool> {
    println!();
    println!("{}", "Authenticating with GitHub...".emphasis());
    println!("This will open a browser window for authentication.");

    if !Confirm::new()
        .with_prompt("Continue with GitHub login?")
        .default(false)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
    {
        println!("{}", "Skipping GitHub login".muted());
        return Ok(false);
    }

    let status = runner.run_interactive(&login_request(root)).await?;
    if !status.success {
        println!("{}", "GitHub authentication failed".warn());
        return Ok(false);
    }

    println!("{} GitHub authentication successful", check());
    Ok(true)
}
