//! External command runner: dependency installation and version control
//!
//! Both collaborators are invoked exactly once, no retries. Install failures
//! are fatal and carry the underlying output; git init is best-effort and its
//! failure is swallowed at the call site.

use crate::config::PackageManager;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Run `<pm> install` in `dir`.
pub async fn install_dependencies(pm: PackageManager, dir: &Path) -> Result<()> {
    let output = Command::new(pm.command())
        .arg("install")
        .current_dir(dir)
        .output()
        .await
        .with_context(|| format!("Failed to run {} install", pm.command()))?;

    if !output.status.success() {
        bail!(
            "{} install failed:\n{}",
            pm.command(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Add packages to the manifest in `dir` (dev or regular).
pub async fn add_packages(
    pm: PackageManager,
    dir: &Path,
    packages: &[&str],
    dev: bool,
) -> Result<()> {
    if packages.is_empty() {
        return Ok(());
    }

    let mut cmd = Command::new(pm.command());
    cmd.arg("add");
    if dev {
        // npm spells the dev flag differently
        cmd.arg(match pm {
            PackageManager::Npm => "--save-dev",
            _ => "-D",
        });
    }
    cmd.args(packages).current_dir(dir);

    let output = cmd
        .output()
        .await
        .with_context(|| format!("Failed to run {} add", pm.command()))?;

    if !output.status.success() {
        bail!(
            "{} add failed:\n{}",
            pm.command(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Initialize a git repository in `dir`, best-effort.
///
/// Version control is a convenience, not a correctness requirement: a missing
/// git binary or a failed init must not block project creation, so the result
/// is discarded. This is a deliberate, narrow exception to the fail-fast
/// policy; do not copy the pattern elsewhere.
pub async fn init_git(dir: &Path) {
    let _ = Command::new("git")
        .args(["init", "--initial-branch=main"])
        .current_dir(dir)
        .output()
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_git_never_fails() {
        // Nonexistent directory: spawn fails, and that is fine
        init_git(Path::new("/nonexistent/stackgen-test")).await;
    }

    #[tokio::test]
    async fn add_packages_with_empty_list_is_a_no_op() {
        let result =
            add_packages(PackageManager::Npm, Path::new("/nonexistent"), &[], true).await;
        assert!(result.is_ok());
    }
}
