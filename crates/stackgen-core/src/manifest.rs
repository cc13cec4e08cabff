//! Package manifest building and merging
//!
//! `package.json`-shaped manifests: one for single-package layouts, a root
//! workspace manifest plus two sub-package manifests for monorepos. Maps are
//! BTreeMaps so serialized output is deterministic.

use crate::config::{PackageManager, ProjectConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sub-package directories of a monorepo, relative to the workspace root.
pub const WORKSPACE_PACKAGES: [&str; 2] = ["packages/frontend", "packages/backend"];

/// A package manifest (package.json equivalent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub private: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspaces: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(
        rename = "devDependencies",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "0.1.0".to_string(),
            private: true,
            ..Self::default()
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        out.push('\n');
        Ok(out)
    }
}

/// Merge a backend's declared dependencies, dev-dependencies, and scripts into
/// the frontend manifest. Used for the integrated single-package case.
///
/// Right-biased: where a key exists in both, the backend's value wins -
/// including script name collisions, where the frontend's script body is
/// silently dropped. No semver range reconciliation is attempted.
pub fn merge_backend(
    mut frontend: Manifest,
    dependencies: BTreeMap<String, String>,
    dev_dependencies: BTreeMap<String, String>,
    scripts: BTreeMap<String, String>,
) -> Manifest {
    frontend.dependencies.extend(dependencies);
    frontend.dev_dependencies.extend(dev_dependencies);
    frontend.scripts.extend(scripts);
    frontend
}

/// Build the workspace-root manifest for the monorepo layout.
///
/// `workspaces` always lists exactly the two sub-package directories and
/// `scripts` always contains exactly eight keys, regardless of configuration.
pub fn root_manifest(config: &ProjectConfig) -> Manifest {
    let pm = config.package_manager;
    let mut manifest = Manifest::new(config.project_name.clone());
    manifest.workspaces = WORKSPACE_PACKAGES.iter().map(|p| p.to_string()).collect();

    let mut scripts = BTreeMap::new();
    scripts.insert("dev".to_string(), parallel_dev_script(pm));
    scripts.insert("dev:frontend".to_string(), filtered_script(pm, "frontend", "dev"));
    scripts.insert("dev:backend".to_string(), filtered_script(pm, "backend", "dev"));
    scripts.insert(
        "build".to_string(),
        format!("{} && {}", self_script(pm, "build:frontend"), self_script(pm, "build:backend")),
    );
    scripts.insert("build:frontend".to_string(), filtered_script(pm, "frontend", "build"));
    scripts.insert("build:backend".to_string(), filtered_script(pm, "backend", "build"));
    scripts.insert("lint".to_string(), recursive_script(pm, "lint"));
    scripts.insert("test".to_string(), recursive_script(pm, "test"));
    manifest.scripts = scripts;

    manifest
}

/// The pnpm workspace declaration file, only written for pnpm projects.
pub fn pnpm_workspace_yaml() -> Result<String> {
    #[derive(Serialize)]
    struct PnpmWorkspace {
        packages: Vec<String>,
    }
    serde_yaml::to_string(&PnpmWorkspace {
        packages: vec!["packages/*".to_string()],
    })
    .context("Failed to serialize pnpm workspace file")
}

/// Run a named script in one workspace package.
fn filtered_script(pm: PackageManager, package: &str, script: &str) -> String {
    match pm {
        PackageManager::Npm => format!("npm run {script} --workspace {package}"),
        PackageManager::Pnpm => format!("pnpm --filter {package} {script}"),
        PackageManager::Yarn => format!("yarn workspace {package} {script}"),
        PackageManager::Bun => format!("bun run --filter {package} {script}"),
    }
}

/// Run frontend and backend dev servers concurrently.
fn parallel_dev_script(pm: PackageManager) -> String {
    match pm {
        PackageManager::Npm => "npm run dev --workspaces".to_string(),
        PackageManager::Pnpm => "pnpm --parallel -r dev".to_string(),
        PackageManager::Yarn => "yarn workspaces foreach -pi run dev".to_string(),
        PackageManager::Bun => "bun run --filter '*' dev".to_string(),
    }
}

/// Run a named script across every workspace package.
fn recursive_script(pm: PackageManager, script: &str) -> String {
    match pm {
        PackageManager::Npm => format!("npm run {script} --workspaces --if-present"),
        PackageManager::Pnpm => format!("pnpm -r {script}"),
        PackageManager::Yarn => format!("yarn workspaces foreach run {script}"),
        PackageManager::Bun => format!("bun run --filter '*' {script}"),
    }
}

/// Invoke another script of the root manifest itself.
fn self_script(pm: PackageManager, script: &str) -> String {
    match pm {
        PackageManager::Npm => format!("npm run {script}"),
        PackageManager::Pnpm => format!("pnpm {script}"),
        PackageManager::Yarn => format!("yarn {script}"),
        PackageManager::Bun => format!("bun run {script}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolver, Backend, Frontend, Selection};
    use clap::ValueEnum;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn merge_is_right_biased() {
        let mut frontend = Manifest::new("app");
        frontend.dependencies = map(&[("a", "1")]);
        let merged = merge_backend(frontend, map(&[("a", "2")]), map(&[]), map(&[]));
        assert_eq!(merged.dependencies, map(&[("a", "2")]));
    }

    #[test]
    fn merge_keeps_disjoint_keys() {
        let mut frontend = Manifest::new("app");
        frontend.dependencies = map(&[("a", "1"), ("b", "2")]);
        let merged = merge_backend(frontend, map(&[("c", "3")]), map(&[]), map(&[]));
        assert_eq!(merged.dependencies, map(&[("a", "1"), ("b", "2"), ("c", "3")]));
    }

    #[test]
    fn merge_script_collision_drops_frontend_body() {
        let mut frontend = Manifest::new("app");
        frontend.scripts = map(&[("build", "next build"), ("dev", "next dev")]);
        let merged = merge_backend(
            frontend,
            map(&[]),
            map(&[]),
            map(&[("build", "tsc && node build.js")]),
        );
        assert_eq!(merged.scripts.get("build").unwrap(), "tsc && node build.js");
        assert_eq!(merged.scripts.get("dev").unwrap(), "next dev");
    }

    #[test]
    fn root_manifest_has_exactly_the_fixed_script_keys() {
        let expected = [
            "build",
            "build:backend",
            "build:frontend",
            "dev",
            "dev:backend",
            "dev:frontend",
            "lint",
            "test",
        ];
        for pm in crate::config::PackageManager::value_variants() {
            let sel = Selection {
                project_name: Some("app".to_string()),
                frontend: Some(Frontend::React),
                backend: Some(Backend::Express),
                package_manager: Some(*pm),
                ..Selection::default()
            };
            let config = resolver::resolve(&sel).config;
            let manifest = root_manifest(&config);
            let keys: Vec<&str> = manifest.scripts.keys().map(String::as_str).collect();
            assert_eq!(keys, expected, "{:?}", pm);
            assert_eq!(manifest.workspaces, WORKSPACE_PACKAGES.to_vec());
        }
    }

    #[test]
    fn manifest_json_is_stable_and_terminated() {
        let mut m = Manifest::new("demo");
        m.dependencies = map(&[("react", "^19.0.0")]);
        let json = m.to_json().unwrap();
        assert!(json.ends_with('\n'));
        assert!(!json.contains("\"devDependencies\""));
        let parsed: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn pnpm_workspace_lists_packages_glob() {
        let yaml = pnpm_workspace_yaml().unwrap();
        assert!(yaml.contains("packages/*"));
    }
}
