//! Project generation
//!
//! Writes the resolved project to disk: manifests plus catalog files, laid out
//! per the classification. Strictly sequential; a failure partway through
//! leaves a partially-populated directory (no rollback by design).

use crate::catalog::{self, GeneratedFile};
use crate::config::{PackageManager, ProjectConfig};
use crate::layout::{classify, LayoutDecision};
use crate::manifest::{self, Manifest};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Scaffold the project into `target_dir`. Returns the relative paths of all
/// written files for the summary line.
pub async fn scaffold(config: &ProjectConfig, target_dir: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written = Vec::new();

    match classify(config.backend) {
        LayoutDecision::None | LayoutDecision::Integrated => {
            single_package(config, target_dir, &mut written).await?;
        }
        LayoutDecision::Separate => {
            monorepo(config, target_dir, &mut written).await?;
        }
    }

    Ok(written)
}

/// Single-package layout: one manifest at the root; an integrated backend's
/// maps are merged into it, backend value winning on collisions.
async fn single_package(
    config: &ProjectConfig,
    target_dir: &Path,
    written: &mut Vec<String>,
) -> Result<()> {
    let mut package = catalog::frontend_manifest(config, &config.project_name);

    let data = catalog::data_layer_seed(config);
    package = manifest::merge_backend(package, data.dependencies, data.dev_dependencies, data.scripts);

    if classify(config.backend) == LayoutDecision::Integrated {
        let seed = catalog::backend_seed(config);
        package = manifest::merge_backend(
            package,
            seed.dependencies,
            seed.dev_dependencies,
            seed.scripts,
        );
    }

    write_file(target_dir, "package.json", &package.to_json()?, written).await?;
    write_files(target_dir, "", &catalog::common_files(config), written).await?;
    write_files(target_dir, "", &catalog::frontend_files(config), written).await?;
    write_files(target_dir, "", &catalog::backend_files(config), written).await?;

    Ok(())
}

/// Monorepo layout: root workspace manifest plus `packages/frontend` and
/// `packages/backend`, each with its own manifest.
async fn monorepo(
    config: &ProjectConfig,
    target_dir: &Path,
    written: &mut Vec<String>,
) -> Result<()> {
    let root = manifest::root_manifest(config);
    write_file(target_dir, "package.json", &root.to_json()?, written).await?;
    write_files(target_dir, "", &catalog::common_files(config), written).await?;

    if config.package_manager == PackageManager::Pnpm {
        write_file(
            target_dir,
            "pnpm-workspace.yaml",
            &manifest::pnpm_workspace_yaml()?,
            written,
        )
        .await?;
    }

    let frontend = catalog::frontend_manifest(config, "frontend");
    write_file(
        target_dir,
        "packages/frontend/package.json",
        &frontend.to_json()?,
        written,
    )
    .await?;
    write_files(target_dir, "packages/frontend", &catalog::frontend_files(config), written)
        .await?;

    let backend = backend_manifest(config);
    write_file(
        target_dir,
        "packages/backend/package.json",
        &backend.to_json()?,
        written,
    )
    .await?;
    write_files(target_dir, "packages/backend", &catalog::backend_files(config), written)
        .await?;

    Ok(())
}

/// Backend package manifest for the separate layout: the backend's own seed
/// plus the database/ORM layer.
fn backend_manifest(config: &ProjectConfig) -> Manifest {
    let seed = catalog::backend_seed(config);
    let mut backend = Manifest::new("backend");
    backend.dependencies = seed.dependencies;
    backend.dev_dependencies = seed.dev_dependencies;
    backend.scripts = seed.scripts;

    let data = catalog::data_layer_seed(config);
    manifest::merge_backend(backend, data.dependencies, data.dev_dependencies, data.scripts)
}

async fn write_files(
    target_dir: &Path,
    prefix: &str,
    files: &[GeneratedFile],
    written: &mut Vec<String>,
) -> Result<()> {
    for file in files {
        let rel = if prefix.is_empty() {
            file.path.clone()
        } else {
            format!("{}/{}", prefix, file.path)
        };
        write_file(target_dir, &rel, &file.contents, written).await?;
    }
    Ok(())
}

async fn write_file(
    target_dir: &Path,
    rel_path: &str,
    contents: &str,
    written: &mut Vec<String>,
) -> Result<()> {
    let path = target_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&path, contents)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    written.push(rel_path.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolver, Backend, Database, Frontend, Selection};

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("stackgen-test-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn single_package_layout_writes_one_manifest() {
        let sel = Selection {
            project_name: Some("solo".to_string()),
            frontend: Some(Frontend::Next),
            ..Selection::default()
        };
        let config = resolver::resolve(&sel).config;
        let dir = temp_dir("solo");

        let written = scaffold(&config, &dir).await.unwrap();
        assert!(written.contains(&"package.json".to_string()));
        assert!(!written.iter().any(|p| p.starts_with("packages/")));

        let manifest: Manifest = serde_json::from_str(
            &std::fs::read_to_string(dir.join("package.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest.name, "solo");
        assert!(manifest.dependencies.contains_key("next"));
        // No backend-origin keys in the backend-less case
        assert!(!manifest.dependencies.contains_key("hono"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn integrated_backend_merges_into_the_single_manifest() {
        let sel = Selection {
            project_name: Some("integrated".to_string()),
            frontend: Some(Frontend::Next),
            backend: Some(Backend::NextjsBuiltin),
            database: Some(Database::Sqlite),
            ..Selection::default()
        };
        let config = resolver::resolve(&sel).config;
        let dir = temp_dir("integrated");

        let written = scaffold(&config, &dir).await.unwrap();
        assert!(written.contains(&"src/app/api/health/route.ts".to_string()));

        let manifest: Manifest = serde_json::from_str(
            &std::fs::read_to_string(dir.join("package.json")).unwrap(),
        )
        .unwrap();
        for key in catalog::backend_seed(&config).dependencies.keys() {
            assert!(manifest.dependencies.contains_key(key), "missing {}", key);
        }
        assert!(manifest.dependencies.contains_key("drizzle-orm"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn monorepo_layout_writes_three_manifests() {
        let sel = Selection {
            project_name: Some("mono".to_string()),
            frontend: Some(Frontend::React),
            backend: Some(Backend::Express),
            database: Some(Database::Postgres),
            package_manager: Some(PackageManager::Pnpm),
            ..Selection::default()
        };
        let config = resolver::resolve(&sel).config;
        let dir = temp_dir("mono");

        let written = scaffold(&config, &dir).await.unwrap();
        for expected in [
            "package.json",
            "packages/frontend/package.json",
            "packages/backend/package.json",
            "pnpm-workspace.yaml",
        ] {
            assert!(written.contains(&expected.to_string()), "missing {}", expected);
        }

        let backend: Manifest = serde_json::from_str(
            &std::fs::read_to_string(dir.join("packages/backend/package.json")).unwrap(),
        )
        .unwrap();
        assert!(backend.dependencies.contains_key("express"));
        assert!(backend.dependencies.contains_key("pg"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn workspace_file_only_for_pnpm() {
        let sel = Selection {
            project_name: Some("nows".to_string()),
            backend: Some(Backend::Fastify),
            package_manager: Some(PackageManager::Npm),
            ..Selection::default()
        };
        let config = resolver::resolve(&sel).config;
        let dir = temp_dir("nows");

        let written = scaffold(&config, &dir).await.unwrap();
        assert!(!written.contains(&"pnpm-workspace.yaml".to_string()));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
