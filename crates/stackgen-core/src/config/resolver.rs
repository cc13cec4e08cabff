//! Configuration resolution
//!
//! Turns a raw [`Selection`] into one internally consistent [`ProjectConfig`].
//! The interactive flow filters every option list against the compatibility
//! tables before a choice is presented, so resolution is consistency
//! propagation, not rejection: `resolve` is total and never fails. Flag-driven
//! (non-interactive) invocations go through [`validate`] first.
//!
//! Step ordering below is load-bearing: package-manager forcing recorded in
//! the backend/runtime steps takes precedence over the user's package-manager
//! selection later on.

use crate::config::{
    tables, Backend, Database, Extras, Notice, Orm, PackageManager, ProjectConfig, Resolution,
    Runtime, Selection, CURRENT_DIR_MARKER,
};
use anyhow::{bail, Result};
use clap::ValueEnum;

/// Resolve a raw selection into a full configuration.
///
/// Precondition: every populated field already passed per-field validation
/// (prompt filtering or [`validate`]). Behavior on an inconsistent selection
/// is unspecified.
pub fn resolve(selection: &Selection) -> Resolution {
    let mut notices = Vec::new();

    // 1. Project name: the "." marker becomes the cwd basename for naming,
    //    but keeps its in-place meaning for directory handling
    let (project_name, in_place) = resolve_project_name(selection.project_name.as_deref());

    // 2. Frontend
    let frontend = selection.frontend.unwrap_or_default();

    // 3. Backend
    let backend = selection.backend.unwrap_or_default();

    // 4. Backend-mandated package manager wins over everything later
    let mut forced_pm = None;
    if let Some(pm) = tables::mandated_package_manager(backend) {
        forced_pm = Some(pm);
        notices.push(Notice::PackageManagerForcedByBackend {
            backend,
            package_manager: pm,
        });
    }

    // 5. Runtime, only for runtime-selectable backends; a bun runtime forces
    //    the bun package manager with the same precedence as step 4
    let runtime = if tables::runtime_selectable(backend) {
        let rt = selection.runtime.unwrap_or_default();
        if rt == Runtime::Bun && forced_pm.is_none() {
            forced_pm = Some(PackageManager::Bun);
            notices.push(Notice::PackageManagerForcedByRuntime {
                runtime: rt,
                package_manager: PackageManager::Bun,
            });
        }
        Some(rt)
    } else {
        None
    };

    // 6/7. Database and ORM
    let (database, orm) = if tables::skips_database(backend) {
        (Database::None, Orm::None)
    } else {
        let database = selection.database.unwrap_or_default();
        let orm = if database == Database::None {
            Orm::None
        } else {
            match selection.orm {
                Some(orm) => orm,
                None => match tables::single_orm(database) {
                    Some(only) => {
                        notices.push(Notice::OrmAutoSelected { database, orm: only });
                        only
                    }
                    None => Orm::None,
                },
            }
        };
        (database, orm)
    };

    // 8. Auth
    let auth = selection.auth.unwrap_or_default();

    // 9. Styling
    let styling = selection.styling.unwrap_or_default();

    // 10. Package manager: forced value beats any user selection
    let package_manager = forced_pm
        .unwrap_or_else(|| selection.package_manager.unwrap_or_default());

    // 11. Extras; prettier mirrors eslint, never resolved on its own
    let defaults = Extras::default();
    let eslint = selection.eslint.unwrap_or(defaults.eslint);
    let extras = Extras {
        typecheck: selection.typecheck.unwrap_or(defaults.typecheck),
        eslint,
        prettier: eslint,
        tests: selection.tests.unwrap_or(defaults.tests),
        e2e: selection.e2e.unwrap_or(defaults.e2e),
        docker: selection.docker.unwrap_or(defaults.docker),
    };

    Resolution {
        config: ProjectConfig {
            project_name,
            in_place,
            frontend,
            backend,
            database,
            orm,
            auth,
            styling,
            package_manager,
            runtime,
            extras,
        },
        notices,
    }
}

fn resolve_project_name(name: Option<&str>) -> (String, bool) {
    match name {
        Some(CURRENT_DIR_MARKER) | None => {
            let basename = std::env::current_dir()
                .ok()
                .and_then(|d| d.file_name().map(|n| n.to_string_lossy().into_owned()));
            match (name, basename) {
                (Some(CURRENT_DIR_MARKER), Some(base)) => (base, true),
                (Some(CURRENT_DIR_MARKER), None) => ("my-app".to_string(), true),
                _ => ("my-app".to_string(), false),
            }
        }
        Some(other) => (other.to_string(), false),
    }
}

/// Validate a flag-supplied selection against the allow-lists before
/// resolution. Interactive runs never need this because prompt option lists
/// are pre-filtered; non-interactive runs would otherwise trust flags blindly.
pub fn validate(selection: &Selection) -> Result<()> {
    let frontend = selection.frontend.unwrap_or_default();

    if let Some(backend) = selection.backend {
        if !tables::backends_for(frontend).contains(&backend) {
            bail!("Backend '{}' is not available with {}", backend, frontend);
        }
    }
    let backend = selection.backend.unwrap_or_default();

    if let Some(database) = selection.database {
        if tables::skips_database(backend) && database != Database::None {
            bail!("{} manages its own storage; remove the database flag", backend);
        }
        if !tables::databases_for(frontend).contains(&database) {
            bail!("Database '{}' is not available with {}", database, frontend);
        }
        if let Some(orm) = selection.orm {
            if !tables::orms_for(database).contains(&orm) {
                bail!("ORM '{}' is not available with {}", orm, database);
            }
        }
    } else if let Some(orm) = selection.orm {
        if orm != Orm::None {
            bail!("ORM '{}' requires a database selection", orm);
        }
    }

    if let Some(auth) = selection.auth {
        if !tables::auth_for(frontend).contains(&auth) {
            bail!("Auth provider '{}' is not available with {}", auth, frontend);
        }
    }

    if selection.runtime.is_some() && !tables::runtime_selectable(backend) {
        let selectable: Vec<String> = Backend::value_variants()
            .iter()
            .filter(|b| tables::runtime_selectable(**b))
            .map(|b| b.to_string())
            .collect();
        bail!("Runtime selection only applies to {}", selectable.join(", "));
    }

    Ok(())
}

/// Full validation for the no-prompt entry point: allow-list consistency plus
/// completeness. Every field that would otherwise be prompted for must be
/// supplied, except those resolution fills on its own (a single compatible
/// ORM, a package manager forced by the backend or runtime). Boolean extras
/// keep their documented defaults when omitted.
pub fn validate_complete(selection: &Selection) -> Result<()> {
    validate(selection)?;

    if selection.project_name.is_none() {
        bail!("A project name is required in non-interactive mode");
    }
    require(selection.frontend, "--frontend")?;
    let backend = require(selection.backend, "--backend")?;

    if tables::runtime_selectable(backend) {
        require(selection.runtime, "--runtime")?;
    }

    if !tables::skips_database(backend) {
        let database = require(selection.database, "--database")?;
        // A database with exactly one compatible ORM is auto-assigned, so the
        // flag is only required when there is an actual choice
        if database != Database::None
            && selection.orm.is_none()
            && tables::single_orm(database).is_none()
        {
            bail!("--orm is required for {} in non-interactive mode", database);
        }
    }

    require(selection.auth, "--auth")?;
    require(selection.styling, "--styling")?;

    let forced = tables::mandated_package_manager(backend).is_some()
        || (tables::runtime_selectable(backend) && selection.runtime == Some(Runtime::Bun));
    if !forced {
        require(selection.package_manager, "--package-manager")?;
    }

    Ok(())
}

fn require<T>(field: Option<T>, flag: &str) -> Result<T> {
    field.ok_or_else(|| anyhow::anyhow!("{} is required in non-interactive mode", flag))
}
