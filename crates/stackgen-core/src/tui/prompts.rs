//! Charm-style CLI prompts using cliclack
//!
//! The prompt sequence mirrors the resolver's step order exactly, and every
//! option list is filtered against the compatibility tables before it is
//! shown, so a selection assembled here always satisfies the resolver's
//! precondition.

use crate::config::{
    resolver, tables, Auth, Backend, Database, Frontend, Orm, PackageManager, ProjectConfig,
    Resolution, Runtime, Selection, Styling,
};
use crate::error::{map_prompt_err, Cancelled};
use crate::{runner, scaffold};
use anyhow::Result;
use std::path::PathBuf;

/// Arguments for a scaffolding run, assembled from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name, or "." to scaffold into the current directory
    pub project_name: Option<String>,
    pub frontend: Option<Frontend>,
    pub backend: Option<Backend>,
    pub database: Option<Database>,
    pub orm: Option<Orm>,
    pub auth: Option<Auth>,
    pub styling: Option<Styling>,
    pub package_manager: Option<PackageManager>,
    pub runtime: Option<Runtime>,
    pub typecheck: Option<bool>,
    pub eslint: Option<bool>,
    pub tests: Option<bool>,
    pub e2e: Option<bool>,
    pub docker: Option<bool>,

    /// Skip all prompts, use defaults for anything unset
    pub yes: bool,
    /// Never prompt; flags must form a complete, valid selection
    pub non_interactive: bool,
    /// Skip dependency installation
    pub no_install: bool,
    /// Skip git initialization
    pub no_git: bool,
}

impl CreateArgs {
    fn into_selection(self) -> Selection {
        Selection {
            project_name: self.project_name,
            frontend: self.frontend,
            backend: self.backend,
            database: self.database,
            orm: self.orm,
            auth: self.auth,
            styling: self.styling,
            package_manager: self.package_manager,
            runtime: self.runtime,
            typecheck: self.typecheck,
            eslint: self.eslint,
            tests: self.tests,
            e2e: self.e2e,
            docker: self.docker,
        }
    }
}

/// Run the full scaffolding flow.
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("stackgen")?;

    let yes = args.yes;
    let non_interactive = args.non_interactive;
    let no_install = args.no_install;
    let no_git = args.no_git;

    // Step 1: Assemble the selection
    let mut selection = args.into_selection();
    if non_interactive {
        resolver::validate_complete(&selection)?;
    } else if !yes {
        prompt_missing(&mut selection)?;
    }

    // Step 2: Resolve and surface notices
    let Resolution { config, notices } = resolver::resolve(&selection);
    for notice in &notices {
        cliclack::log::info(notice.to_string())?;
    }

    // Step 3: Pick the target directory and confirm before any write
    let target_dir = target_directory(&config)?;
    confirm_directory(&target_dir, yes || non_interactive)?;

    // Step 4: Write the project
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");
    let written = scaffold::scaffold(&config, &target_dir).await?;
    spinner.stop(format!(
        "Created {} files in {}",
        written.len(),
        target_dir.display()
    ));

    // Step 5: Install dependencies (fatal on failure)
    if no_install {
        cliclack::log::info("Skipping dependency installation")?;
    } else {
        let spinner = cliclack::spinner();
        spinner.start(format!("Installing with {}...", config.package_manager.command()));
        match runner::install_dependencies(config.package_manager, &target_dir).await {
            Ok(()) => spinner.stop("Dependencies installed"),
            Err(e) => {
                spinner.stop("Install failed");
                return Err(e);
            }
        }
    }

    // Step 6: Initialize version control, best-effort
    if !no_git {
        runner::init_git(&target_dir).await;
    }

    // Step 7: Show next steps
    print_next_steps(&config, &target_dir, no_install)?;

    Ok(())
}

/// Prompt for every unset field, in the resolver's step order, with option
/// lists filtered to the current allow-lists.
fn prompt_missing(selection: &mut Selection) -> Result<()> {
    // Project name
    if selection.project_name.is_none() {
        let name: String = cliclack::input("Project name (\".\" for current directory)")
            .placeholder("my-app")
            .default_input("my-app")
            .interact()
            .map_err(map_prompt_err)?;
        selection.project_name = Some(name);
    }

    // Frontend
    let frontend = match selection.frontend {
        Some(f) => f,
        None => {
            let mut select = cliclack::select("Frontend framework");
            for frontend in [
                Frontend::Next,
                Frontend::React,
                Frontend::Vue,
                Frontend::Svelte,
                Frontend::Solid,
            ] {
                select = select.item(frontend, frontend.display_name(), "");
            }
            let chosen = select.interact().map_err(map_prompt_err)?;
            selection.frontend = Some(chosen);
            chosen
        }
    };

    // Backend, filtered by frontend
    let backend = match selection.backend {
        Some(b) => b,
        None => {
            let mut select = cliclack::select("Backend framework");
            for backend in tables::backends_for(frontend) {
                select = select.item(*backend, backend.display_name(), "");
            }
            let chosen = select.interact().map_err(map_prompt_err)?;
            selection.backend = Some(chosen);
            chosen
        }
    };

    // Runtime, only for the runtime-selectable family
    if tables::runtime_selectable(backend) && selection.runtime.is_none() {
        let chosen = cliclack::select("Runtime")
            .item(Runtime::Node, Runtime::Node.display_name(), "")
            .item(Runtime::Bun, Runtime::Bun.display_name(), "")
            .interact()
            .map_err(map_prompt_err)?;
        selection.runtime = Some(chosen);
    }

    // Database and ORM, skipped entirely for self-storing backends
    if !tables::skips_database(backend) {
        let database = match selection.database {
            Some(d) => d,
            None => {
                let mut select = cliclack::select("Database");
                for database in tables::databases_for(frontend) {
                    select = select.item(*database, database.display_name(), "");
                }
                let chosen = select.interact().map_err(map_prompt_err)?;
                selection.database = Some(chosen);
                chosen
            }
        };

        // Only prompt when there is an actual choice; a single compatible ORM
        // is auto-assigned by the resolver without a prompt
        if database != Database::None
            && selection.orm.is_none()
            && tables::single_orm(database).is_none()
        {
            let mut select = cliclack::select("ORM");
            for orm in tables::orms_for(database) {
                select = select.item(*orm, orm.display_name(), "");
            }
            selection.orm = Some(select.interact().map_err(map_prompt_err)?);
        }
    }

    // Auth, filtered by frontend
    if selection.auth.is_none() {
        let mut select = cliclack::select("Auth provider");
        for auth in tables::auth_for(frontend) {
            select = select.item(*auth, auth.display_name(), "");
        }
        selection.auth = Some(select.interact().map_err(map_prompt_err)?);
    }

    // Styling
    if selection.styling.is_none() {
        let chosen = cliclack::select("Styling")
            .item(Styling::Tailwind, Styling::Tailwind.display_name(), "")
            .item(Styling::Unocss, Styling::Unocss.display_name(), "")
            .item(Styling::Css, Styling::Css.display_name(), "")
            .interact()
            .map_err(map_prompt_err)?;
        selection.styling = Some(chosen);
    }

    // Package manager, skipped when the backend or runtime already forces one
    let forced = tables::mandated_package_manager(backend).is_some()
        || (tables::runtime_selectable(backend) && selection.runtime == Some(Runtime::Bun));
    if !forced && selection.package_manager.is_none() {
        let mut select = cliclack::select("Package manager");
        for pm in [
            PackageManager::Npm,
            PackageManager::Pnpm,
            PackageManager::Yarn,
            PackageManager::Bun,
        ] {
            select = select.item(pm, pm.command(), "");
        }
        selection.package_manager = Some(select.interact().map_err(map_prompt_err)?);
    }

    // Extras as one multiselect; prettier tracks eslint and is never asked
    let unset_extras = selection.typecheck.is_none()
        && selection.eslint.is_none()
        && selection.tests.is_none()
        && selection.e2e.is_none()
        && selection.docker.is_none();
    if unset_extras {
        let chosen: Vec<&str> = cliclack::multiselect("Extras")
            .item("typecheck", "TypeScript type-checking", "")
            .item("eslint", "ESLint + Prettier", "")
            .item("tests", "Unit tests (vitest)", "")
            .item("e2e", "End-to-end tests (playwright)", "")
            .item("docker", "Dockerfile", "")
            .initial_values(vec!["typecheck", "eslint"])
            .required(false)
            .interact()
            .map_err(map_prompt_err)?;
        selection.typecheck = Some(chosen.contains(&"typecheck"));
        selection.eslint = Some(chosen.contains(&"eslint"));
        selection.tests = Some(chosen.contains(&"tests"));
        selection.e2e = Some(chosen.contains(&"e2e"));
        selection.docker = Some(chosen.contains(&"docker"));
    }

    Ok(())
}

fn target_directory(config: &ProjectConfig) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Ok(if config.in_place {
        current_dir
    } else {
        current_dir.join(&config.project_name)
    })
}

/// Warn and confirm when the target directory already has contents. This is
/// the last point before any file-system mutation.
fn confirm_directory(path: &PathBuf, auto_confirm: bool) -> Result<()> {
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                let confirm = if auto_confirm {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()
                        .map_err(map_prompt_err)?
                };

                if !confirm {
                    return Err(anyhow::Error::new(Cancelled));
                }
            }
        }
    }
    Ok(())
}

fn print_next_steps(config: &ProjectConfig, dir: &PathBuf, install_skipped: bool) -> Result<()> {
    let pm = config.package_manager.command();
    let mut steps = Vec::new();

    if !config.in_place {
        steps.push(format!("cd {}", dir.display()));
    }
    if install_skipped {
        steps.push(format!("{} install", pm));
    }
    steps.push(format!("{} run dev", pm));

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
