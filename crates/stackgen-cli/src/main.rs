//! stackgen - Full-stack project scaffolding CLI

use clap::Parser;
use colored::Colorize;
use stackgen_core::config::{Auth, Backend, Database, Frontend, Orm, PackageManager, Runtime, Styling};
use stackgen_core::tui::CreateArgs;
use stackgen_core::Cancelled;

#[derive(Parser, Debug)]
#[command(name = "stackgen")]
#[command(about = "Scaffold a full-stack TypeScript project")]
#[command(version)]
pub struct Args {
    /// Project name, or "." to scaffold into the current directory
    pub name: Option<String>,

    /// Frontend framework
    #[arg(long, value_enum)]
    pub frontend: Option<Frontend>,

    /// Backend framework
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Database
    #[arg(long, value_enum)]
    pub database: Option<Database>,

    /// ORM
    #[arg(long, value_enum)]
    pub orm: Option<Orm>,

    /// Runtime (only meaningful for runtime-selectable backends)
    #[arg(long, value_enum)]
    pub runtime: Option<Runtime>,

    /// Auth provider
    #[arg(long, value_enum)]
    pub auth: Option<Auth>,

    /// Styling system
    #[arg(long, value_enum)]
    pub styling: Option<Styling>,

    /// Package manager
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Enable/disable TypeScript type-checking
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub typecheck: Option<bool>,

    /// Enable/disable ESLint (Prettier follows this)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub eslint: Option<bool>,

    /// Enable/disable unit tests
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub tests: Option<bool>,

    /// Enable/disable end-to-end tests
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub e2e: Option<bool>,

    /// Enable/disable Dockerfile generation
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub docker: Option<bool>,

    /// Skip all prompts and use defaults for anything unset
    #[arg(short, long)]
    pub yes: bool,

    /// Never prompt; supplied flags must form a complete, valid selection
    #[arg(long = "no-interactive")]
    pub non_interactive: bool,

    /// Skip dependency installation
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Skip git initialization
    #[arg(long = "no-git")]
    pub no_git: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_name: args.name,
            frontend: args.frontend,
            backend: args.backend,
            database: args.database,
            orm: args.orm,
            auth: args.auth,
            styling: args.styling,
            package_manager: args.package_manager,
            runtime: args.runtime,
            typecheck: args.typecheck,
            eslint: args.eslint,
            tests: args.tests,
            e2e: args.e2e,
            docker: args.docker,
            yes: args.yes,
            non_interactive: args.non_interactive,
            no_install: args.no_install,
            no_git: args.no_git,
        }
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C counts as user cancellation: neutral exit, not an error
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        eprintln!("\n{}", "Setup cancelled.".yellow());
        std::process::exit(0);
    })
    .ok();

    let args = Args::parse();
    let result = stackgen_core::run(args.into()).await;

    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => {}
        Err(e) if e.downcast_ref::<Cancelled>().is_some() => {
            eprintln!("{}", "Setup cancelled.".yellow());
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
