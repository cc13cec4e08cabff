//! Configuration types: raw selections, resolved configuration, enums
//!
//! A [`Selection`] is the raw, possibly-incomplete input assembled from CLI
//! flags and/or interactive prompts. It is constructed once and never mutated.
//! The resolver consumes it and produces exactly one immutable
//! [`ProjectConfig`] per run, which is threaded through the rest of the
//! pipeline.

pub mod resolver;
pub mod tables;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project-name value meaning "scaffold into the current directory".
pub const CURRENT_DIR_MARKER: &str = ".";

/// Frontend framework choices
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Frontend {
    #[default]
    Next,
    React,
    Vue,
    Svelte,
    Solid,
}

impl Frontend {
    pub fn display_name(&self) -> &'static str {
        match self {
            Frontend::Next => "Next.js",
            Frontend::React => "React",
            Frontend::Vue => "Vue",
            Frontend::Svelte => "Svelte",
            Frontend::Solid => "Solid",
        }
    }
}

/// Backend framework choices
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    #[default]
    None,
    Hono,
    Elysia,
    Express,
    Fastify,
    /// API routes inside the Next.js app itself
    NextjsBuiltin,
    /// Embedded reactive backend
    Convex,
}

impl Backend {
    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::None => "No backend",
            Backend::Hono => "Hono",
            Backend::Elysia => "Elysia",
            Backend::Express => "Express",
            Backend::Fastify => "Fastify",
            Backend::NextjsBuiltin => "Next.js API routes",
            Backend::Convex => "Convex",
        }
    }
}

/// Database choices
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Database {
    #[default]
    None,
    Sqlite,
    Postgres,
    Mysql,
    Mongodb,
}

impl Database {
    pub fn display_name(&self) -> &'static str {
        match self {
            Database::None => "No database",
            Database::Sqlite => "SQLite",
            Database::Postgres => "PostgreSQL",
            Database::Mysql => "MySQL",
            Database::Mongodb => "MongoDB",
        }
    }
}

/// ORM choices
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Orm {
    #[default]
    None,
    Drizzle,
    Prisma,
    Mongoose,
}

impl Orm {
    pub fn display_name(&self) -> &'static str {
        match self {
            Orm::None => "No ORM",
            Orm::Drizzle => "Drizzle",
            Orm::Prisma => "Prisma",
            Orm::Mongoose => "Mongoose",
        }
    }
}

/// Auth provider choices
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Auth {
    #[default]
    None,
    BetterAuth,
    NextAuth,
    Clerk,
}

impl Auth {
    pub fn display_name(&self) -> &'static str {
        match self {
            Auth::None => "No auth",
            Auth::BetterAuth => "Better Auth",
            Auth::NextAuth => "NextAuth.js",
            Auth::Clerk => "Clerk",
        }
    }
}

/// Styling system choices
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Styling {
    #[default]
    Tailwind,
    Unocss,
    Css,
}

impl Styling {
    pub fn display_name(&self) -> &'static str {
        match self {
            Styling::Tailwind => "Tailwind CSS",
            Styling::Unocss => "UnoCSS",
            Styling::Css => "Plain CSS",
        }
    }
}

/// Package manager choices
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub fn display_name(&self) -> &'static str {
        self.command()
    }

    /// The binary invoked for installs and script runs
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }
}

/// JavaScript runtime choices, only meaningful for runtime-selectable backends
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Runtime {
    #[default]
    Node,
    Bun,
}

impl Runtime {
    pub fn display_name(&self) -> &'static str {
        match self {
            Runtime::Node => "Node.js",
            Runtime::Bun => "Bun",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        })+
    };
}

impl_display!(Frontend, Backend, Database, Orm, Auth, Styling, PackageManager, Runtime);

/// Raw user selections. Every field is optional; unset fields fall back to
/// defaults (or are filled by prompts before resolution).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Project name, or [`CURRENT_DIR_MARKER`] for in-place scaffolding
    pub project_name: Option<String>,
    pub frontend: Option<Frontend>,
    pub backend: Option<Backend>,
    pub database: Option<Database>,
    pub orm: Option<Orm>,
    pub auth: Option<Auth>,
    pub styling: Option<Styling>,
    pub package_manager: Option<PackageManager>,
    /// Runtime hint; only consulted when the backend is runtime-selectable
    pub runtime: Option<Runtime>,
    pub typecheck: Option<bool>,
    pub eslint: Option<bool>,
    pub tests: Option<bool>,
    pub e2e: Option<bool>,
    pub docker: Option<bool>,
}

/// Resolved boolean extras. `prettier` always mirrors `eslint` and is never
/// resolved independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub typecheck: bool,
    pub eslint: bool,
    pub prettier: bool,
    pub tests: bool,
    pub e2e: bool,
    pub docker: bool,
}

impl Default for Extras {
    fn default() -> Self {
        Self {
            typecheck: true,
            eslint: true,
            prettier: true,
            tests: false,
            e2e: false,
            docker: false,
        }
    }
}

/// Fully resolved, internally consistent configuration. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// On-disk/manifest name; never the current-directory marker
    pub project_name: String,
    /// Behavioral meaning of the marker: scaffold into the working directory
    /// instead of creating a subdirectory
    pub in_place: bool,
    pub frontend: Frontend,
    pub backend: Backend,
    pub database: Database,
    pub orm: Orm,
    pub auth: Auth,
    pub styling: Styling,
    pub package_manager: PackageManager,
    /// Present only when the backend is runtime-selectable
    pub runtime: Option<Runtime>,
    pub extras: Extras,
}

/// Informational side effects of resolution, surfaced to the user by the
/// calling layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PackageManagerForcedByBackend {
        backend: Backend,
        package_manager: PackageManager,
    },
    PackageManagerForcedByRuntime {
        runtime: Runtime,
        package_manager: PackageManager,
    },
    OrmAutoSelected {
        database: Database,
        orm: Orm,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PackageManagerForcedByBackend {
                backend,
                package_manager,
            } => write!(
                f,
                "{} requires the {} package manager; overriding package manager selection",
                backend,
                package_manager.command()
            ),
            Notice::PackageManagerForcedByRuntime {
                runtime,
                package_manager,
            } => write!(
                f,
                "{} runtime selected; package manager set to {}",
                runtime,
                package_manager.command()
            ),
            Notice::OrmAutoSelected { database, orm } => {
                write!(f, "{} is the only ORM for {}; selected automatically", orm, database)
            }
        }
    }
}

/// Output of [`resolver::resolve`]: the configuration plus any notices.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub config: ProjectConfig,
    pub notices: Vec<Notice>,
}
