//! Static compatibility tables
//!
//! Plain data: per-frontend allow-lists for backends, databases, and auth
//! providers; per-database allow-lists for ORMs; and a per-backend descriptor
//! carrying the layout decision plus at most one special behavior. All tables
//! are `'static` and never mutated after process start.

use crate::config::{Auth, Backend, Database, Frontend, Orm, PackageManager};
use crate::layout::LayoutDecision;

/// Special resolution behavior a backend can carry. At most one per backend,
/// which the descriptor makes structural (`Option`, not three independent sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialBehavior {
    /// The backend only works with one package manager; the user's choice is
    /// overridden during resolution.
    MandatesPackageManager(PackageManager),
    /// The backend runs on more than one JS runtime; resolution includes a
    /// runtime step.
    RuntimeSelectable,
    /// The backend brings its own storage; the database and ORM steps are
    /// skipped entirely.
    SkipsDatabase,
}

/// Static descriptor for a backend: its layout plus any special behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendProfile {
    pub layout: LayoutDecision,
    pub special: Option<SpecialBehavior>,
}

/// Look up the static descriptor for a backend.
pub const fn profile(backend: Backend) -> BackendProfile {
    match backend {
        Backend::None => BackendProfile {
            layout: LayoutDecision::None,
            special: None,
        },
        Backend::Hono => BackendProfile {
            layout: LayoutDecision::Separate,
            special: Some(SpecialBehavior::RuntimeSelectable),
        },
        Backend::Elysia => BackendProfile {
            layout: LayoutDecision::Separate,
            special: Some(SpecialBehavior::MandatesPackageManager(PackageManager::Bun)),
        },
        Backend::Express => BackendProfile {
            layout: LayoutDecision::Separate,
            special: None,
        },
        Backend::Fastify => BackendProfile {
            layout: LayoutDecision::Separate,
            special: None,
        },
        Backend::NextjsBuiltin => BackendProfile {
            layout: LayoutDecision::Integrated,
            special: None,
        },
        Backend::Convex => BackendProfile {
            layout: LayoutDecision::Integrated,
            special: Some(SpecialBehavior::SkipsDatabase),
        },
    }
}

/// Package manager the backend mandates, if any.
pub fn mandated_package_manager(backend: Backend) -> Option<PackageManager> {
    match profile(backend).special {
        Some(SpecialBehavior::MandatesPackageManager(pm)) => Some(pm),
        _ => None,
    }
}

/// Whether resolution includes a runtime step for this backend.
pub fn runtime_selectable(backend: Backend) -> bool {
    matches!(profile(backend).special, Some(SpecialBehavior::RuntimeSelectable))
}

/// Whether the database and ORM steps are skipped for this backend.
pub fn skips_database(backend: Backend) -> bool {
    matches!(profile(backend).special, Some(SpecialBehavior::SkipsDatabase))
}

/// Valid backends for a frontend framework.
pub fn backends_for(frontend: Frontend) -> &'static [Backend] {
    match frontend {
        Frontend::Next => &[
            Backend::None,
            Backend::NextjsBuiltin,
            Backend::Hono,
            Backend::Elysia,
            Backend::Express,
            Backend::Fastify,
            Backend::Convex,
        ],
        Frontend::React | Frontend::Vue | Frontend::Svelte | Frontend::Solid => &[
            Backend::None,
            Backend::Hono,
            Backend::Elysia,
            Backend::Express,
            Backend::Fastify,
            Backend::Convex,
        ],
    }
}

/// Valid databases for a frontend framework.
///
/// Keyed by frontend even though the lists currently coincide, so the table
/// shape survives narrowing a single framework later.
pub fn databases_for(frontend: Frontend) -> &'static [Database] {
    match frontend {
        Frontend::Next
        | Frontend::React
        | Frontend::Vue
        | Frontend::Svelte
        | Frontend::Solid => &[
            Database::None,
            Database::Sqlite,
            Database::Postgres,
            Database::Mysql,
            Database::Mongodb,
        ],
    }
}

/// Valid ORMs for a database.
pub fn orms_for(database: Database) -> &'static [Orm] {
    match database {
        Database::None => &[Orm::None],
        Database::Sqlite => &[Orm::None, Orm::Drizzle],
        Database::Postgres | Database::Mysql => &[Orm::None, Orm::Drizzle, Orm::Prisma],
        Database::Mongodb => &[Orm::None, Orm::Mongoose],
    }
}

/// Valid auth providers for a frontend framework.
pub fn auth_for(frontend: Frontend) -> &'static [Auth] {
    match frontend {
        Frontend::Next => &[Auth::None, Auth::BetterAuth, Auth::NextAuth, Auth::Clerk],
        Frontend::React | Frontend::Vue | Frontend::Svelte | Frontend::Solid => {
            &[Auth::None, Auth::BetterAuth, Auth::Clerk]
        }
    }
}

/// The single non-`none` ORM for a database, when its allow-list has exactly
/// one. Drives auto-assignment during resolution.
pub fn single_orm(database: Database) -> Option<Orm> {
    let non_none: Vec<Orm> = orms_for(database)
        .iter()
        .copied()
        .filter(|o| *o != Orm::None)
        .collect();
    match non_none.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn every_backend_has_at_most_one_special_behavior() {
        // Structural via Option, but keep the table honest if the descriptor
        // ever grows fields
        for backend in Backend::value_variants() {
            let p = profile(*backend);
            let count = [
                mandated_package_manager(*backend).is_some(),
                runtime_selectable(*backend),
                skips_database(*backend),
            ]
            .iter()
            .filter(|b| **b)
            .count();
            assert!(count <= 1, "{:?} has multiple special behaviors: {:?}", backend, p);
        }
    }

    #[test]
    fn nextjs_builtin_only_valid_for_next() {
        assert!(backends_for(Frontend::Next).contains(&Backend::NextjsBuiltin));
        for frontend in [Frontend::React, Frontend::Vue, Frontend::Svelte, Frontend::Solid] {
            assert!(!backends_for(frontend).contains(&Backend::NextjsBuiltin));
        }
    }

    #[test]
    fn every_allow_list_includes_the_none_sentinel() {
        for frontend in Frontend::value_variants() {
            assert!(backends_for(*frontend).contains(&Backend::None));
            assert!(databases_for(*frontend).contains(&Database::None));
            assert!(auth_for(*frontend).contains(&Auth::None));
        }
        for database in Database::value_variants() {
            assert!(orms_for(*database).contains(&Orm::None));
        }
    }

    #[test]
    fn single_orm_databases() {
        assert_eq!(single_orm(Database::Sqlite), Some(Orm::Drizzle));
        assert_eq!(single_orm(Database::Mongodb), Some(Orm::Mongoose));
        assert_eq!(single_orm(Database::Postgres), None);
        assert_eq!(single_orm(Database::Mysql), None);
        assert_eq!(single_orm(Database::None), None);
    }

    #[test]
    fn elysia_mandates_bun() {
        assert_eq!(mandated_package_manager(Backend::Elysia), Some(PackageManager::Bun));
    }

    #[test]
    fn hono_is_runtime_selectable() {
        assert!(runtime_selectable(Backend::Hono));
        for backend in Backend::value_variants() {
            if *backend != Backend::Hono {
                assert!(!runtime_selectable(*backend), "{:?}", backend);
            }
        }
    }

    #[test]
    fn convex_skips_database() {
        assert!(skips_database(Backend::Convex));
        assert!(!skips_database(Backend::Hono));
    }
}
