//! Project layout classification
//!
//! Whether the chosen backend gets its own package (monorepo), lives inside
//! the frontend package, or is absent. Pure function of the backend alone.

use crate::config::tables;
use crate::config::Backend;
use serde::{Deserialize, Serialize};

/// How backend code is laid out on disk relative to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDecision {
    /// No backend package at all
    None,
    /// Backend code lives inside the frontend package (API routes, embedded backend)
    Integrated,
    /// Monorepo: independent `packages/frontend` and `packages/backend`
    Separate,
}

/// Classify the layout for a backend. Total over the closed enum; any backend
/// that is neither separate nor integrated yields `None`.
pub fn classify(backend: Backend) -> LayoutDecision {
    tables::profile(backend).layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn classification_is_total() {
        for backend in Backend::value_variants() {
            // Every variant maps to exactly one of the three decisions
            let _ = classify(*backend);
        }
    }

    #[test]
    fn classification_is_idempotent() {
        for backend in Backend::value_variants() {
            assert_eq!(classify(*backend), classify(*backend));
        }
    }

    #[test]
    fn separate_backends() {
        for backend in [Backend::Hono, Backend::Elysia, Backend::Express, Backend::Fastify] {
            assert_eq!(classify(backend), LayoutDecision::Separate);
        }
    }

    #[test]
    fn integrated_backends() {
        assert_eq!(classify(Backend::NextjsBuiltin), LayoutDecision::Integrated);
        assert_eq!(classify(Backend::Convex), LayoutDecision::Integrated);
    }

    #[test]
    fn no_backend_means_no_layout() {
        assert_eq!(classify(Backend::None), LayoutDecision::None);
    }

    #[test]
    fn separate_and_integrated_sets_are_disjoint() {
        let separate: Vec<_> = Backend::value_variants()
            .iter()
            .filter(|b| classify(**b) == LayoutDecision::Separate)
            .collect();
        let integrated: Vec<_> = Backend::value_variants()
            .iter()
            .filter(|b| classify(**b) == LayoutDecision::Integrated)
            .collect();
        assert!(separate.iter().all(|b| !integrated.contains(b)));
        assert_eq!(separate.len(), 4);
        assert_eq!(integrated.len(), 2);
    }
}
