//! Stackgen Core - Shared library for full-stack project scaffolding
//!
//! This library provides the core functionality for scaffolding full-stack
//! TypeScript projects: resolving a raw set of user selections into a
//! consistent project configuration, deciding the on-disk layout, building
//! package manifests, and writing the generated project to disk.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Decision Logic** - Pure functions: compatibility tables,
//!   configuration resolution, layout classification, manifest merging
//! - **Layer 2: Generation** - Template catalog and the scaffolding pipeline
//!   that writes files, installs dependencies, and initializes git
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stackgen_core::config::{resolver, Selection};
//!
//! let selection = Selection::default();
//! let resolution = resolver::resolve(&selection);
//! let layout = stackgen_core::layout::classify(resolution.config.backend);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod runner;
pub mod scaffold;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Notice, ProjectConfig, Resolution, Selection};
pub use error::Cancelled;
pub use layout::{classify, LayoutDecision};
pub use manifest::Manifest;

#[cfg(feature = "tui")]
pub use tui::run;
