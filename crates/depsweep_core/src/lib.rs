//! Core utilities for depsweep.
//!
//! This crate provides the building blocks for finding which declared
//! dependencies of a JavaScript/TypeScript project are referenced by its source:
//! - Reading the declared dependencies from `package.json`
//! - Discovering source files under a project root
//! - Extracting `import`/`require` references from JS/TS/JSX/Vue/Svelte files
//! - Resolving import paths to package names (scoped and submodule forms)

mod collector;
mod config;
mod constants;
mod manifest;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use collector::{CollectorConfig, SourceFiles, collect_sources};
pub use config::{find_project_root, resolve_root};
pub use constants::{
    BUILTIN_MODULES, COMPONENT_EXTENSIONS, EXCLUDED_DIRS, INSTALL_DIR, MANIFEST_FILE,
    SELF_PACKAGE_NAME, SOURCE_EXTENSIONS,
};
pub use manifest::{
    DeclaredDependencies, DeclaredDependency, ManifestError, manifest_path, parse_manifest,
    read_manifest,
};
pub use parser::{Dialect, extract_imports, imports_for};
pub use resolver::{is_builtin_module, resolve, resolve_package_name};
pub use types::{FileAnalysisError, ImportKind, ImportReference, Probe};
