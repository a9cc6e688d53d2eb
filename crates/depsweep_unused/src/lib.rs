//! Unused dependency detection for JavaScript/TypeScript projects.
//!
//! This crate cross-references the dependencies declared in a project's
//! `package.json` with the packages its source files actually import, and
//! reports each declared dependency as used or unused together with its
//! installed version and on-disk size.
//!
//! An unused dependency is one no statically resolvable import refers to. That
//! is evidence for review, not proof the package can be removed.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use depsweep_unused::{Config, run_unused_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config { dev: true, ..Config::new("/path/to/project") };
//!
//! let result = run_unused_check(cfg)?;
//!
//! for name in &result.unused {
//!     println!("{} looks unused", name);
//! }
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! depsweep_unused::print_report(
//!     &mut stdout,
//!     &result,
//!     std::path::Path::new("/path/to/project"),
//! )?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod packages;
mod reconciler;
mod report;
mod reporter;
mod types;

// Re-export public API
pub use checker::run_unused_check;
pub use config::Config;
pub use packages::{PackageInspection, inspect_package, inspect_packages, installed_version, package_size};
pub use reconciler::{Reconciled, file_usage, is_self_name, reconcile};
pub use report::{ReportParts, build_result};
pub use reporter::{format_size, print_json, print_report};
pub use types::{AnalysisResult, PackageDetail};
