use anyhow::{Context, Result};
use dashmap::DashSet;
use depsweep_core::{FileAnalysisError, collect_sources, imports_for, read_manifest, resolve_root};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{path::PathBuf, thread};

use crate::{
    config::Config,
    packages::inspect_packages,
    reconciler::{file_usage, reconcile},
    report::{ReportParts, build_result},
    types::AnalysisResult,
};

/// Runs one analysis.
///
/// Fails only when the project manifest cannot be read (the error downcasts to
/// [`depsweep_core::ManifestError`]) or no root can be determined. Any other
/// problem is recorded in [`AnalysisResult::errors`].
pub fn run_unused_check(cfg: Config) -> Result<AnalysisResult> {
    info!("Starting unused dependency check");

    let root =
        resolve_root(cfg.root.as_deref()).context("Failed to determine the project root")?;
    info!("Using root directory: {}", root.display());

    let declared = read_manifest(&root, cfg.dev)?;
    info!("Manifest declares {} dependencies (dev included: {})", declared.len(), cfg.dev);

    let collector_cfg = cfg.collector_config(&root);
    let mut errors: Vec<FileAnalysisError> = Vec::new();
    let mut files: Vec<PathBuf> = Vec::new();
    for res in collect_sources(&collector_cfg) {
        match res {
            Ok(file) => files.push(file),
            Err(e) => {
                warn!("{}", e);
                errors.push(FileAnalysisError::new(&root, e.to_string()));
            }
        }
    }
    if files.is_empty() {
        warn!("No source files found under {}", root.display());
    }
    info!("Processing {} source files in parallel", files.len());

    let used: DashSet<String> = DashSet::new();
    let file_errors: Vec<FileAnalysisError> = files
        .par_iter()
        .filter_map(|file| {
            trace!("Thread {:?} processing: {}", thread::current().id(), file.display());
            match imports_for(&root, file) {
                Ok(refs) => {
                    for name in file_usage(&declared, &refs) {
                        used.insert(name);
                    }
                    None
                }
                Err(e) => {
                    warn!("Error analyzing {}: {}", file.display(), e.message);
                    Some(e)
                }
            }
        })
        .collect();
    errors.extend(file_errors);

    let reconciled = reconcile(&declared, used);
    info!(
        "Found {} used and {} unused dependencies",
        reconciled.used.len(),
        reconciled.unused.len()
    );

    let inspections = inspect_packages(&root, &declared, reconciled.reported_names());
    debug!("Inspected {} installed packages", inspections.len());

    let result = build_result(
        &declared,
        ReportParts {
            reconciled,
            inspections,
            errors,
            includes_dev_dependencies: cfg.dev,
            files_analyzed: files.len(),
        },
    );

    info!("Unused dependency check complete with {} errors", result.errors.len());
    Ok(result)
}
