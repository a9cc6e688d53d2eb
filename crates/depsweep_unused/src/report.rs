use depsweep_core::{DeclaredDependencies, FileAnalysisError};
use log::{debug, warn};
use std::collections::BTreeMap;

use crate::{
    packages::{PackageInspection, install_path},
    reconciler::Reconciled,
    types::{AnalysisResult, PackageDetail},
};

/// Everything gathered during a run, ready to be joined into a result.
#[derive(Debug, Default)]
pub struct ReportParts {
    pub reconciled: Reconciled,
    pub inspections: Vec<PackageInspection>,
    pub errors: Vec<FileAnalysisError>,
    pub includes_dev_dependencies: bool,
    pub files_analyzed: usize,
}

/// Joins the parts into an [`AnalysisResult`].
///
/// Every used or unused name gets a detail entry; one that the inspection step
/// did not produce is filled with the declared version and size 0.
pub fn build_result(declared: &DeclaredDependencies, parts: ReportParts) -> AnalysisResult {
    let ReportParts { reconciled, inspections, mut errors, includes_dev_dependencies, files_analyzed } =
        parts;

    let mut package_details: BTreeMap<String, PackageDetail> = BTreeMap::new();
    for inspection in inspections {
        if !reconciled.used.contains(&inspection.name) && !reconciled.unused.contains(&inspection.name)
        {
            continue;
        }
        errors.extend(inspection.errors.iter().cloned());
        package_details.insert(inspection.name.clone(), inspection.detail());
    }

    for name in reconciled.reported_names() {
        if package_details.contains_key(name) {
            continue;
        }
        warn!("No package details for {}, using declared version", name);
        let version = declared.get(name).map(|d| d.version_range.clone()).unwrap_or_default();
        errors.push(FileAnalysisError::new(install_path(name), "package details unavailable"));
        package_details.insert(
            name.to_string(),
            PackageDetail { name: name.to_string(), version, size_bytes: 0 },
        );
    }

    debug!(
        "Built result: {} used, {} unused, {} errors",
        reconciled.used.len(),
        reconciled.unused.len(),
        errors.len()
    );

    AnalysisResult {
        used: reconciled.used,
        unused: reconciled.unused,
        package_details,
        errors,
        includes_dev_dependencies,
        files_analyzed,
    }
}
