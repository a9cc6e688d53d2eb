use depsweep_core::FileAnalysisError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    pub name: String,
    /// Installed version, or the declared range when the installed copy is unreadable
    pub version: String,
    pub size_bytes: u64,
}

/// Everything one analysis run produces.
///
/// `unused` is evidence for a human to review, not a list of packages that are
/// safe to uninstall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub used: BTreeSet<String>,
    pub unused: BTreeSet<String>,
    pub package_details: BTreeMap<String, PackageDetail>,
    pub errors: Vec<FileAnalysisError>,
    pub includes_dev_dependencies: bool,
    pub files_analyzed: usize,
}
