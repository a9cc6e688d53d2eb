use log::{debug, trace};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use crate::constants::MANIFEST_FILE;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("package.json not found at {}", .path.display())]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("package.json at {} is malformed: {source}", .path.display())]
    ManifestMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub name: String,
    pub version_range: String,
    pub is_dev: bool,
}

/// Dependencies declared by one project manifest, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DeclaredDependencies {
    /// The project's own `name` field
    pub project_name: Option<String>,
    deps: BTreeMap<String, DeclaredDependency>,
}

impl DeclaredDependencies {
    pub fn get(&self, name: &str) -> Option<&DeclaredDependency> {
        self.deps.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.deps.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.deps.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclaredDependency> {
        self.deps.values()
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// Runtime entries win over dev entries for the same name.
    fn insert(&mut self, dep: DeclaredDependency) {
        self.deps.entry(dep.name.clone()).or_insert(dep);
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    name: Option<String>,
    #[serde(default)]
    dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    dev_dependencies: Option<BTreeMap<String, String>>,
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

/// Reads `package.json` under `root` and merges its dependency maps.
pub fn read_manifest(
    root: &Path,
    include_dev: bool,
) -> Result<DeclaredDependencies, ManifestError> {
    let path = manifest_path(root);
    debug!("Reading manifest at {}", path.display());
    let content = fs::read_to_string(&path)
        .map_err(|source| ManifestError::ManifestNotFound { path: path.clone(), source })?;
    parse_manifest(&path, &content, include_dev)
}

pub fn parse_manifest(
    path: &Path,
    content: &str,
    include_dev: bool,
) -> Result<DeclaredDependencies, ManifestError> {
    let raw: RawManifest = serde_json::from_str(content)
        .map_err(|source| ManifestError::ManifestMalformed { path: path.to_path_buf(), source })?;

    let mut declared = DeclaredDependencies { project_name: raw.name, ..Default::default() };

    for (name, version_range) in raw.dependencies.unwrap_or_default() {
        trace!("Declared dependency: {}@{}", name, version_range);
        declared.insert(DeclaredDependency { name, version_range, is_dev: false });
    }

    if include_dev {
        for (name, version_range) in raw.dev_dependencies.unwrap_or_default() {
            trace!("Declared dev dependency: {}@{}", name, version_range);
            declared.insert(DeclaredDependency { name, version_range, is_dev: true });
        }
    }

    debug!(
        "Manifest declares {} dependencies (project: {:?}, dev included: {})",
        declared.len(),
        declared.project_name,
        include_dev
    );
    Ok(declared)
}
