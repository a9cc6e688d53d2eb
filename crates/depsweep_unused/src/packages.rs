//! Installed-package metadata and on-disk size.
//!
//! Every read here is best effort. A failure never drops the package from the
//! report; it downgrades the value to a default, records why in a [`Probe`],
//! and adds a [`FileAnalysisError`].

use depsweep_core::{
    DeclaredDependencies, FileAnalysisError, INSTALL_DIR, MANIFEST_FILE, Probe,
};
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::types::PackageDetail;

#[derive(Debug, Clone)]
pub struct PackageInspection {
    pub name: String,
    pub version: Probe<String>,
    pub size: Probe<u64>,
    pub errors: Vec<FileAnalysisError>,
}

impl PackageInspection {
    pub fn detail(&self) -> PackageDetail {
        PackageDetail {
            name: self.name.clone(),
            version: self.version.value().clone(),
            size_bytes: *self.size.value(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InstalledManifest {
    version: Option<String>,
}

/// Project-relative directory an installed package lives in.
pub fn install_path(name: &str) -> PathBuf {
    Path::new(INSTALL_DIR).join(name)
}

/// Reads and measures one installed package under `root`.
pub fn inspect_package(root: &Path, name: &str, declared_version: &str) -> PackageInspection {
    let rel_dir = install_path(name);
    let pkg_dir = root.join(&rel_dir);
    trace!("Inspecting installed package {} at {}", name, pkg_dir.display());

    if !pkg_dir.is_dir() {
        let reason = "package is not installed".to_string();
        debug!("{} not found at {}", name, pkg_dir.display());
        return PackageInspection {
            name: name.to_string(),
            version: Probe::Fallback { value: declared_version.to_string(), reason: reason.clone() },
            size: Probe::Fallback { value: 0, reason: reason.clone() },
            errors: vec![FileAnalysisError::new(rel_dir, reason)],
        };
    }

    let mut errors = Vec::new();

    let version = installed_version(&pkg_dir, declared_version);
    if let Some(reason) = version.reason() {
        errors.push(FileAnalysisError::new(rel_dir.join(MANIFEST_FILE), reason));
    }

    let (size, size_errors) = package_size(root, &rel_dir);
    errors.extend(size_errors);

    PackageInspection { name: name.to_string(), version, size, errors }
}

/// The `version` field of an installed package's manifest, falling back to
/// the declared range.
pub fn installed_version(pkg_dir: &Path, declared_version: &str) -> Probe<String> {
    let fallback = |reason: String| Probe::Fallback { value: declared_version.to_string(), reason };

    let content = match fs::read_to_string(pkg_dir.join(MANIFEST_FILE)) {
        Ok(c) => c,
        Err(e) => return fallback(format!("Failed to read package metadata: {}", e)),
    };

    match serde_json::from_str::<InstalledManifest>(&content) {
        Ok(InstalledManifest { version: Some(v) }) => Probe::Found(v),
        Ok(InstalledManifest { version: None }) => {
            fallback("Package metadata has no version field".to_string())
        }
        Err(e) => fallback(format!("Failed to parse package metadata: {}", e)),
    }
}

/// Sums the byte length of every regular, non-hidden file under `root/rel_dir`.
///
/// Symlinks are not followed and do not count. Files that cannot be measured
/// add nothing to the total and one error each.
pub fn package_size(root: &Path, rel_dir: &Path) -> (Probe<u64>, Vec<FileAnalysisError>) {
    let pkg_dir = root.join(rel_dir);
    let walker = WalkBuilder::new(&pkg_dir).standard_filters(false).hidden(true).build();

    let mut total: u64 = 0;
    let mut errors = Vec::new();

    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Error walking {}: {}", pkg_dir.display(), e);
                errors.push(FileAnalysisError::new(rel_dir, format!("Failed to walk: {}", e)));
                continue;
            }
        };
        if !dent.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        match dent.metadata() {
            Ok(meta) => total += meta.len(),
            Err(e) => {
                let rel = dent.path().strip_prefix(root).unwrap_or(dent.path());
                errors.push(FileAnalysisError::new(rel, format!("Failed to measure: {}", e)));
            }
        }
    }

    trace!("{} occupies {} bytes", pkg_dir.display(), total);
    let size = if errors.is_empty() {
        Probe::Found(total)
    } else {
        Probe::Fallback {
            value: total,
            reason: format!("{} entries could not be measured", errors.len()),
        }
    };
    (size, errors)
}

/// Inspects every named package in parallel, in name order.
pub fn inspect_packages<'n>(
    root: &Path,
    declared: &DeclaredDependencies,
    names: impl IntoIterator<Item = &'n str>,
) -> Vec<PackageInspection> {
    let names: Vec<&str> = names.into_iter().collect();
    debug!("Measuring {} installed packages", names.len());

    names
        .par_iter()
        .map(|name| {
            let declared_version =
                declared.get(name).map(|d| d.version_range.as_str()).unwrap_or_default();
            inspect_package(root, name, declared_version)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsweep_core::parse_manifest;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_installed_package() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let manifest = r#"{"name":"left-pad","version":"1.3.0"}"#;
        create_test_file(root, "node_modules/left-pad/package.json", manifest);
        create_test_file(root, "node_modules/left-pad/index.js", "module.exports = 1;");
        create_test_file(root, "node_modules/left-pad/lib/util.js", "abcd");

        let inspection = inspect_package(root, "left-pad", "^1.0.0");
        assert_eq!(inspection.version, Probe::Found("1.3.0".to_string()));
        let expected = (manifest.len() + "module.exports = 1;".len() + 4) as u64;
        assert_eq!(inspection.size, Probe::Found(expected));
        assert!(inspection.errors.is_empty());

        let detail = inspection.detail();
        assert_eq!(detail.name, "left-pad");
        assert_eq!(detail.version, "1.3.0");
        assert_eq!(detail.size_bytes, expected);
    }

    #[test]
    fn test_hidden_entries_not_counted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "node_modules/pkg/package.json", r#"{"version":"1.0.0"}"#);
        create_test_file(root, "node_modules/pkg/.npmignore", "0123456789");
        create_test_file(root, "node_modules/pkg/.cache/blob", "0123456789");

        let (size, errors) = package_size(root, Path::new("node_modules/pkg"));
        assert_eq!(size, Probe::Found(r#"{"version":"1.0.0"}"#.len() as u64));
        assert!(errors.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_counted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let big = create_test_file(root, "big.bin", &"x".repeat(1000));
        create_test_file(root, "node_modules/pkg/index.js", "ab");
        std::os::unix::fs::symlink(&big, root.join("node_modules/pkg/link.bin")).unwrap();

        let (size, _) = package_size(root, Path::new("node_modules/pkg"));
        assert_eq!(*size.value(), 2);
    }

    #[test]
    fn test_missing_package_directory() {
        let temp_dir = TempDir::new().unwrap();
        let inspection = inspect_package(temp_dir.path(), "ghost", "^2.0.0");

        assert!(inspection.version.is_fallback());
        assert!(inspection.size.is_fallback());
        assert_eq!(inspection.detail().version, "^2.0.0");
        assert_eq!(inspection.detail().size_bytes, 0);
        assert_eq!(inspection.errors.len(), 1);
        assert_eq!(inspection.errors[0].file, PathBuf::from("node_modules").join("ghost"));
    }

    #[test]
    fn test_missing_metadata_falls_back_to_declared_version() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "node_modules/bare/index.js", "abc");

        let inspection = inspect_package(root, "bare", "~0.1.0");
        assert!(inspection.version.is_fallback());
        assert_eq!(inspection.version.value(), "~0.1.0");
        assert_eq!(inspection.size, Probe::Found(3));
        assert_eq!(inspection.errors.len(), 1);
        assert!(inspection.errors[0].message.contains("package metadata"));
    }

    #[test]
    fn test_metadata_without_version() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        create_test_file(temp_dir.path(), "pkg/package.json", r#"{"name":"pkg"}"#);

        let version = installed_version(&pkg, "1.x");
        assert_eq!(version.value(), "1.x");
        assert_eq!(version.reason(), Some("Package metadata has no version field"));
    }

    #[test]
    fn test_malformed_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        create_test_file(temp_dir.path(), "pkg/package.json", "{ nope");

        let version = installed_version(&pkg, "1.x");
        assert!(version.is_fallback());
        assert!(version.reason().unwrap().starts_with("Failed to parse package metadata"));
    }

    #[test]
    fn test_scoped_package_path() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "node_modules/@scope/tool/package.json", r#"{"version":"3.1.4"}"#);

        let inspection = inspect_package(root, "@scope/tool", "^3.0.0");
        assert_eq!(inspection.version, Probe::Found("3.1.4".to_string()));
    }

    #[test]
    fn test_inspect_packages_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "node_modules/a/package.json", r#"{"version":"1.0.0"}"#);
        let declared = parse_manifest(
            Path::new("package.json"),
            r#"{ "dependencies": { "a": "^1.0.0", "b": "^2.0.0" } }"#,
            false,
        )
        .unwrap();

        let inspections = inspect_packages(root, &declared, ["a", "b"]);
        let names: Vec<&str> = inspections.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(inspections[0].version.value(), "1.0.0");
        assert_eq!(inspections[1].version.value(), "^2.0.0");
        assert_eq!(inspections[1].errors.len(), 1);
    }
}
