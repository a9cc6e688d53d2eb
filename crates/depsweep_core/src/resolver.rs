use log::trace;

use crate::{
    constants::{BUILTIN_MODULES, BUILTIN_SCHEME},
    types::ImportReference,
};

/// Whether `request` names a module shipped with the runtime itself.
pub fn is_builtin_module(request: &str) -> bool {
    request.starts_with(BUILTIN_SCHEME) || BUILTIN_MODULES.binary_search(&request).is_ok()
}

/// Maps an import path to the installable package it belongs to.
///
/// `lodash/pick` resolves to `lodash` and `@scope/pkg/sub` to `@scope/pkg`.
/// Relative and absolute paths, built-in modules and malformed scoped paths
/// resolve to nothing.
pub fn resolve_package_name(request: &str) -> Option<&str> {
    if request.starts_with('.') || request.starts_with('/') {
        trace!("Skipping relative import: '{}'", request);
        return None;
    }
    if is_builtin_module(request) {
        trace!("Skipping built-in module: '{}'", request);
        return None;
    }

    let mut segments = request.split('/');
    let first = segments.next().filter(|s| !s.is_empty())?;

    if first.starts_with('@') {
        let second = segments.next().filter(|s| !s.is_empty());
        if first.len() == 1 || second.is_none() {
            trace!("Skipping malformed scoped import: '{}'", request);
            return None;
        }
        let end = first.len() + 1 + second.map_or(0, str::len);
        return Some(&request[..end]);
    }

    Some(first)
}

pub fn resolve(reference: &ImportReference) -> Option<&str> {
    resolve_package_name(&reference.raw_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImportKind;
    use std::path::PathBuf;

    #[test]
    fn test_plain_package() {
        assert_eq!(resolve_package_name("left-pad"), Some("left-pad"));
    }

    #[test]
    fn test_submodule_import() {
        assert_eq!(resolve_package_name("lodash/pick"), Some("lodash"));
        assert_eq!(resolve_package_name("core-js/stable/array"), Some("core-js"));
    }

    #[test]
    fn test_scoped_package() {
        assert_eq!(resolve_package_name("@scope/tool"), Some("@scope/tool"));
        assert_eq!(resolve_package_name("@scope/tool/sub/deep"), Some("@scope/tool"));
    }

    #[test]
    fn test_malformed_scoped_package() {
        assert_eq!(resolve_package_name("@scope"), None);
        assert_eq!(resolve_package_name("@scope/"), None);
        assert_eq!(resolve_package_name("@/components/Button"), None);
    }

    #[test]
    fn test_relative_and_absolute_paths() {
        assert_eq!(resolve_package_name("./local-module"), None);
        assert_eq!(resolve_package_name("../up/one"), None);
        assert_eq!(resolve_package_name("/abs/path"), None);
        assert_eq!(resolve_package_name("."), None);
    }

    #[test]
    fn test_builtin_modules() {
        assert_eq!(resolve_package_name("fs"), None);
        assert_eq!(resolve_package_name("fs/promises"), None);
        assert_eq!(resolve_package_name("node:path"), None);
        assert_eq!(resolve_package_name("node:test"), None);
        assert!(is_builtin_module("child_process"));
    }

    #[test]
    fn test_builtin_match_is_exact() {
        // A package merely prefixed by a built-in name is still a package
        assert_eq!(resolve_package_name("events-emitter"), Some("events-emitter"));
        assert_eq!(resolve_package_name("path-to-regexp"), Some("path-to-regexp"));
        assert!(!is_builtin_module("fs/extra"));
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(resolve_package_name(""), None);
    }

    #[test]
    fn test_resolve_reference() {
        let reference = ImportReference {
            raw_path: "@babel/core/lib/parse".to_string(),
            origin_file: PathBuf::from("src/index.js"),
            kind: ImportKind::Require,
        };
        assert_eq!(resolve(&reference), Some("@babel/core"));
    }
}
