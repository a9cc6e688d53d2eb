use depsweep_core::{DeclaredDependencies, ImportReference, SELF_PACKAGE_NAME, resolve};
use log::{debug, trace};
use std::collections::BTreeSet;

/// Declared names referenced by one file's imports.
pub fn file_usage(declared: &DeclaredDependencies, refs: &[ImportReference]) -> BTreeSet<String> {
    let mut used = BTreeSet::new();
    for r in refs {
        if let Some(name) = resolve(r)
            && declared.contains(name)
        {
            trace!("'{}' in {} uses {}", r.raw_path, r.origin_file.display(), name);
            used.insert(name.to_string());
        }
    }
    used
}

/// Names never classified as used or unused: the project itself and this tool.
pub fn is_self_name(declared: &DeclaredDependencies, name: &str) -> bool {
    name == SELF_PACKAGE_NAME || declared.project_name.as_deref() == Some(name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub used: BTreeSet<String>,
    pub unused: BTreeSet<String>,
}

impl Reconciled {
    /// `used ∪ unused`, in name order.
    pub fn reported_names(&self) -> BTreeSet<&str> {
        self.used.iter().chain(&self.unused).map(String::as_str).collect()
    }
}

/// Splits the declared set into used and unused given every referenced name.
pub fn reconcile<I>(declared: &DeclaredDependencies, referenced: I) -> Reconciled
where
    I: IntoIterator<Item = String>,
{
    let used: BTreeSet<String> = referenced
        .into_iter()
        .filter(|name| declared.contains(name) && !is_self_name(declared, name))
        .collect();

    let unused: BTreeSet<String> = declared
        .names()
        .filter(|name| !used.contains(*name) && !is_self_name(declared, name))
        .map(str::to_string)
        .collect();

    debug!("Reconciled {} used and {} unused dependencies", used.len(), unused.len());
    Reconciled { used, unused }
}
