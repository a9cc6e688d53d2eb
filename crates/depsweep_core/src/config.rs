use anyhow::{Result, anyhow};
use log::{debug, trace};
use path_clean::PathClean;
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::constants::MANIFEST_FILE;

/// Walks up from `start` to the nearest directory holding a `package.json`.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    debug!("Searching for project root from {:?}", start);
    let mut current_dir = start.to_path_buf().clean();

    loop {
        let manifest = current_dir.join(MANIFEST_FILE);
        trace!("Checking for manifest at: {:?}", manifest);
        if manifest.is_file() {
            debug!("Found project root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find {} in any parent folder", MANIFEST_FILE);
                return Err(anyhow!(
                    "Could not find {} in {} or any parent folder",
                    MANIFEST_FILE,
                    start.display()
                ));
            }
        }
    }
}

/// Resolves the analysis root: an explicit directory as given, else the
/// nearest project above the working directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(r) => {
            debug!("Using provided root directory: {:?}", r);
            let cleaned = r.to_path_buf().clean();
            Ok(cleaned.canonicalize().unwrap_or(cleaned))
        }
        None => {
            debug!("No root provided, searching upward from the working directory");
            find_project_root(&env::current_dir()?)
        }
    }
}
